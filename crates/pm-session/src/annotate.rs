//! Drawing calls for an annotated measurement frame.
//!
//! [`annotate`] issues primitives against any [`Surface`] sized to the
//! magnified frame; [`render`] does the magnification and rasterizes onto an
//! [`RgbCanvas`].

use ab_glyph::FontArc;
use image::{Rgb, RgbImage};
use pm_core::Point2i;
use pm_imgproc::{Fill, RgbCanvas, Surface, magnify_rgb};

use crate::measure::Measurement;

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const PINK: Rgb<u8> = Rgb([255, 180, 180]);
const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const ROSE: Rgb<u8> = Rgb([255, 0, 127]);
const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const TEAL: Rgb<u8> = Rgb([0, 200, 200]);

const SMALL_PX: f32 = 12.0;
const LATTICE_PX: f32 = 11.0;
const CAPTION_PX: f32 = 20.0;
const BASELINE_PX: f32 = 22.0;

const TRIANGLE_HALF_BASE: i32 = 200;
const TRIANGLE_HEIGHT: i32 = 300;

/// Magnifies `frame` by the measurement scale and draws `m` over it.
pub fn render(frame: &RgbImage, m: &Measurement, font: Option<&FontArc>) -> RgbImage {
    let zoomed = magnify_rgb(frame, m.scale.max(1) as u32);
    let mut canvas = RgbCanvas::new(zoomed);
    if let Some(font) = font {
        canvas = canvas.with_font(font.clone());
    }
    annotate(&mut canvas, m);
    canvas.into_image()
}

pub fn annotate<S: Surface + ?Sized>(surface: &mut S, m: &Measurement) {
    let (w, h) = surface.dimensions();
    let (w, h) = (w as i32, h as i32);

    draw_outlines(surface, m, w, h);

    for tip in &m.recorded {
        let p = tip.point;
        surface.circle(p, 4, RED, Fill::Solid);
        let at = if p.x > w - 100 {
            Point2i::new(p.x - 70, p.y + 15)
        } else {
            Point2i::new(p.x + 5, p.y - 5)
        };
        surface.text(at, &format!("({},{})", p.x, h - p.y), WHITE, SMALL_PX);
        if let Some(height) = tip.height {
            let below = Point2i::new(at.x, at.y + 12);
            surface.text(below, &format!("H: {height}px"), PINK, SMALL_PX);
        }
    }

    for tip in &m.matched {
        let p = tip.pair.raw;
        surface.circle(p, 6, YELLOW, Fill::Outline);
        let x = if p.x > w - 100 { p.x - 70 } else { p.x + 5 };
        let at = Point2i::new(x, p.y - 30);
        surface.text(at, &format!("({},{})", p.x, h - p.y), YELLOW, SMALL_PX);
        if let Some(height) = tip.height {
            let label = format!("True Pick Height: {height} px");
            surface.text(Point2i::new(at.x, at.y + 80), &label, ROSE, SMALL_PX);
        }
        let triangle = [
            p,
            Point2i::new(p.x - TRIANGLE_HALF_BASE, p.y + TRIANGLE_HEIGHT),
            Point2i::new(p.x + TRIANGLE_HALF_BASE, p.y + TRIANGLE_HEIGHT),
        ];
        surface.polyline(&triangle, true, MAGENTA, 2);
    }

    surface.text(
        Point2i::new(10, 100),
        "Azimuth Contour Line",
        BLUE,
        CAPTION_PX,
    );

    for &x in m.spacing.lattice.iter().filter(|&&x| x < w) {
        surface.dashed_vline(Point2i::new(x, 0), h, TEAL, 10, 5);
        surface.text(Point2i::new(x + 2, 20), &x.to_string(), TEAL, LATTICE_PX);
    }

    if let Some(yb) = m.scaled_baseline {
        surface.line(Point2i::new(0, yb), Point2i::new(w, yb), YELLOW, 5);
        let label = format!("Baseline: {} px from bottom", h - yb);
        surface.text(Point2i::new(10, yb - 10), &label, YELLOW, BASELINE_PX);
    }
}

/// Silhouette outlines, kept to the band between the ignored top rows and
/// the baseline and away from the left/right frame borders. Nothing is drawn
/// without a baseline.
fn draw_outlines<S: Surface + ?Sized>(surface: &mut S, m: &Measurement, w: i32, h: i32) {
    let Some(bottom) = m.scaled_baseline else {
        return;
    };
    let top = h as f64 * 0.1;
    let inside = |p: Point2i| {
        (p.y as f64) > top && p.y < bottom && p.x >= 5 && p.x <= w - 8
    };

    for region in &m.regions {
        let scaled: Vec<Point2i> = region.outline.iter().map(|&p| p * m.scale).collect();
        let n = scaled.len();
        for i in 0..n {
            let (a, b) = (scaled[i], scaled[(i + 1) % n]);
            if n > 1 && inside(a) && inside(b) {
                surface.line(a, b, BLUE, 2);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use pm_core::Point2i;
    use pm_imgproc::{Fill, Surface};
    use pm_picks::{SpacingEstimate, TipCandidate};

    use super::{annotate, render};
    use crate::measure::{Measurement, RegionTips};

    #[derive(Default)]
    struct Recorder {
        size: (u32, u32),
        lines: Vec<(Point2i, Point2i, u32)>,
        circles: Vec<(Point2i, i32, Fill)>,
        texts: Vec<String>,
        dashed: usize,
    }

    impl Surface for Recorder {
        fn dimensions(&self) -> (u32, u32) {
            self.size
        }
        fn line(&mut self, from: Point2i, to: Point2i, _: Rgb<u8>, thickness: u32) {
            self.lines.push((from, to, thickness));
        }
        fn circle(&mut self, center: Point2i, radius: i32, _: Rgb<u8>, fill: Fill) {
            self.circles.push((center, radius, fill));
        }
        fn text(&mut self, _: Point2i, text: &str, _: Rgb<u8>, _: f32) {
            self.texts.push(text.to_string());
        }
        fn dashed_vline(&mut self, _: Point2i, _: i32, _: Rgb<u8>, _: i32, _: i32) {
            self.dashed += 1;
        }
    }

    impl Recorder {
        fn sized(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                ..Self::default()
            }
        }
    }

    fn measurement(scaled_baseline: Option<i32>) -> Measurement {
        Measurement {
            timestamp_ms: 0.0,
            frame_width: 100,
            frame_height: 50,
            scale: 4,
            baseline: None,
            scaled_baseline,
            regions: vec![RegionTips {
                outline: vec![Point2i::new(10, 10), Point2i::new(20, 30), Point2i::new(30, 10)],
                tips: Vec::new(),
                recorded_count: 0,
                matched: Vec::new(),
            }],
            recorded: vec![TipCandidate::new(Point2i::new(80, 40), scaled_baseline)],
            raw_tips: Vec::new(),
            matched: Vec::new(),
            spacing: SpacingEstimate {
                average_spacing: 100,
                lattice: vec![80, 180, 280, 380],
                ..SpacingEstimate::default()
            },
            degradations: Vec::new(),
        }
    }

    #[test]
    fn emits_tips_lattice_and_baseline() {
        let mut rec = Recorder::sized(400, 200);
        annotate(&mut rec, &measurement(Some(180)));

        assert_eq!(rec.circles, vec![(Point2i::new(80, 40), 4, Fill::Solid)]);
        assert!(rec.texts.contains(&"(80,160)".to_string()));
        assert!(rec.texts.contains(&"H: 140px".to_string()));
        assert!(rec.texts.contains(&"Baseline: 20 px from bottom".to_string()));
        assert!(rec.texts.contains(&"Azimuth Contour Line".to_string()));
        assert_eq!(rec.dashed, 4);
        assert!(rec.lines.iter().any(|l| l.2 == 5));
    }

    #[test]
    fn outline_segments_below_baseline_are_skipped() {
        let mut rec = Recorder::sized(400, 200);
        // Scaled outline: (40,40) (80,120) (120,40); baseline at 100 cuts the
        // apex off, leaving only the top edge.
        annotate(&mut rec, &measurement(Some(100)));
        let outline: Vec<_> = rec.lines.iter().filter(|l| l.2 == 2).collect();
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].0, Point2i::new(120, 40));
    }

    #[test]
    fn no_heights_outlines_or_baseline_without_estimate() {
        let mut rec = Recorder::sized(400, 200);
        annotate(&mut rec, &measurement(None));
        assert!(!rec.texts.iter().any(|t| t.starts_with("H:")));
        assert!(!rec.texts.iter().any(|t| t.starts_with("Baseline")));
        assert!(rec.lines.is_empty());
    }

    #[test]
    fn lattice_and_baseline_stay_on_the_surface() {
        let mut rec = Recorder::sized(300, 200);
        annotate(&mut rec, &measurement(Some(180)));

        assert_eq!(rec.dashed, 3);
        assert!(!rec.texts.contains(&"380".to_string()));
        let baseline = rec.lines.iter().find(|l| l.2 == 5).expect("baseline line");
        assert_eq!(baseline.1, Point2i::new(300, 180));
    }

    #[test]
    fn render_magnifies_the_frame() {
        let frame = RgbImage::new(100, 50);
        let out = render(&frame, &measurement(Some(180)), None);
        assert_eq!(out.dimensions(), (400, 200));
        assert_eq!(*out.get_pixel(82, 40), Rgb([255, 0, 0]));
    }
}
