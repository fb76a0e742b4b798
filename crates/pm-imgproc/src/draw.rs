//! Annotation surface.
//!
//! The measurement action describes what to render through [`Surface`];
//! [`RgbCanvas`] rasterizes it with `imageproc`. Text needs a font; without
//! one, labels are silently skipped.

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_text_mut,
};
use pm_core::Point2i;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Outline,
}

pub trait Surface {
    fn dimensions(&self) -> (u32, u32);

    fn line(&mut self, from: Point2i, to: Point2i, color: Rgb<u8>, thickness: u32);

    fn circle(&mut self, center: Point2i, radius: i32, color: Rgb<u8>, fill: Fill);

    /// Draws `text` with its baseline-left corner at `at`; `px` is the glyph
    /// height in pixels.
    fn text(&mut self, at: Point2i, text: &str, color: Rgb<u8>, px: f32);

    fn polyline(&mut self, points: &[Point2i], closed: bool, color: Rgb<u8>, thickness: u32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, thickness);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], color, thickness);
        }
    }

    /// Vertical dashed line from `top` down to `bottom_y`.
    fn dashed_vline(&mut self, top: Point2i, bottom_y: i32, color: Rgb<u8>, dash: i32, gap: i32) {
        let step = (dash + gap).max(1);
        let mut y = top.y;
        while y < bottom_y {
            let end = (y + dash).min(bottom_y);
            self.line(Point2i::new(top.x, y), Point2i::new(top.x, end), color, 1);
            y += step;
        }
    }
}

pub struct RgbCanvas {
    image: RgbImage,
    font: Option<FontArc>,
}

impl RgbCanvas {
    pub fn new(image: RgbImage) -> Self {
        Self { image, font: None }
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl Surface for RgbCanvas {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn line(&mut self, from: Point2i, to: Point2i, color: Rgb<u8>, thickness: u32) {
        let t = thickness.max(1) as i32;
        let horizontalish = (to.x - from.x).abs() >= (to.y - from.y).abs();
        for k in 0..t {
            let off = k - t / 2;
            let (ox, oy) = if horizontalish { (0, off) } else { (off, 0) };
            draw_line_segment_mut(
                &mut self.image,
                ((from.x + ox) as f32, (from.y + oy) as f32),
                ((to.x + ox) as f32, (to.y + oy) as f32),
                color,
            );
        }
    }

    fn circle(&mut self, center: Point2i, radius: i32, color: Rgb<u8>, fill: Fill) {
        let c = (center.x, center.y);
        match fill {
            Fill::Solid => draw_filled_circle_mut(&mut self.image, c, radius, color),
            Fill::Outline => {
                // Two rings for a 2 px stroke.
                draw_hollow_circle_mut(&mut self.image, c, radius, color);
                draw_hollow_circle_mut(&mut self.image, c, radius + 1, color);
            }
        }
    }

    fn text(&mut self, at: Point2i, text: &str, color: Rgb<u8>, px: f32) {
        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(px);
        // imageproc anchors text at the top-left corner of the glyph box.
        let top = at.y - px.round() as i32;
        draw_text_mut(&mut self.image, color, at.x, top, scale, font, text);
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use pm_core::Point2i;

    use super::{Fill, RgbCanvas, Surface};

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn thick_horizontal_line_covers_neighbor_rows() {
        let mut canvas = RgbCanvas::new(RgbImage::new(20, 20));
        canvas.line(Point2i::new(0, 10), Point2i::new(19, 10), RED, 5);

        let img = canvas.image();
        for y in 8..=12 {
            assert_eq!(*img.get_pixel(5, y), RED, "row {y}");
        }
        assert_eq!(*img.get_pixel(5, 14), Rgb([0, 0, 0]));
    }

    #[test]
    fn dashed_line_leaves_gaps() {
        let mut canvas = RgbCanvas::new(RgbImage::new(5, 40));
        canvas.dashed_vline(Point2i::new(2, 0), 40, RED, 10, 5);

        let img = canvas.image();
        assert_eq!(*img.get_pixel(2, 3), RED);
        assert_eq!(*img.get_pixel(2, 12), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 16), RED);
    }

    #[test]
    fn text_without_font_is_a_no_op() {
        let mut canvas = RgbCanvas::new(RgbImage::new(10, 10));
        canvas.text(Point2i::new(1, 8), "x", RED, 8.0);
        canvas.circle(Point2i::new(5, 5), 2, RED, Fill::Solid);
        assert_eq!(*canvas.image().get_pixel(5, 5), RED);
        assert_eq!(*canvas.image().get_pixel(0, 0), Rgb([0, 0, 0]));
    }
}
