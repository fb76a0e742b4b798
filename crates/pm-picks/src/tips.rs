use pm_core::Point2i;
use serde::{Deserialize, Serialize};

/// External polygon-simplification primitive.
///
/// Implementations are expected to behave like Douglas-Peucker on closed
/// polygons: the output is a subsequence of the input vertices.
pub trait Simplifier {
    /// Closed perimeter of `contour`.
    fn perimeter(&self, contour: &[Point2i]) -> f64;

    fn simplify(&self, contour: &[Point2i], epsilon: f64) -> Vec<Point2i>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipConfig {
    /// Magnification from native to working coordinates.
    pub scale: i32,
    /// Simplification tolerance as a fraction of the contour perimeter.
    pub simplify_tolerance_frac: f64,
    /// Two candidates closer than this horizontally (inclusive) are one pick.
    pub dedup_radius_px: i32,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            scale: 4,
            simplify_tolerance_frac: 0.0025,
            dedup_radius_px: 80,
        }
    }
}

/// Candidate pick apex in working coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCandidate {
    pub point: Point2i,
    /// Pixels above the scaled baseline; `None` without a baseline.
    pub height: Option<i32>,
}

impl TipCandidate {
    pub fn new(point: Point2i, scaled_baseline: Option<i32>) -> Self {
        Self {
            point,
            height: scaled_baseline.map(|b| b - point.y),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PickTipExtractor {
    config: TipConfig,
}

impl PickTipExtractor {
    pub fn new(config: TipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TipConfig {
        &self.config
    }

    /// Tips of one region outline given in native coordinates.
    ///
    /// The outline is simplified with a perimeter-relative tolerance, its
    /// vertices are magnified by [`TipConfig::scale`], and horizontally
    /// close vertices are suppressed with [`suppress_horizontal_neighbors`].
    /// `scaled_baseline` is the baseline row in working coordinates.
    pub fn extract<S: Simplifier + ?Sized>(
        &self,
        contour: &[Point2i],
        simplifier: &S,
        scaled_baseline: Option<i32>,
    ) -> Vec<TipCandidate> {
        if contour.is_empty() {
            return Vec::new();
        }

        let epsilon = self.config.simplify_tolerance_frac * simplifier.perimeter(contour);
        let scaled: Vec<Point2i> = simplifier
            .simplify(contour, epsilon)
            .into_iter()
            .map(|p| p * self.config.scale)
            .collect();

        let tips: Vec<TipCandidate> =
            suppress_horizontal_neighbors(&scaled, self.config.dedup_radius_px)
                .into_iter()
                .map(|p| TipCandidate::new(p, scaled_baseline))
                .collect();

        tracing::debug!(
            "region with {} outline points: {} vertices, {} tips",
            contour.len(),
            scaled.len(),
            tips.len()
        );
        tips
    }
}

/// Pairwise suppression of points within `radius` pixels horizontally.
///
/// For each unsuppressed `i` in order, every later unsuppressed `j` within
/// `radius` is compared: if `i` is strictly higher, `j` is dropped;
/// otherwise `i` is dropped and its scan stops. Survivors keep input order.
///
/// The rule is not transitive: in a chain of close points spanning more
/// than `radius`, both ends can survive.
pub fn suppress_horizontal_neighbors(points: &[Point2i], radius: i32) -> Vec<Point2i> {
    let mut suppressed = vec![false; points.len()];

    for i in 0..points.len() {
        if suppressed[i] {
            continue;
        }
        let a = points[i];
        for j in (i + 1)..points.len() {
            if suppressed[j] {
                continue;
            }
            let b = points[j];
            if a.dx_abs(b) <= radius {
                if a.y < b.y {
                    suppressed[j] = true;
                } else {
                    suppressed[i] = true;
                    break;
                }
            }
        }
    }

    points
        .iter()
        .zip(&suppressed)
        .filter(|(_, s)| !**s)
        .map(|(p, _)| *p)
        .collect()
}

/// Topmost point per fixed-width column block over `[0, width)`.
///
/// Blocks are visited left to right; within a block the first point with
/// the strictly smallest `y` wins. Empty blocks contribute nothing, and
/// points outside `[0, width)` are ignored.
pub fn topmost_per_block(points: &[Point2i], width: i32, block_width: i32) -> Vec<Point2i> {
    if block_width <= 0 || width <= 0 {
        return Vec::new();
    }

    let mut tips = Vec::new();
    let mut start = 0;
    while start < width {
        let end = start + block_width;
        let best = points
            .iter()
            .filter(|p| p.x >= start && p.x < end && p.x < width)
            .fold(None::<Point2i>, |best, &p| match best {
                Some(b) if b.y <= p.y => Some(b),
                _ => Some(p),
            });
        tips.extend(best);
        start = end;
    }
    tips
}
