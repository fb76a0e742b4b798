use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;
use pm_core::{Error, Image, Point2i};

use crate::convert::to_gray_image;

/// Outer boundaries of the top-level foreground regions of a binary mask.
///
/// Holes and regions nested inside holes are skipped. Any non-zero pixel is
/// foreground. Contours are returned in tracing order (raster order of their
/// first pixel).
pub fn outer_contours(mask: &Image<u8>) -> Result<Vec<Vec<Point2i>>, Error> {
    if mask.is_empty() {
        return Ok(Vec::new());
    }

    let gray = to_gray_image(mask)?;
    let contours = find_contours::<i32>(&gray)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| c.points.iter().map(|p| Point2i::new(p.x, p.y)).collect())
        .collect();

    Ok(contours)
}

/// Perimeter of a polyline, including the closing segment when `closed`.
pub fn arc_length(points: &[Point2i], closed: bool) -> f64 {
    imageproc::geometry::arc_length(&to_ip(points), closed)
}

/// Douglas-Peucker simplification of a closed polygon with tolerance
/// `epsilon` in pixels. A non-positive tolerance keeps every vertex.
pub fn simplify_polygon(points: &[Point2i], epsilon: f64) -> Vec<Point2i> {
    if points.len() < 3 || epsilon.is_nan() || epsilon <= 0.0 {
        return points.to_vec();
    }
    imageproc::geometry::approximate_polygon_dp(&to_ip(points), epsilon, true)
        .into_iter()
        .map(|p| Point2i::new(p.x, p.y))
        .collect()
}

fn to_ip(points: &[Point2i]) -> Vec<Point<i32>> {
    points.iter().map(|p| Point::new(p.x, p.y)).collect()
}
