use core::ops::{Mul, Sub};

use serde::{Deserialize, Serialize};

/// Integer point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        let dx = d.x as f64;
        let dy = d.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Absolute horizontal separation from `other`.
    pub fn dx_abs(self, other: Self) -> i32 {
        (self.x - other.x).abs()
    }
}

impl Sub for Point2i {
    type Output = Point2i;

    fn sub(self, rhs: Point2i) -> Self::Output {
        Point2i {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<i32> for Point2i {
    type Output = Point2i;

    fn mul(self, rhs: i32) -> Self::Output {
        Point2i {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Point2i;

    #[test]
    fn scaling_and_distance() {
        let p = Point2i::new(3, -2);
        assert_eq!(p * 4, Point2i::new(12, -8));

        let a = Point2i::new(0, 0);
        let b = Point2i::new(3, 4);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance(a), 0.0);
        assert_eq!(b.dx_abs(a), 3);
        assert_eq!(a.dx_abs(b), 3);
    }
}
