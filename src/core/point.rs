//! Point and coordinate types for the visibility engine.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Map coordinates (f64)
///
/// Row 0 of a grid maps to y = 0 with y growing downward, matching the
/// screen-space convention of the renderers this engine feeds.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle from this point to another (radians, CCW from +X)
    #[inline]
    pub fn angle_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }

    /// Length (magnitude) of this point as a vector from the origin
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalized(&self) -> Point2D {
        let len = self.length();
        if len > 0.0 {
            Point2D::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors)
    #[inline]
    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product (z-component of the 3D cross product)
    #[inline]
    pub fn cross(&self, other: &Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Whether both coordinates are finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}

/// Flatten points into the interleaved `[x0, y0, x1, y1, ...]` form
/// consumed by renderers.
pub fn flatten(points: &[Point2D]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in points {
        flat.push(p.x);
        flat.push(p.y);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((a.distance_squared(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_angle() {
        let origin = Point2D::ZERO;
        let east = Point2D::new(1.0, 0.0);
        let north = Point2D::new(0.0, 1.0);

        assert!((origin.angle_to(&east) - 0.0).abs() < 1e-12);
        assert!((origin.angle_to(&north) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_zero_is_zero() {
        let z = Point2D::ZERO.normalized();
        assert_eq!(z, Point2D::ZERO);
    }

    #[test]
    fn test_cross_sign() {
        let x = Point2D::new(1.0, 0.0);
        let y = Point2D::new(0.0, 1.0);
        assert_eq!(x.cross(&y), 1.0);
        assert_eq!(y.cross(&x), -1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2D::new(1.0, -2.0).is_finite());
        assert!(!Point2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Point2D::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_flatten() {
        let pts = [Point2D::new(1.0, 2.0), Point2D::new(3.0, 4.0)];
        assert_eq!(flatten(&pts), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
