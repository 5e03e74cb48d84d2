//! Wall segment type using endpoint representation.
//!
//! Segments are represented by their start and end points only. Two
//! segments with identical endpoints are equivalent for all purposes;
//! there is no identity beyond position.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// A 2D wall segment defined by its endpoints.
///
/// Degenerate segments (`start == end`) are legal input. They can never
/// be hit by a ray (their direction is zero, so every ray is classified
/// as parallel) and they never contribute visible vertices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point of the wall.
    pub start: Point2D,
    /// End point of the wall.
    pub end: Point2D,
}

impl Segment {
    /// Create a new segment from two points.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Create a segment from four scalars `(x1, y1, x2, y2)`.
    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2D::new(x1, y1), Point2D::new(x2, y2))
    }

    /// Direction vector from start to end (not normalized).
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Whether the segment has zero length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Point on the segment at parameter `u` (`u = 0` start, `u = 1` end).
    ///
    /// Computed from the segment parametric form, so a hit on an
    /// axis-aligned wall is exact in the constant coordinate.
    #[inline]
    pub fn point_at(&self, u: f64) -> Point2D {
        Point2D::new(
            self.start.x + u * (self.end.x - self.start.x),
            self.start.y + u * (self.end.y - self.start.y),
        )
    }

    /// Whether all four coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_length() {
        let seg = Segment::from_coords(0.0, 0.0, 3.0, 4.0);
        assert_eq!(seg.direction(), Point2D::new(3.0, 4.0));
        assert!((seg.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate() {
        let seg = Segment::from_coords(2.0, 2.0, 2.0, 2.0);
        assert!(seg.is_degenerate());
        assert_eq!(seg.length(), 0.0);
    }

    #[test]
    fn test_point_at_exact_on_axis_aligned() {
        let seg = Segment::from_coords(40.0, 110.0, 120.0, 110.0);
        let p = seg.point_at(0.3125);
        assert_eq!(p.y, 110.0);
        assert_eq!(seg.point_at(0.0), seg.start);
        assert_eq!(seg.point_at(1.0), seg.end);
    }
}
