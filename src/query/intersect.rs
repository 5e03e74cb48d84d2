//! Ray/segment intersection.
//!
//! The determinant-form solve shared by every query in the crate. The
//! batch sweep mirrors these exact expressions lane-wise; keep the two in
//! lockstep or the scalar/batch equality guarantee breaks.

use crate::core::Point2D;
use crate::walls::Segment;

/// A ray/segment intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the ray (the ray direction is unit length).
    pub t: f64,
    /// Position along the segment, in `[0, 1]`.
    pub u: f64,
    /// Hit point, computed from the segment parametric form
    /// `start + u·(end − start)`. A hit at `t == 0` is the ray origin
    /// itself, exactly.
    pub point: Point2D,
}

/// Intersect the ray `origin + t·dir` with a segment.
///
/// Solves `origin + t·dir = start + u·(end − start)`:
///
/// - a zero determinant (parallel ray, zero-length segment) is a miss,
///   never a division by zero;
/// - a hit requires `u ∈ [0, 1]` (endpoints inclusive) and `t ≥ 0`.
///   `t == 0` is reported so a ray whose origin lies on a wall resolves
///   to its own origin instead of seeing through the wall.
///
/// No epsilon is applied at this layer; angular disambiguation near
/// endpoints is the sweep's responsibility.
#[inline]
pub fn ray_segment(origin: Point2D, dir: Point2D, segment: &Segment) -> Option<RayHit> {
    let sx = segment.end.x - segment.start.x;
    let sy = segment.end.y - segment.start.y;
    let den = dir.x * sy - dir.y * sx;
    if den == 0.0 {
        return None;
    }
    let wx = segment.start.x - origin.x;
    let wy = segment.start.y - origin.y;
    let t = (wx * sy - wy * sx) / den;
    let u = (wx * dir.y - wy * dir.x) / den;
    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        // The segment form would put a t == 0 self-hit a rounding error
        // away from the origin; the intersection point there is the
        // origin by definition.
        let point = if t == 0.0 { origin } else { segment.point_at(u) };
        Some(RayHit { t, u, point })
    } else {
        None
    }
}
