//! Visibility queries over a wall store.
//!
//! Two distinct primitives are exposed on purpose:
//!
//! - [`cast_rays`]: a fan of rays at fixed angular increments. Simple and
//!   predictable, but it can miss features thinner than its angular step.
//! - [`lit_area`] / [`lit_area_naive`]: the angular sweep, which samples
//!   exactly the angles subtended by segment endpoints (plus an epsilon
//!   on either side) and therefore produces the true visibility polygon.
//!
//! `lit_area` runs the lane-parallel batch sweep; `lit_area_naive` is the
//! scalar reference. Their outputs are exactly equal for every input.

mod batch;
mod intersect;
mod raycast;
mod visibility;

pub use batch::BatchSweepVisibility;
pub use intersect::{ray_segment, RayHit};
pub use raycast::cast_rays_with;
pub use visibility::SweepVisibility;

use crate::config::RaycastConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::walls::WallStore;

/// Computes the visibility polygon around an origin.
///
/// Implemented by the scalar sweep and the batch sweep. The two are
/// interchangeable: for every input they return bitwise-equal output.
pub trait VisibilityBuilder {
    /// Ordered polygon of the area visible from `origin`.
    ///
    /// Vertices are sorted by angle around the origin and the polygon is
    /// implicitly closed (the last vertex does not repeat the first).
    fn lit_area(&self, origin: Point2D, walls: &WallStore) -> Result<Vec<Point2D>>;
}

/// Visibility polygon via the batch (lane-parallel) sweep.
pub fn lit_area(origin: Point2D, walls: &WallStore) -> Result<Vec<Point2D>> {
    BatchSweepVisibility::default().lit_area(origin, walls)
}

/// Visibility polygon via the scalar reference sweep.
///
/// Output-identical to [`lit_area`]; kept public for correctness and
/// performance comparison.
pub fn lit_area_naive(origin: Point2D, walls: &WallStore) -> Result<Vec<Point2D>> {
    SweepVisibility::default().lit_area(origin, walls)
}

/// Ray fan with the default [`RaycastConfig`].
///
/// Returns exactly `num_rays` points, ray `i` at angle
/// `2π·i/num_rays`; misses resolve to the configured far point.
pub fn cast_rays(origin: Point2D, walls: &WallStore, num_rays: u32) -> Result<Vec<Point2D>> {
    cast_rays_with(origin, walls, num_rays, &RaycastConfig::default())
}
