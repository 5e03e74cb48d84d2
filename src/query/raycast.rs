//! Fixed-increment ray fan.
//!
//! The simple sampling primitive: `num_rays` rays at equal angular steps,
//! each resolved to its nearest wall hit. Unlike the angular sweep it can
//! miss features thinner than one angular step; it exists as a cheap,
//! predictable probe and as the baseline the sweep is compared against.

use crate::config::RaycastConfig;
use crate::core::math::TWO_PI;
use crate::core::Point2D;
use crate::error::Result;
use crate::walls::WallStore;

use super::intersect::ray_segment;
use super::visibility::validate_origin;

/// Cast `num_rays` rays at fixed angular increments.
///
/// Ray `i` points at angle `2π·i/num_rays`, starting at angle 0 (+X) and
/// sweeping counter-clockwise. The result always holds exactly
/// `num_rays` points, in ray order: a ray that hits nothing resolves to
/// the deterministic far point `origin + max_range·dir` rather than
/// being omitted. `num_rays == 0` yields an empty result.
pub fn cast_rays_with(
    origin: Point2D,
    walls: &WallStore,
    num_rays: u32,
    config: &RaycastConfig,
) -> Result<Vec<Point2D>> {
    validate_origin(origin)?;
    config.validate()?;

    let mut points = Vec::with_capacity(num_rays as usize);
    for i in 0..num_rays {
        let angle = TWO_PI * f64::from(i) / f64::from(num_rays);
        let dir = Point2D::new(angle.cos(), angle.sin());

        let mut best_t = f64::INFINITY;
        let mut best = None;
        for seg in walls.segments() {
            if let Some(hit) = ray_segment(origin, dir, seg) {
                if hit.t < best_t {
                    best_t = hit.t;
                    best = Some(hit.point);
                }
            }
        }
        points.push(match best {
            Some(point) => point,
            None => origin + dir * config.max_range,
        });
    }
    Ok(points)
}
