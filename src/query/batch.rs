//! Batch (lane-parallel) angular sweep.
//!
//! Same candidate rays, anchoring, and sort as the scalar sweep; only the
//! inner loop differs. Segments are tested four at a time through
//! [`Double4`] lanes, then lanes are inspected in segment-index order
//! with the same predicate sequence as the scalar loop.
//!
//! The output must stay bitwise equal to the scalar sweep. That holds
//! because lane-wise `+ - * /` round exactly like their scalar
//! counterparts and the nearest-hit comparisons run in the same order;
//! it would stop holding with fused multiply-add or a reordered
//! reduction. Keep the expression tree below in lockstep with
//! `intersect::ray_segment`.

use log::trace;

use crate::config::SweepConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::simd::Double4;
use crate::walls::{SegmentCollection, WallStore, LANES};

use super::visibility::{candidate_rays, into_polygon, validate_origin, CandidateRay};
use super::VisibilityBuilder;

/// Lane-parallel implementation of the angular sweep.
#[derive(Clone, Debug, Default)]
pub struct BatchSweepVisibility {
    config: SweepConfig,
}

impl BatchSweepVisibility {
    /// Create a batch sweep with the given configuration.
    pub fn new(config: SweepConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The sweep configuration.
    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }
}

/// Nearest candidate along one ray over lane groups of four segments.
fn nearest_hit_lanes(
    origin: Point2D,
    ray: &CandidateRay,
    soa: &SegmentCollection,
) -> Option<Point2D> {
    let mut best_t = f64::INFINITY;
    let mut best = None;
    if let Some(anchor) = ray.anchor {
        best_t = anchor.dist;
        best = Some(anchor.point);
    }

    let dx = Double4::splat(ray.dir.x);
    let dy = Double4::splat(ray.dir.y);
    let ox = Double4::splat(origin.x);
    let oy = Double4::splat(origin.y);

    for group in 0..soa.groups() {
        let base = group * LANES;
        let x1 = Double4::from_slice(&soa.start_xs[base..]);
        let y1 = Double4::from_slice(&soa.start_ys[base..]);
        let x2 = Double4::from_slice(&soa.end_xs[base..]);
        let y2 = Double4::from_slice(&soa.end_ys[base..]);

        let sx = x2 - x1;
        let sy = y2 - y1;
        let den = dx * sy - dy * sx;
        let wx = x1 - ox;
        let wy = y1 - oy;
        let t = (wx * sy - wy * sx) / den;
        let u = (wx * dy - wy * dx) / den;

        // Padding lanes are zero-length segments with den == 0; their
        // t/u lanes hold inf or NaN and are skipped before being read.
        for lane in 0..LANES {
            if den.lane(lane) == 0.0 {
                continue;
            }
            let (t, u) = (t.lane(lane), u.lane(lane));
            if t >= 0.0 && (0.0..=1.0).contains(&u) && t < best_t {
                best_t = t;
                best = Some(if t == 0.0 {
                    origin
                } else {
                    let index = base + lane;
                    Point2D::new(
                        soa.start_xs[index] + u * (soa.end_xs[index] - soa.start_xs[index]),
                        soa.start_ys[index] + u * (soa.end_ys[index] - soa.start_ys[index]),
                    )
                });
            }
        }
    }
    best
}

impl VisibilityBuilder for BatchSweepVisibility {
    fn lit_area(&self, origin: Point2D, walls: &WallStore) -> Result<Vec<Point2D>> {
        validate_origin(origin)?;
        let rays = candidate_rays(origin, walls, self.config.angle_epsilon);
        let soa = SegmentCollection::from_store(walls);
        trace!(
            "batch sweep: {} candidate rays over {} segments in {} lane groups",
            rays.len(),
            soa.len(),
            soa.groups()
        );

        let mut hits = Vec::with_capacity(rays.len());
        for ray in &rays {
            if let Some(point) = nearest_hit_lanes(origin, ray, &soa) {
                hits.push((point, origin.angle_to(&point)));
            }
        }
        Ok(into_polygon(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SweepVisibility;

    /// Frame plus interior walls, the shape every equivalence check uses.
    fn fixture_walls() -> WallStore {
        let mut walls = WallStore::new();
        walls
            .extend_flat(&[
                -10.0, -10.0, 910.0, -10.0, //
                910.0, -10.0, 910.0, 1210.0, //
                910.0, 1210.0, -10.0, 1210.0, //
                -10.0, 1210.0, -10.0, -10.0, //
                50.0, 50.0, 100.0, 100.0, //
                30.0, 30.0, 40.0, 60.0,
            ])
            .unwrap();
        walls
    }

    fn assert_exactly_equal(origin: Point2D, walls: &WallStore) {
        let scalar = SweepVisibility::default().lit_area(origin, walls).unwrap();
        let batch = BatchSweepVisibility::default()
            .lit_area(origin, walls)
            .unwrap();
        assert_eq!(scalar.len(), batch.len());
        for (i, (a, b)) in scalar.iter().zip(batch.iter()).enumerate() {
            assert_eq!(
                a.x.to_bits(),
                b.x.to_bits(),
                "vertex {} x differs: {} vs {}",
                i,
                a.x,
                b.x
            );
            assert_eq!(
                a.y.to_bits(),
                b.y.to_bits(),
                "vertex {} y differs: {} vs {}",
                i,
                a.y,
                b.y
            );
        }
    }

    #[test]
    fn test_batch_equals_scalar_exactly() {
        let walls = fixture_walls();
        assert_exactly_equal(Point2D::new(50.0, 50.0), &walls);
        assert_exactly_equal(Point2D::new(450.0, 300.0), &walls);
        assert_exactly_equal(Point2D::new(1.0, 1.0), &walls);
        assert_exactly_equal(Point2D::new(899.0, 1199.0), &walls);
    }

    #[test]
    fn test_batch_equals_scalar_on_awkward_lane_counts() {
        // 1..=9 segments: every padding residue, including whole padded
        // groups.
        for n in 1..=9u32 {
            let mut walls = WallStore::new();
            for i in 0..n {
                let f = f64::from(i);
                walls
                    .extend_flat(&[f * 7.0, 3.0 + f, 40.0 + f * 5.0, 60.0 - f * 2.0])
                    .unwrap();
            }
            assert_exactly_equal(Point2D::new(20.0, 10.0), &walls);
        }
    }

    #[test]
    fn test_batch_equals_scalar_with_degenerate_and_on_wall_origin() {
        let mut walls = fixture_walls();
        walls.extend_flat(&[70.0, 70.0, 70.0, 70.0]).unwrap();
        // Origin exactly on a wall.
        assert_exactly_equal(Point2D::new(60.0, 60.0), &walls);
    }

    #[test]
    fn test_batch_empty_store() {
        let walls = WallStore::new();
        let polygon = BatchSweepVisibility::default()
            .lit_area(Point2D::new(5.0, 5.0), &walls)
            .unwrap();
        assert!(polygon.is_empty());
    }
}
