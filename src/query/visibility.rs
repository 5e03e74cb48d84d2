//! Scalar angular sweep.
//!
//! Instead of sampling a fixed number of angles, the sweep samples
//! exactly the angles subtended by segment endpoints, plus two rays
//! offset by a small epsilon on either side of each. The side rays
//! disambiguate whether the sweep sees the near or far side of a corner;
//! the center ray is anchored to its endpoint so endpoint visibility does
//! not depend on rounding at the segment-parameter boundary.
//!
//! This module also owns the candidate-ray generation and the final
//! angle sort shared with the batch sweep; the two paths differ only in
//! their inner intersection loop.

use std::collections::HashSet;

use log::trace;

use crate::config::SweepConfig;
use crate::core::Point2D;
use crate::error::{MapError, Result};
use crate::walls::{Segment, WallStore};

use super::intersect::ray_segment;
use super::VisibilityBuilder;

/// Candidate hit pre-seeding a center ray: the endpoint that generated
/// the ray, at its distance from the origin.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Anchor {
    pub point: Point2D,
    pub dist: f64,
}

/// One ray of the sweep.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CandidateRay {
    /// Unit direction.
    pub dir: Point2D,
    /// Present on center rays whose endpoint lies on at least one
    /// non-degenerate segment. A strictly nearer generic hit still wins.
    pub anchor: Option<Anchor>,
}

#[inline]
fn key(p: &Point2D) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// Generate the sweep's candidate rays: three per unique endpoint
/// (center and ±epsilon), in endpoint first-appearance order.
pub(crate) fn candidate_rays(
    origin: Point2D,
    walls: &WallStore,
    angle_epsilon: f64,
) -> Vec<CandidateRay> {
    let segments = walls.segments();

    let mut endpoints: Vec<Point2D> = Vec::with_capacity(segments.len() * 2);
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(segments.len() * 2);
    // Endpoints carried only by degenerate segments still cast rays but
    // never anchor: a zero-length wall is invisible.
    let mut solid: HashSet<(u64, u64)> = HashSet::with_capacity(segments.len() * 2);
    for seg in segments {
        for p in [seg.start, seg.end] {
            if seen.insert(key(&p)) {
                endpoints.push(p);
            }
        }
        if !seg.is_degenerate() {
            solid.insert(key(&seg.start));
            solid.insert(key(&seg.end));
        }
    }

    let mut rays = Vec::with_capacity(endpoints.len() * 3);
    for endpoint in &endpoints {
        let base = origin.angle_to(endpoint);
        let anchor = if solid.contains(&key(endpoint)) {
            Some(Anchor {
                point: *endpoint,
                dist: origin.distance(endpoint),
            })
        } else {
            None
        };
        for (angle, anchor) in [
            (base - angle_epsilon, None),
            (base, anchor),
            (base + angle_epsilon, None),
        ] {
            rays.push(CandidateRay {
                dir: Point2D::new(angle.cos(), angle.sin()),
                anchor,
            });
        }
    }
    rays
}

/// Sort hits into polygon order: ascending angle of the hit point around
/// the origin.
pub(crate) fn into_polygon(mut hits: Vec<(Point2D, f64)>) -> Vec<Point2D> {
    hits.sort_unstable_by(|a, b| a.1.total_cmp(&b.1));
    hits.into_iter().map(|(point, _)| point).collect()
}

/// Reject non-finite origins before any angle math runs on them.
pub(crate) fn validate_origin(origin: Point2D) -> Result<()> {
    if !origin.is_finite() {
        return Err(MapError::InvalidGeometry(format!(
            "non-finite query origin ({}, {})",
            origin.x, origin.y
        )));
    }
    Ok(())
}

/// Nearest candidate along one ray, scanning segments in store order.
fn nearest_hit(origin: Point2D, ray: &CandidateRay, segments: &[Segment]) -> Option<Point2D> {
    let mut best_t = f64::INFINITY;
    let mut best = None;
    if let Some(anchor) = ray.anchor {
        best_t = anchor.dist;
        best = Some(anchor.point);
    }
    for seg in segments {
        if let Some(hit) = ray_segment(origin, ray.dir, seg) {
            if hit.t < best_t {
                best_t = hit.t;
                best = Some(hit.point);
            }
        }
    }
    best
}

/// Scalar reference implementation of the angular sweep.
#[derive(Clone, Debug, Default)]
pub struct SweepVisibility {
    config: SweepConfig,
}

impl SweepVisibility {
    /// Create a sweep with the given configuration.
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

impl VisibilityBuilder for SweepVisibility {
    fn lit_area(&self, origin: Point2D, walls: &WallStore) -> Result<Vec<Point2D>> {
        validate_origin(origin)?;
        let rays = candidate_rays(origin, walls, self.config.angle_epsilon);
        trace!(
            "scalar sweep: {} candidate rays over {} segments",
            rays.len(),
            walls.len()
        );

        let mut hits = Vec::with_capacity(rays.len());
        for ray in &rays {
            if let Some(point) = nearest_hit(origin, ray, walls.segments()) {
                hits.push((point, origin.angle_to(&point)));
            }
        }
        Ok(into_polygon(hits))
    }
}
