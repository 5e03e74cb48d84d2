//! # lumen2d: 2D Shadow-Casting Visibility Engine
//!
//! Computes the polygon of space visible from a point light source given
//! a set of opaque wall segments, plus the supporting machinery around
//! it:
//!
//! - **Grid compaction**: a boolean occupancy grid is merged into a
//!   minimal set of boundary wall segments, rebuilt on every edit
//! - **Angular sweep**: the visibility polygon samples exactly the
//!   angles subtended by segment endpoints (± a small epsilon), not a
//!   fixed angle grid
//! - **Batch execution**: a lane-parallel sweep whose output is
//!   bit-for-bit identical to the scalar reference
//! - **Ray fan**: fixed-angular-increment casting as a cheap probe and
//!   comparison baseline
//!
//! ## Quick Start
//!
//! ```
//! use lumen2d::{GridConfig, GridMap, Point2D};
//!
//! // 40x30 grid of 30-unit cells with an enclosing frame.
//! let mut map = GridMap::new(GridConfig::default()).unwrap();
//! map.toggle(10, 10).unwrap();
//!
//! let light = Point2D::new(450.0, 300.0);
//! let polygon = map.lit_area(light).unwrap();
//! assert!(polygon.len() >= 3);
//!
//! let fan = map.cast_rays(light, 360).unwrap();
//! assert_eq!(fan.len(), 360);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: [`Point2D`], angle math
//! - [`walls`]: [`Segment`], [`WallStore`], SoA mirror for the batch path
//! - [`grid`]: [`OccupancyGrid`], [`GridCompactor`], [`GridMap`]
//! - [`query`]: intersection, ray fan, scalar and batch sweeps
//! - [`simd`]: the 4-wide f64 lane type
//! - [`config`]: serde-backed configuration sections
//!
//! ## Coordinates
//!
//! Map units are arbitrary; the grid places row 0 at y = 0 with y
//! growing downward (screen convention). Angles are radians,
//! counter-clockwise positive, in the `atan2` range [-π, π].
//!
//! ## Determinism
//!
//! Every query is a pure function of its inputs: fixed inputs produce
//! identical outputs on every invocation, and the batch sweep matches
//! the scalar sweep exactly. Calls are independent and may run
//! concurrently as long as each call owns its store and grid.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod query;
pub mod simd;
pub mod walls;

pub use crate::config::{GridConfig, RaycastConfig, SweepConfig};
pub use crate::core::{flatten, Point2D};
pub use crate::error::{MapError, Result};
pub use crate::grid::{GridCompactor, GridMap, OccupancyGrid};
pub use crate::query::{
    cast_rays, cast_rays_with, lit_area, lit_area_naive, BatchSweepVisibility, SweepVisibility,
    VisibilityBuilder,
};
pub use crate::walls::{Segment, SegmentCollection, WallStore};
