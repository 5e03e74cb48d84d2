//! Configuration sections.
//!
//! Each section is serde-deserializable with per-field defaults so maps
//! can be configured from partial files, and carries a `validate` method
//! run at construction boundaries.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

mod defaults;

/// Occupancy grid geometry.
///
/// Defaults describe a 40x30 grid of 30-unit square cells (a 1200x900
/// map) enclosed by a frame 10 units outside the map bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of cell columns.
    #[serde(default = "defaults::n_cells_width")]
    pub n_cells_width: usize,

    /// Number of cell rows.
    #[serde(default = "defaults::n_cells_height")]
    pub n_cells_height: usize,

    /// Cell width in map units.
    #[serde(default = "defaults::cell_width")]
    pub cell_width: f64,

    /// Cell height in map units.
    #[serde(default = "defaults::cell_height")]
    pub cell_height: f64,

    /// Distance from the map bounds to the enclosing frame.
    #[serde(default = "defaults::frame_margin")]
    pub frame_margin: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_cells_width: defaults::n_cells_width(),
            n_cells_height: defaults::n_cells_height(),
            cell_width: defaults::cell_width(),
            cell_height: defaults::cell_height(),
            frame_margin: defaults::frame_margin(),
        }
    }
}

impl GridConfig {
    /// Map width in map units.
    #[inline]
    pub fn map_width(&self) -> f64 {
        self.n_cells_width as f64 * self.cell_width
    }

    /// Map height in map units.
    #[inline]
    pub fn map_height(&self) -> f64 {
        self.n_cells_height as f64 * self.cell_height
    }

    /// Check dimensions are positive and sizes finite.
    pub fn validate(&self) -> Result<()> {
        if self.n_cells_width == 0 || self.n_cells_height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "grid dimensions must be non-zero (got {}x{})",
                self.n_cells_width, self.n_cells_height
            )));
        }
        for (name, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MapError::InvalidConfig(format!(
                    "{} must be positive and finite (got {})",
                    name, value
                )));
            }
        }
        if !self.frame_margin.is_finite() || self.frame_margin < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "frame_margin must be non-negative and finite (got {})",
                self.frame_margin
            )));
        }
        Ok(())
    }
}

/// Angular sweep settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Angular offset of the two side rays cast around each endpoint
    /// angle (radians).
    #[serde(default = "defaults::angle_epsilon")]
    pub angle_epsilon: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            angle_epsilon: defaults::angle_epsilon(),
        }
    }
}

impl SweepConfig {
    /// Check the epsilon is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !self.angle_epsilon.is_finite() || self.angle_epsilon <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "angle_epsilon must be positive and finite (got {})",
                self.angle_epsilon
            )));
        }
        Ok(())
    }
}

/// Ray fan settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RaycastConfig {
    /// Distance at which a ray that hits nothing is truncated. Misses
    /// resolve to the deterministic far point `origin + max_range * dir`.
    #[serde(default = "defaults::max_range")]
    pub max_range: f64,

    /// Default number of rays in a fan.
    #[serde(default = "defaults::num_rays")]
    pub num_rays: u32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_range: defaults::max_range(),
            num_rays: defaults::num_rays(),
        }
    }
}

impl RaycastConfig {
    /// Check the range is positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "max_range must be positive and finite (got {})",
                self.max_range
            )));
        }
        Ok(())
    }
}
