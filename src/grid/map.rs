//! GridMap: occupancy grid plus its compacted wall store.
//!
//! The stateful surface an interactive layer drives: every grid mutation
//! triggers a full recompaction, and the current wall store is always
//! available for rendering and queries.

use log::debug;
use rand::Rng;

use crate::config::GridConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::query;
use crate::walls::WallStore;

use super::{GridCompactor, OccupancyGrid};

/// An editable occupancy grid kept in sync with its compacted walls.
#[derive(Clone, Debug)]
pub struct GridMap {
    grid: OccupancyGrid,
    compactor: GridCompactor,
    walls: WallStore,
}

impl GridMap {
    /// Create a map with an empty grid. The wall store starts as the
    /// enclosing frame alone.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let grid = OccupancyGrid::new(config.n_cells_width, config.n_cells_height);
        let mut compactor = GridCompactor::new(config)?;
        let walls = compactor.compact(&grid)?;
        Ok(Self {
            grid,
            compactor,
            walls,
        })
    }

    /// Flip one cell and recompact.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<()> {
        self.grid.toggle(x, y)?;
        self.walls = self.compactor.compact(&self.grid)?;
        Ok(())
    }

    /// Set one cell and recompact.
    pub fn set(&mut self, x: i32, y: i32, occupied: bool) -> Result<()> {
        self.grid.set(x, y, occupied)?;
        self.walls = self.compactor.compact(&self.grid)?;
        Ok(())
    }

    /// Empty every cell and recompact.
    pub fn clear(&mut self) -> Result<()> {
        self.grid.clear();
        self.walls = self.compactor.compact(&self.grid)?;
        Ok(())
    }

    /// Mark `n` distinct random cells occupied, then recompact once.
    ///
    /// `n` is clamped to the cell count.
    pub fn scatter_random<R: Rng>(&mut self, n: usize, rng: &mut R) -> Result<()> {
        let total = self.grid.width() * self.grid.height();
        let n = n.min(total);
        let picked = rand::seq::index::sample(rng, total, n);
        for index in picked {
            let x = (index % self.grid.width()) as i32;
            let y = (index / self.grid.width()) as i32;
            self.grid.set(x, y, true)?;
        }
        debug!("scattered {} random wall cells", n);
        self.walls = self.compactor.compact(&self.grid)?;
        Ok(())
    }

    /// Current compacted wall store.
    #[inline]
    pub fn walls(&self) -> &WallStore {
        &self.walls
    }

    /// Current occupancy grid.
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Grid geometry.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        self.compactor.config()
    }

    /// Visibility polygon from `origin` against the current walls.
    pub fn lit_area(&self, origin: Point2D) -> Result<Vec<Point2D>> {
        query::lit_area(origin, &self.walls)
    }

    /// Ray fan from `origin` against the current walls.
    pub fn cast_rays(&self, origin: Point2D, num_rays: u32) -> Result<Vec<Point2D>> {
        query::cast_rays(origin, &self.walls, num_rays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_map() -> GridMap {
        GridMap::new(GridConfig {
            n_cells_width: 8,
            n_cells_height: 6,
            cell_width: 30.0,
            cell_height: 30.0,
            frame_margin: 10.0,
        })
        .unwrap()
    }

    #[test]
    fn test_new_map_is_frame_only() {
        let map = small_map();
        assert_eq!(map.walls().len(), 4);
        assert_eq!(map.grid().occupied_count(), 0);
    }

    #[test]
    fn test_toggle_rebuilds_walls() {
        let mut map = small_map();
        let frame_only = map.walls().clone();
        map.toggle(3, 2).unwrap();
        assert_eq!(map.walls().len(), 8);
        map.toggle(3, 2).unwrap();
        assert_eq!(map.walls(), &frame_only);
    }

    #[test]
    fn test_toggle_out_of_range_leaves_walls_intact() {
        let mut map = small_map();
        let before = map.walls().clone();
        let err = map.toggle(8, 0).unwrap_err();
        assert!(matches!(err, MapError::InvalidIndex { .. }));
        assert_eq!(map.walls(), &before);
    }

    #[test]
    fn test_clear_restores_frame_only() {
        let mut map = small_map();
        map.toggle(1, 1).unwrap();
        map.toggle(5, 3).unwrap();
        map.clear().unwrap();
        assert_eq!(map.walls().len(), 4);
    }

    #[test]
    fn test_scatter_random_is_seeded_and_bounded() {
        let mut map = small_map();
        let mut rng = StdRng::seed_from_u64(42);
        map.scatter_random(10, &mut rng).unwrap();
        assert_eq!(map.grid().occupied_count(), 10);

        let mut other = small_map();
        let mut rng = StdRng::seed_from_u64(42);
        other.scatter_random(10, &mut rng).unwrap();
        assert_eq!(map.walls(), other.walls());

        // Requests beyond the cell count saturate.
        let mut full = small_map();
        let mut rng = StdRng::seed_from_u64(7);
        full.scatter_random(10_000, &mut rng).unwrap();
        assert_eq!(full.grid().occupied_count(), 48);
    }

    #[test]
    fn test_queries_run_against_current_walls() {
        let mut map = small_map();
        map.toggle(4, 3).unwrap();
        let origin = Point2D::new(15.0, 15.0);
        let polygon = map.lit_area(origin).unwrap();
        assert!(polygon.len() >= 3);
        let fan = map.cast_rays(origin, 36).unwrap();
        assert_eq!(fan.len(), 36);
        // Everything is enclosed by the frame, so no fan point escapes it.
        let config = map.config();
        for p in &fan {
            assert!(p.x >= -config.frame_margin - 1e-9);
            assert!(p.x <= config.map_width() + config.frame_margin + 1e-9);
        }
    }
}
