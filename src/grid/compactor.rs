//! Grid-to-segment compaction.
//!
//! Converts a boolean occupancy grid into a minimal set of boundary wall
//! segments by merging collinear, adjacent cell edges, then appends a
//! fixed enclosing frame so visibility queries always meet a boundary.
//!
//! The scan is row-major, top to bottom, left to right. That order is
//! load-bearing: when a cell is visited, the edge slots of its north and
//! west neighbors already reflect the current pass, so an open boundary
//! segment can be grown instead of appending a unit piece. Merged
//! segments only ever grow their far endpoint (down for vertical edges,
//! right for horizontal ones).

use log::debug;

use crate::config::GridConfig;
use crate::core::Point2D;
use crate::error::Result;
use crate::walls::{Segment, WallStore};

use super::OccupancyGrid;

/// Per-cell table of open boundary segments, one slot per side.
///
/// A slot holds the store index of the segment currently representing
/// that side, so the next row (vertical edges) or the next column
/// (horizontal edges) can extend it. The table is working state of a
/// single compaction pass and is fully reset when the pass starts.
#[derive(Clone, Copy, Debug, Default)]
struct EdgeSlots {
    north: Option<usize>,
    south: Option<usize>,
    east: Option<usize>,
    west: Option<usize>,
}

/// Merges occupancy-grid boundary edges into wall segments.
///
/// Holds the edge-slot scratch arena so repeated compactions of
/// same-sized grids reuse one allocation.
#[derive(Clone, Debug)]
pub struct GridCompactor {
    config: GridConfig,
    slots: Vec<EdgeSlots>,
}

impl GridCompactor {
    /// Create a compactor for grids measured by `config`'s cell sizes.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Vec::new(),
        })
    }

    /// Compact `grid` into a fresh wall store.
    ///
    /// Full recomputation every call; the previous pass leaves no state
    /// behind. The enclosing frame (a closed rectangle `frame_margin`
    /// outside the map bounds) is appended after the per-cell scan, so
    /// the output is never empty and the lit area is always bounded.
    pub fn compact(&mut self, grid: &OccupancyGrid) -> Result<WallStore> {
        let (w, h) = (grid.width(), grid.height());
        let cw = self.config.cell_width;
        let ch = self.config.cell_height;

        self.slots.clear();
        self.slots.resize(w * h, EdgeSlots::default());

        let mut walls = WallStore::with_capacity(16);

        for row in 0..h as i32 {
            for col in 0..w as i32 {
                if !grid.is_occupied(col, row) {
                    continue;
                }
                let cell = row as usize * w + col as usize;
                let north = (row as usize).checked_sub(1).map(|r| r * w + col as usize);
                let west = (col as usize).checked_sub(1).map(|c| row as usize * w + c);

                let (x0, y0) = (col as f64 * cw, row as f64 * ch);
                let (x1, y1) = ((col + 1) as f64 * cw, (row + 1) as f64 * ch);

                // Vertical edges continue the north neighbor's open
                // segment; horizontal edges continue the west neighbor's.
                if !grid.is_occupied(col - 1, row) {
                    let open = north.and_then(|n| self.slots[n].west);
                    self.slots[cell].west = Some(match open {
                        Some(id) => {
                            walls.extend_end(id, Point2D::new(0.0, ch))?;
                            id
                        }
                        None => {
                            let id = walls.len();
                            walls.push(Segment::from_coords(x0, y0, x0, y1))?;
                            id
                        }
                    });
                }
                if !grid.is_occupied(col + 1, row) {
                    let open = north.and_then(|n| self.slots[n].east);
                    self.slots[cell].east = Some(match open {
                        Some(id) => {
                            walls.extend_end(id, Point2D::new(0.0, ch))?;
                            id
                        }
                        None => {
                            let id = walls.len();
                            walls.push(Segment::from_coords(x1, y0, x1, y1))?;
                            id
                        }
                    });
                }
                if !grid.is_occupied(col, row - 1) {
                    let open = west.and_then(|n| self.slots[n].north);
                    self.slots[cell].north = Some(match open {
                        Some(id) => {
                            walls.extend_end(id, Point2D::new(cw, 0.0))?;
                            id
                        }
                        None => {
                            let id = walls.len();
                            walls.push(Segment::from_coords(x0, y0, x1, y0))?;
                            id
                        }
                    });
                }
                if !grid.is_occupied(col, row + 1) {
                    let open = west.and_then(|n| self.slots[n].south);
                    self.slots[cell].south = Some(match open {
                        Some(id) => {
                            walls.extend_end(id, Point2D::new(cw, 0.0))?;
                            id
                        }
                        None => {
                            let id = walls.len();
                            walls.push(Segment::from_coords(x0, y1, x1, y1))?;
                            id
                        }
                    });
                }
            }
        }

        let m = self.config.frame_margin;
        let (map_w, map_h) = (w as f64 * cw, h as f64 * ch);
        let frame = [
            Segment::from_coords(-m, -m, map_w + m, -m),
            Segment::from_coords(map_w + m, -m, map_w + m, map_h + m),
            Segment::from_coords(map_w + m, map_h + m, -m, map_h + m),
            Segment::from_coords(-m, map_h + m, -m, -m),
        ];
        for seg in frame {
            walls.push(seg)?;
        }

        debug!(
            "compacted {} occupied cells into {} wall segments",
            grid.occupied_count(),
            walls.len()
        );
        Ok(walls)
    }

    /// The grid geometry this compactor measures cells with.
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compactor() -> GridCompactor {
        GridCompactor::new(GridConfig {
            n_cells_width: 4,
            n_cells_height: 3,
            cell_width: 30.0,
            cell_height: 30.0,
            frame_margin: 10.0,
        })
        .unwrap()
    }

    fn contains(walls: &WallStore, seg: Segment) -> bool {
        walls.segments().iter().any(|s| *s == seg)
    }

    #[test]
    fn test_empty_grid_is_frame_only() {
        let grid = OccupancyGrid::new(4, 3);
        let walls = compactor().compact(&grid).unwrap();
        assert_eq!(walls.len(), 4);
        assert!(contains(
            &walls,
            Segment::from_coords(-10.0, -10.0, 130.0, -10.0)
        ));
        assert!(contains(
            &walls,
            Segment::from_coords(130.0, 100.0, -10.0, 100.0)
        ));
    }

    #[test]
    fn test_single_cell_emits_four_unit_edges() {
        let mut grid = OccupancyGrid::new(4, 3);
        grid.set(1, 1, true).unwrap();
        let walls = compactor().compact(&grid).unwrap();
        assert_eq!(walls.len(), 8);
        // West, east, north, south of cell (1, 1).
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 30.0, 60.0)));
        assert!(contains(&walls, Segment::from_coords(60.0, 30.0, 60.0, 60.0)));
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 60.0, 30.0)));
        assert!(contains(&walls, Segment::from_coords(30.0, 60.0, 60.0, 60.0)));
    }

    #[test]
    fn test_horizontal_pair_merges_top_and_bottom() {
        let mut grid = OccupancyGrid::new(4, 3);
        grid.set(1, 1, true).unwrap();
        grid.set(2, 1, true).unwrap();
        let walls = compactor().compact(&grid).unwrap();
        // west + east + merged top + merged bottom + 4 frame segments
        assert_eq!(walls.len(), 8);
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 90.0, 30.0)));
        assert!(contains(&walls, Segment::from_coords(30.0, 60.0, 90.0, 60.0)));
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 30.0, 60.0)));
        assert!(contains(&walls, Segment::from_coords(90.0, 30.0, 90.0, 60.0)));
        // No unit-length leftovers on the shared side.
        assert!(!contains(&walls, Segment::from_coords(30.0, 30.0, 60.0, 30.0)));
        assert!(!contains(&walls, Segment::from_coords(60.0, 30.0, 60.0, 60.0)));
    }

    #[test]
    fn test_vertical_pair_merges_left_and_right() {
        let mut grid = OccupancyGrid::new(4, 3);
        grid.set(1, 0, true).unwrap();
        grid.set(1, 1, true).unwrap();
        let walls = compactor().compact(&grid).unwrap();
        assert_eq!(walls.len(), 8);
        assert!(contains(&walls, Segment::from_coords(30.0, 0.0, 30.0, 60.0)));
        assert!(contains(&walls, Segment::from_coords(60.0, 0.0, 60.0, 60.0)));
    }

    #[test]
    fn test_l_shape_extends_around_corner() {
        let mut grid = OccupancyGrid::new(4, 3);
        grid.set(1, 1, true).unwrap();
        grid.set(2, 1, true).unwrap();
        grid.set(1, 2, true).unwrap();
        let walls = compactor().compact(&grid).unwrap();
        // 6 boundary segments + frame.
        assert_eq!(walls.len(), 10);
        // West edge of the column grows through both rows.
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 30.0, 90.0)));
        // Top edge spans both columns.
        assert!(contains(&walls, Segment::from_coords(30.0, 30.0, 90.0, 30.0)));
    }

    #[test]
    fn test_toggle_round_trip_restores_store() {
        let mut grid = OccupancyGrid::new(4, 3);
        let mut compactor = compactor();
        let before = compactor.compact(&grid).unwrap();
        grid.toggle(2, 1).unwrap();
        grid.toggle(2, 1).unwrap();
        let after = compactor.compact(&grid).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_border_cell_uses_map_edge() {
        let mut grid = OccupancyGrid::new(4, 3);
        grid.set(0, 0, true).unwrap();
        let walls = compactor().compact(&grid).unwrap();
        // Out-of-grid neighbors do not exist, so all four sides emit.
        assert_eq!(walls.len(), 8);
        assert!(contains(&walls, Segment::from_coords(0.0, 0.0, 0.0, 30.0)));
        assert!(contains(&walls, Segment::from_coords(0.0, 0.0, 30.0, 0.0)));
    }
}
