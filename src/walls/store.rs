//! WallStore: ordered, index-stable segment storage.
//!
//! All wall data enters the engine through this type, so coordinate
//! validation happens here: every append path rejects non-finite values
//! before any internal state changes.

use crate::core::Point2D;
use crate::error::{MapError, Result};

use super::Segment;

/// Ordered collection of wall segments.
///
/// Segment order is not semantically meaningful for visibility queries,
/// but it is stable: grid compaction records indices of recently appended
/// segments and grows their far endpoints in place while merging.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WallStore {
    segments: Vec<Segment>,
}

impl WallStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All segments, in append order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment at `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Append one segment.
    ///
    /// Rejects non-finite coordinates with [`MapError::InvalidGeometry`].
    pub fn push(&mut self, segment: Segment) -> Result<()> {
        if !segment.is_finite() {
            return Err(MapError::InvalidGeometry(format!(
                "non-finite segment ({:?} -> {:?})",
                segment.start, segment.end
            )));
        }
        self.segments.push(segment);
        Ok(())
    }

    /// Append many segments from interleaved scalars
    /// `[x1, y1, x2, y2, ...]`.
    ///
    /// The slice length must be a multiple of 4. Validation runs over the
    /// whole slice before anything is appended, so a rejected call leaves
    /// the store untouched.
    pub fn extend_flat(&mut self, data: &[f64]) -> Result<()> {
        if data.len() % 4 != 0 {
            return Err(MapError::InvalidGeometry(format!(
                "flat segment data length {} is not a multiple of 4",
                data.len()
            )));
        }
        if let Some(bad) = data.iter().position(|v| !v.is_finite()) {
            return Err(MapError::InvalidGeometry(format!(
                "non-finite coordinate at flat index {}",
                bad
            )));
        }
        self.segments.reserve(data.len() / 4);
        for chunk in data.chunks_exact(4) {
            self.segments
                .push(Segment::from_coords(chunk[0], chunk[1], chunk[2], chunk[3]));
        }
        Ok(())
    }

    /// Export all segments as interleaved scalars `[x1, y1, x2, y2, ...]`.
    pub fn to_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.segments.len() * 4);
        for seg in &self.segments {
            flat.push(seg.start.x);
            flat.push(seg.start.y);
            flat.push(seg.end.x);
            flat.push(seg.end.y);
        }
        flat
    }

    /// Grow the far endpoint of the segment at `index` by `delta`.
    ///
    /// Only the end point moves; the start point is fixed. This is how
    /// grid compaction extends an open boundary segment across adjacent
    /// cells instead of appending unit pieces.
    pub fn extend_end(&mut self, index: usize, delta: Point2D) -> Result<()> {
        let len = self.segments.len();
        let seg = self
            .segments
            .get_mut(index)
            .ok_or(MapError::SegmentIndex { index, len })?;
        seg.end = seg.end + delta;
        Ok(())
    }
}
