//! Error types for lumen2d.

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors produced at the crate's entry boundaries.
///
/// Degenerate geometry (parallel rays, zero-length segments) and empty
/// inputs are not errors; they classify as misses or empty results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// Grid mutation outside `[0, width) x [0, height)`
    #[error("cell index ({x}, {y}) outside grid {width}x{height}")]
    InvalidIndex {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },

    /// Segment index past the end of a wall store
    #[error("segment index {index} out of range (store holds {len})")]
    SegmentIndex {
        /// Requested segment index
        index: usize,
        /// Current store length
        len: usize,
    },

    /// Non-finite coordinate or malformed flat data, rejected before any
    /// internal state changes
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Non-positive or non-finite configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
