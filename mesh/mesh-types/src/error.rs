//! Error types for structured mesh operations.

use thiserror::Error;

/// Result type for structured mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when building or indexing a structured mesh.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A grid dimension is zero.
    #[error("grid dimensions must be non-zero, got {num_points1}x{num_points2}")]
    InvalidDimensions {
        /// Number of points along the first direction.
        num_points1: usize,
        /// Number of points along the second direction.
        num_points2: usize,
    },

    /// A grid index is outside the valid range.
    #[error("{what} index ({i}, {j}) out of bounds for {rows}x{cols}")]
    OutOfBounds {
        /// Which kind of element was requested (node or quad).
        what: &'static str,
        /// First index.
        i: usize,
        /// Second index.
        j: usize,
        /// Valid extent in the first direction.
        rows: usize,
        /// Valid extent in the second direction.
        cols: usize,
    },

    /// An attribute array does not match the grid dimensions.
    #[error("{attribute} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the attribute.
        attribute: &'static str,
        /// Required length.
        expected: usize,
        /// Provided length.
        actual: usize,
    },
}
