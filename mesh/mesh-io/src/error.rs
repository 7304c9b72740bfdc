//! Error types for mesh I/O operations.

use std::path::PathBuf;

use mesh_types::MeshError;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Unexpected end of file.
    #[error("unexpected end of file at position {position}")]
    UnexpectedEof {
        /// Position in the file where EOF was encountered.
        position: u64,
    },

    /// The mesh has no cells, so there is nothing to triangulate.
    #[error("mesh {rows}x{cols} has no faces to export")]
    NoFaces {
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },

    /// Too many vertices for 16-bit indices.
    #[error("{vertices} vertices exceed the {max} addressable by 16-bit indices")]
    IndexOverflow {
        /// Vertex count of the mesh.
        vertices: usize,
        /// Largest supported vertex count.
        max: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the underlying grid container.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Map a failed open to `FileNotFound` when the path does not exist.
    pub(crate) fn from_open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
