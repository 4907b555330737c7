//! Error types for NOCS generation and scene I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate.
pub type NocsResult<T> = Result<T, NocsError>;

/// Errors that can occur while loading, processing or saving a scene.
///
/// Operator outcomes such as "no mesh selected" are not errors; they are
/// reported through [`crate::nocs::operator::OperatorReport`].
#[derive(Debug, Error)]
pub enum NocsError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Input file extension is not one we can load.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// OBJ parsing failed.
    #[error("failed to load OBJ: {0}")]
    ObjLoad(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Scene document could not be (de)serialized.
    #[error("invalid scene document: {0}")]
    Document(String),

    /// PLY export failed.
    #[error("failed to write PLY: {0}")]
    Ply(String),

    /// Mesh topology references data that does not exist.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Shader-node link refers to a socket the node does not have.
    #[error("invalid node link: {0}")]
    InvalidLink(String),

    /// No object with the requested name.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Operator finished with a cancelled status.
    #[error("operation cancelled: {0}")]
    Cancelled(String),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NocsError {
    /// Create an invalid mesh error.
    #[must_use]
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }

    /// Create an invalid link error.
    #[must_use]
    pub fn invalid_link(details: impl Into<String>) -> Self {
        Self::InvalidLink(details.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }
}
