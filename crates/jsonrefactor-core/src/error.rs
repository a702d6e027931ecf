//! Error types for the jsonrefactor core library
//!
//! Path syntax and fabrication problems are reported by [`PathError`] and
//! wrapped here; everything the mapper itself can reject lives in [`Error`].
//! Absent source values are never errors, they are absorbed by the
//! `set_undefined` policy.

use crate::path::PathError;
use thiserror::Error;

/// Main error type for refactor operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed path expression or a write path that collides with existing data
    #[error(transparent)]
    Path(#[from] PathError),

    /// Source path could not be addressed while `strict_paths` is enabled
    #[error("Source path '{path}' does not resolve to a location in the source")]
    UnresolvedSource { path: String },

    /// Iteration entry whose source value is not a sequence
    #[error("Source path '{path}' is marked for iteration but holds {found}")]
    NotIterable { path: String, found: &'static str },

    /// Iteration marker and descriptor kind disagree
    #[error("Descriptor mismatch for '{path}': {message}")]
    DescriptorMismatch { path: String, message: String },

    /// Mapping document could not be turned into a specification
    #[error("Invalid mapping document: {message}")]
    Document { message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a document error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    /// Create a descriptor mismatch error
    pub fn descriptor_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DescriptorMismatch {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
