//! Error types for path expressions
//!
//! Syntax errors carry the byte position of the offending segment so the
//! caller can point at it; conflicts name the segment where fabrication
//! ran into existing data.

use thiserror::Error;

/// Path parsing and resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Expression does not follow the segment grammar
    #[error("Syntax error at position {position}: {message} in '{input}'")]
    Syntax {
        message: String,
        position: usize,
        input: String,
    },

    /// A write path runs into a value that cannot hold the next key
    #[error("Path conflict in '{path}' at segment '{segment}': found {found}, expected a container")]
    Conflict {
        path: String,
        segment: String,
        found: &'static str,
    },

    /// A write would pad an array past [`MAX_ARRAY_PADDING`] new elements
    #[error("Index {index} in '{path}' at segment '{segment}' is too far past the end of an array of length {len}")]
    IndexOutOfRange {
        path: String,
        segment: String,
        index: usize,
        len: usize,
    },
}

/// Most `null` elements a single write may add to pad an array
pub const MAX_ARRAY_PADDING: usize = 10_000;

impl PathError {
    /// Create a syntax error with position information
    pub fn syntax(message: impl Into<String>, position: usize, input: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
            input: input.into(),
        }
    }

    /// Create a conflict error for the given segment
    pub fn conflict(path: impl Into<String>, segment: impl Into<String>, found: &'static str) -> Self {
        Self::Conflict {
            path: path.into(),
            segment: segment.into(),
            found,
        }
    }

    /// Create an out-of-range error for an index written past the padding limit
    pub fn index_out_of_range(path: impl Into<String>, segment: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            path: path.into(),
            segment: segment.into(),
            index,
            len,
        }
    }

    /// Byte offset of a syntax error, if this is one
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            Self::Conflict { .. } | Self::IndexOutOfRange { .. } => None,
        }
    }
}

/// Human-readable kind of a JSON value, used in error messages
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
