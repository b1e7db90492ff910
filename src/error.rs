//! Error types for land grid generation.

use thiserror::Error;

/// Errors raised while building or encoding a land grid.
#[derive(Error, Debug)]
pub enum LandGridError {
    /// Resolution must be a finite, positive number of degrees no larger than 180.
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(f64),

    /// A geometry record that cannot contribute any cells.
    #[error("malformed shape: {0}")]
    MalformedShape(String),

    /// A geometry record whose kind tag is not one of the supported kinds.
    #[error("unknown geometry kind: {0}")]
    UnknownGeometryKind(String),

    /// Grid dimensions disagree with the dimensions of the data being encoded or decoded.
    #[error("grid dimension mismatch: expected {expected}, got {actual}")]
    ResolutionMismatch { expected: String, actual: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LandGridError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedShape(msg.into())
    }

    /// Mismatch between a `width x height` grid and another `width x height` grid.
    pub fn dimensions(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::ResolutionMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Mismatch between an expected byte length and the length of a stream.
    pub fn byte_length(expected: usize, actual: usize) -> Self {
        Self::ResolutionMismatch {
            expected: format!("{} bytes", expected),
            actual: format!("{} bytes", actual),
        }
    }
}

pub type Result<T> = std::result::Result<T, LandGridError>;
