//! Error types for pixlab-point

use thiserror::Error;

/// Errors that can occur during point transforms
#[derive(Debug, Error)]
pub enum PointError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for point transforms
pub type PointResult<T> = Result<T, PointError>;
