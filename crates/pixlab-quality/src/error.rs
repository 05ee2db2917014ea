//! Error types for pixlab-quality

use thiserror::Error;

/// Errors that can occur during quality assessment
#[derive(Debug, Error)]
pub enum QualityError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// The two buffers differ in width, height, or channel count
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape of the reference buffer as (width, height, channels)
        expected: (u32, u32, u32),
        /// Shape of the offending buffer as (width, height, channels)
        actual: (u32, u32, u32),
    },

    /// No comparison data is available
    #[error("no comparison data")]
    NoData,
}

/// Result type for quality assessment operations
pub type QualityResult<T> = Result<T, QualityError>;
