//! Error types for pixlab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Pixlab core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid buffer dimensions
    #[error("invalid buffer dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid channel count
    #[error("invalid channel count: {0} (expected 1 or 3)")]
    InvalidChannelCount(u32),

    /// Raw data length does not match the declared shape
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Coordinates outside the buffer
    #[error("coordinates out of bounds: ({x}, {y}) in {width}x{height}")]
    CoordOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Channel index outside the buffer's layout
    #[error("channel index out of bounds: {index} >= {channels}")]
    ChannelOutOfBounds { index: u32, channels: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A required parameter is present but not of the expected type
    #[error("parameter '{name}' has the wrong type: expected {expected}")]
    WrongParameterType {
        name: String,
        expected: &'static str,
    },
}

/// Result type alias for pixlab core operations
pub type Result<T> = std::result::Result<T, Error>;
