//! Error types for pixlab-registry

use thiserror::Error;

/// Errors that can occur in the registry and its transforms
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// Point transform error
    #[error("point transform error: {0}")]
    Point(#[from] pixlab_point::PointError),

    /// Spatial filter error
    #[error("filter error: {0}")]
    Filter(#[from] pixlab_filter::FilterError),

    /// No transform registered under the requested name
    #[error("transform '{0}' is not registered")]
    NotFound(String),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
