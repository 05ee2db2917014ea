//! pixlab-filter - Spatial filtering operations
//!
//! This crate provides neighborhood filters over pixel buffers:
//!
//! - Convolution with arbitrary kernels
//! - Box and Gaussian smoothing
//! - Median filtering (impulse noise removal)
//! - Sigma filtering (edge-preserving smoothing)
//! - Unsharp masking (sharpening)
//!
//! All filters use edge replication at the borders and return a buffer
//! with the same shape and layout as the input.

pub mod convolve;
mod error;
pub mod kernel;
pub mod median;
pub mod sharpen;
pub mod sigma;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{box_filter, convolve, gaussian_filter};
pub use median::median_filter;
pub use sharpen::unsharp_mask;
pub use sigma::sigma_filter;
