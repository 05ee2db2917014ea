//! pixlab-point - Per-pixel transforms
//!
//! This crate provides transforms that map each pixel independently of its
//! neighbors:
//!
//! - Logarithmic and power-law (gamma) tone mapping
//! - Photographic negative
//! - Threshold binarization
//! - Brightness band cut (keep a luminance range, suppress the rest)

mod error;
pub mod threshold;
pub mod tone;

pub use error::{PointError, PointResult};

// Re-export commonly used functions
pub use threshold::{OutsideMode, binarize, brightness_range_cut};
pub use tone::{log_transform, negative, power_transform};
