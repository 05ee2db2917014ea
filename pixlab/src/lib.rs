//! Pixlab - Raster image transform toolkit
//!
//! Pixlab operates on in-memory 8-bit raster images: grayscale or RGB
//! buffers with interleaved samples.
//!
//! # Overview
//!
//! The toolkit covers:
//!
//! - Point transforms (logarithmic, power-law, negative, binary
//!   threshold, brightness band cut)
//! - Spatial filters (box, median, Gaussian, sigma) and unsharp masking
//! - Quality assessment (difference statistics, PSNR, heat maps, batch
//!   comparison)
//! - A transform registry and manager dispatching by name with typed
//!   parameter sets
//!
//! # Example
//!
//! ```
//! use pixlab::{ChannelLayout, PixelBuffer};
//! use pixlab::point::negative;
//!
//! let buffer = PixelBuffer::filled(64, 64, ChannelLayout::Gray, 200).unwrap();
//! let inverted = negative(&buffer);
//! assert_eq!(inverted.get_unchecked(0, 0, 0), 55);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixlab_filter as filter;
pub use pixlab_point as point;
pub use pixlab_quality as quality;
pub use pixlab_registry as registry;
