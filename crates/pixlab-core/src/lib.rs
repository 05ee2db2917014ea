//! pixlab-core - Pixel buffers for the pixlab transform toolkit
//!
//! This crate provides the data model every pixlab transform reads and
//! writes: the immutable [`PixelBuffer`] / writable [`PixelBufferMut`]
//! pair, edge-replication padding for window operations, luma conversion,
//! and the sample statistics that drive auto-derived transform parameters.
//!
//! # Example
//!
//! ```
//! use pixlab_core::{ChannelLayout, PixelBuffer};
//!
//! let mut buffer = PixelBuffer::new(4, 4, ChannelLayout::Gray).unwrap();
//! buffer.set(0, 0, 0, 200).unwrap();
//! let frozen: PixelBuffer = buffer.into();
//! assert_eq!(frozen.max_sample(), 200);
//! ```

pub mod buffer;
pub mod error;

pub use buffer::{ChannelLayout, Histogram, LUMA_WEIGHTS, PixelBuffer, PixelBufferMut};
pub use error::{Error, Result};
