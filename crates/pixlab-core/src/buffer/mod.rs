//! PixelBuffer - the image container all transforms share
//!
//! A [`PixelBuffer`] is a dense height x width grid of 8-bit samples with
//! either one channel (grayscale) or three interleaved channels (RGB).
//!
//! # Sample layout
//!
//! - Row-major: row `y` starts at `y * width * channels`
//! - Channels interleaved per pixel: `(y * width + x) * channels + c`
//! - Every sample is a `u8`; transforms clamp to 0-255, never wrap
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for efficient cloning (shared, read-only).
//! To modify sample data, convert to [`PixelBufferMut`] via
//! [`PixelBuffer::try_into_mut`] or [`PixelBuffer::to_mut`], then convert
//! back with `Into<PixelBuffer>`. Transforms never mutate their input; they
//! build a fresh [`PixelBufferMut`] and freeze it on return.

mod border;
mod convert;
mod stats;

pub use convert::LUMA_WEIGHTS;
pub use stats::Histogram;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Channel layout of a buffer
///
/// Every buffer is either single-channel grayscale or three-channel RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One sample per pixel (luma)
    Gray,
    /// Three interleaved samples per pixel (red, green, blue)
    Rgb,
}

impl ChannelLayout {
    /// Create a `ChannelLayout` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannelCount`] if `channels` is not 1 or 3.
    pub fn from_channels(channels: u32) -> Result<Self> {
        match channels {
            1 => Ok(ChannelLayout::Gray),
            3 => Ok(ChannelLayout::Rgb),
            _ => Err(Error::InvalidChannelCount(channels)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn channels(self) -> u32 {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
        }
    }
}

/// Internal buffer data
#[derive(Debug)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Channel layout (1 or 3 samples per pixel)
    layout: ChannelLayout,
    /// Interleaved sample data, `height * width * channels` bytes
    data: Vec<u8>,
}

impl BufferData {
    #[inline]
    fn sample_index(&self, x: u32, y: u32, c: u32) -> usize {
        ((y as usize * self.width as usize + x as usize) * self.layout.channels() as usize)
            + c as usize
    }

    fn check_coords(&self, x: u32, y: u32, c: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::CoordOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if c >= self.layout.channels() {
            return Err(Error::ChannelOutOfBounds {
                index: c,
                channels: self.layout.channels(),
            });
        }
        Ok(())
    }
}

/// Immutable pixel buffer
///
/// The fundamental image type of the toolkit. Reference counted via `Arc`,
/// so `clone()` is cheap and the sample data is shared.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
///
/// let buffer: PixelBuffer = PixelBuffer::new(640, 480, ChannelLayout::Gray)
///     .unwrap()
///     .into();
/// assert_eq!(buffer.width(), 640);
/// assert_eq!(buffer.height(), 480);
/// assert_eq!(buffer.channels(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a new zero-filled buffer, returned in its mutable form.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `layout` - Channel layout
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, layout: ChannelLayout) -> Result<PixelBufferMut> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * layout.channels() as usize;
        Ok(PixelBufferMut {
            inner: BufferData {
                width,
                height,
                layout,
                data: vec![0u8; len],
            },
        })
    }

    /// Create a buffer with every sample set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn filled(width: u32, height: u32, layout: ChannelLayout, value: u8) -> Result<Self> {
        let mut out = Self::new(width, height, layout)?;
        out.inner.data.fill(value);
        Ok(out.into())
    }

    /// Create a buffer from raw interleaved sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSizeMismatch`] if `data.len()` does not equal
    /// `width * height * channels`.
    pub fn from_vec(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * layout.channels() as usize;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                layout,
                data,
            }),
        })
    }

    /// Get the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.inner.layout
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.layout.channels()
    }

    /// Get the buffer shape as `(width, height, channels)`.
    #[inline]
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.inner.width, self.inner.height, self.channels())
    }

    /// Get raw access to the interleaved sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this buffer.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get one row of interleaved samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.channels() as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Get a sample value at (x, y, c).
    ///
    /// Returns `None` if the coordinates or channel are out of bounds.
    pub fn get(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        self.inner.check_coords(x, y, c).ok()?;
        Some(self.inner.data[self.inner.sample_index(x, y, c)])
    }

    /// Get a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data slice.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> u8 {
        self.inner.data[self.inner.sample_index(x, y, c)]
    }

    /// Check if two buffers have the same width, height, and layout.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.layout == other.inner.layout
    }

    /// Create a zero-filled mutable buffer with this buffer's shape.
    ///
    /// The usual starting point of a transform: read from `self`, write
    /// into the template, freeze it on return.
    pub fn create_template(&self) -> PixelBufferMut {
        let len = self.inner.data.len();
        PixelBufferMut {
            inner: BufferData {
                width: self.inner.width,
                height: self.inner.height,
                layout: self.inner.layout,
                data: vec![0u8; len],
            },
        }
    }

    /// Create a deep copy of this buffer.
    ///
    /// Unlike `clone()`, which shares data via `Arc`, this copies the
    /// sample data into an independent allocation.
    pub fn deep_clone(&self) -> Self {
        PixelBuffer {
            inner: Arc::new(BufferData {
                width: self.inner.width,
                height: self.inner.height,
                layout: self.inner.layout,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(inner) => Ok(PixelBufferMut { inner }),
            Err(arc) => Err(PixelBuffer { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    ///
    /// Always copies, regardless of the reference count.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: BufferData {
                width: self.inner.width,
                height: self.inner.height,
                layout: self.inner.layout,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

impl Eq for PixelBuffer {}

/// Mutable pixel buffer
///
/// Uniquely owned, writable twin of [`PixelBuffer`]. Convert back with
/// `Into<PixelBuffer>`; exclusive access is enforced at compile time.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Get the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.inner.layout
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.inner.layout.channels()
    }

    /// Get a sample value at (x, y, c).
    pub fn get(&self, x: u32, y: u32, c: u32) -> Option<u8> {
        self.inner.check_coords(x, y, c).ok()?;
        Some(self.inner.data[self.inner.sample_index(x, y, c)])
    }

    /// Get a sample value without bounds checking.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> u8 {
        self.inner.data[self.inner.sample_index(x, y, c)]
    }

    /// Set a sample value at (x, y, c).
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordOutOfBounds`] or [`Error::ChannelOutOfBounds`]
    /// if the position is outside the buffer.
    pub fn set(&mut self, x: u32, y: u32, c: u32, value: u8) -> Result<()> {
        self.inner.check_coords(x, y, c)?;
        let idx = self.inner.sample_index(x, y, c);
        self.inner.data[idx] = value;
        Ok(())
    }

    /// Set a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the data slice.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: u32, value: u8) {
        let idx = self.inner.sample_index(x, y, c);
        self.inner.data[idx] = value;
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }

    /// Get raw access to the interleaved sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable raw access to the interleaved sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get one row of interleaved samples, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.inner.width as usize * self.channels() as usize;
        let start = y as usize * stride;
        &mut self.inner.data[start..start + stride]
    }

    /// Freeze into an immutable [`PixelBuffer`].
    pub fn freeze(self) -> PixelBuffer {
        self.into()
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buffer: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(buffer.inner),
        }
    }
}
