//! Channel conversion
//!
//! RGB to luma reduction used by the thresholding transforms. The weights
//! are the ITU-R BT.601 luma coefficients.

use super::{ChannelLayout, PixelBuffer};

/// BT.601 luma weights for red, green, and blue.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

impl PixelBuffer {
    /// Reduce an RGB buffer to single-channel luma.
    ///
    /// Each pixel becomes `0.2989*R + 0.5870*G + 0.1140*B`, rounded. A
    /// buffer that is already grayscale is returned as a shared handle
    /// without copying.
    pub fn to_luma(&self) -> PixelBuffer {
        if self.layout() == ChannelLayout::Gray {
            return self.clone();
        }

        let w = self.width();
        let h = self.height();
        let mut out = self.create_template_gray();

        for y in 0..h {
            for x in 0..w {
                let r = self.get_unchecked(x, y, 0) as f64;
                let g = self.get_unchecked(x, y, 1) as f64;
                let b = self.get_unchecked(x, y, 2) as f64;
                let luma = LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b;
                out.set_unchecked(x, y, 0, luma.round().clamp(0.0, 255.0) as u8);
            }
        }

        out.into()
    }

    /// Create a zero-filled grayscale mutable buffer with this buffer's
    /// width and height.
    pub(crate) fn create_template_gray(&self) -> super::PixelBufferMut {
        super::PixelBufferMut {
            inner: super::BufferData {
                width: self.width(),
                height: self.height(),
                layout: ChannelLayout::Gray,
                data: vec![0u8; self.width() as usize * self.height() as usize],
            },
        }
    }
}
