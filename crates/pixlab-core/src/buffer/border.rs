//! Border extension for window operations
//!
//! Spatial filters read a k x k window around every pixel, so pixels near
//! the edge need values outside the buffer. Edge replication repeats the
//! outermost row/column outward, which keeps the output the same size as
//! the input without introducing artificial dark borders.

use super::{BufferData, PixelBuffer};
use std::sync::Arc;

impl PixelBuffer {
    /// Extend the buffer by `radius` pixels on every side, replicating edges.
    ///
    /// The result is `(width + 2*radius) x (height + 2*radius)`; every
    /// sample outside the original area takes the value of the nearest
    /// original sample. A radius of 0 returns a shared handle to `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixlab_core::{ChannelLayout, PixelBuffer};
    ///
    /// let buffer = PixelBuffer::from_vec(2, 2, ChannelLayout::Gray, vec![1, 2, 3, 4]).unwrap();
    /// let padded = buffer.pad_replicate(1);
    /// assert_eq!(padded.shape(), (4, 4, 1));
    /// assert_eq!(padded.get_unchecked(0, 0, 0), 1); // corner repeats
    /// assert_eq!(padded.get_unchecked(3, 3, 0), 4);
    /// ```
    pub fn pad_replicate(&self, radius: u32) -> PixelBuffer {
        if radius == 0 {
            return self.clone();
        }

        let w = self.width();
        let h = self.height();
        let channels = self.channels();
        let new_w = w + 2 * radius;
        let new_h = h + 2 * radius;

        let mut data = Vec::with_capacity(new_w as usize * new_h as usize * channels as usize);
        for out_y in 0..new_h {
            let src_y = (out_y as i64 - radius as i64).clamp(0, h as i64 - 1) as u32;
            for out_x in 0..new_w {
                let src_x = (out_x as i64 - radius as i64).clamp(0, w as i64 - 1) as u32;
                for c in 0..channels {
                    data.push(self.get_unchecked(src_x, src_y, c));
                }
            }
        }

        PixelBuffer {
            inner: Arc::new(BufferData {
                width: new_w,
                height: new_h,
                layout: self.layout(),
                data,
            }),
        }
    }
}
