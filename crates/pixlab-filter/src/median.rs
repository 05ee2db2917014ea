//! Median filtering
//!
//! Rank-based smoothing that removes impulse noise while keeping edges.
//! Uses the same edge-replication border policy as the convolution
//! filters.

use crate::{FilterError, FilterResult};
use pixlab_core::PixelBuffer;

/// Replace each sample with the median of its window.
///
/// The window is `kernel_size` x `kernel_size` and always holds an odd
/// number of samples, so the median is an exact input value. A size of 1
/// leaves the buffer unchanged. Channels are filtered independently.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `kernel_size` - Window side length; must be 1, 3, or 5
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for any other size.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_filter::median_filter;
///
/// let mut noisy = PixelBuffer::filled(3, 3, ChannelLayout::Gray, 10).unwrap().to_mut();
/// noisy.set_unchecked(1, 1, 0, 200);
/// let result = median_filter(&noisy.freeze(), 3).unwrap();
/// assert_eq!(result.get_unchecked(1, 1, 0), 10);
/// ```
pub fn median_filter(buffer: &PixelBuffer, kernel_size: u32) -> FilterResult<PixelBuffer> {
    if ![1, 3, 5].contains(&kernel_size) {
        return Err(FilterError::InvalidParameters(
            "kernel_size must be 1, 3, or 5".into(),
        ));
    }

    let radius = kernel_size / 2;
    let padded = buffer.pad_replicate(radius);
    let mut out = buffer.create_template();
    let channels = buffer.channels();
    let mut window = Vec::with_capacity((kernel_size * kernel_size) as usize);

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            for c in 0..channels {
                window.clear();
                for ky in 0..kernel_size {
                    for kx in 0..kernel_size {
                        window.push(padded.get_unchecked(x + kx, y + ky, c));
                    }
                }
                window.sort_unstable();
                out.set_unchecked(x, y, c, window[window.len() / 2]);
            }
        }
    }

    Ok(out.into())
}
