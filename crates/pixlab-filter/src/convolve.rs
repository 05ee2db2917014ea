//! Convolution and the convolution-based smoothing filters
//!
//! The border policy is edge replication: the input is padded by the
//! kernel radius with copies of the nearest edge pixel, convolved over the
//! original extent, and the result keeps the input's exact shape. Channels
//! are filtered independently.

use crate::{FilterError, FilterResult, Kernel};
use pixlab_core::PixelBuffer;

/// Convolve a buffer with an arbitrary kernel.
///
/// Kernel weights are applied directly (no flipping). Each output sample
/// is the weighted sum over the window anchored at the kernel center,
/// rounded and clamped to `[0, 255]`. Pixels past the border read as the
/// nearest edge pixel.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_filter::{Kernel, convolve};
///
/// let buffer = PixelBuffer::filled(4, 4, ChannelLayout::Gray, 80).unwrap();
/// let identity = Kernel::from_slice(3, 3, &[
///     0.0, 0.0, 0.0,
///     0.0, 1.0, 0.0,
///     0.0, 0.0, 0.0,
/// ]).unwrap();
/// assert_eq!(convolve(&buffer, &identity), buffer);
/// ```
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (kw, kh) = (kernel.width(), kernel.height());
    let (cx, cy) = (kernel.center_x(), kernel.center_y());
    let radius = cx.max(kw - 1 - cx).max(cy).max(kh - 1 - cy);

    let padded = buffer.pad_replicate(radius);
    let mut out = buffer.create_template();
    let channels = buffer.channels();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            for c in 0..channels {
                let mut sum = 0.0_f64;
                for ky in 0..kh {
                    for kx in 0..kw {
                        let px = x + radius + kx - cx;
                        let py = y + radius + ky - cy;
                        sum += padded.get_unchecked(px, py, c) as f64
                            * kernel.get_unchecked(kx, ky);
                    }
                }
                out.set_unchecked(x, y, c, sum.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    out.into()
}

/// Smooth a buffer with a uniform box kernel.
///
/// Every output sample is the mean of the `kernel_size` x `kernel_size`
/// window around it. A size of 1 leaves the buffer unchanged.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `kernel_size` - Window side length; must be 1, 3, or 5
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for any other size.
pub fn box_filter(buffer: &PixelBuffer, kernel_size: u32) -> FilterResult<PixelBuffer> {
    if ![1, 3, 5].contains(&kernel_size) {
        return Err(FilterError::InvalidParameters(
            "kernel_size must be 1, 3, or 5".into(),
        ));
    }
    let kernel = Kernel::uniform(kernel_size)?;
    Ok(convolve(buffer, &kernel))
}

/// Smooth a buffer with a Gaussian kernel derived from `sigma`.
///
/// The kernel side length follows the three-sigma rule,
/// `2 * ceil(3 * sigma) + 1`; see [`Kernel::gaussian`].
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `sigma` is not a positive
/// finite number.
pub fn gaussian_filter(buffer: &PixelBuffer, sigma: f64) -> FilterResult<PixelBuffer> {
    let kernel = Kernel::gaussian(sigma)?;
    Ok(convolve(buffer, &kernel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::ChannelLayout;

    fn ramp_gray(width: u32, height: u32) -> PixelBuffer {
        let mut out = PixelBuffer::new(width, height, ChannelLayout::Gray).unwrap();
        for y in 0..height {
            for x in 0..width {
                out.set_unchecked(x, y, 0, (x * 10 + y) as u8);
            }
        }
        out.into()
    }

    // ========== convolve tests ==========

    #[test]
    fn test_convolve_identity_kernel() {
        let buffer = ramp_gray(6, 4);
        let mut kernel = Kernel::new(3, 3).unwrap();
        kernel.set(1, 1, 1.0);
        assert_eq!(convolve(&buffer, &kernel), buffer);
    }

    #[test]
    fn test_convolve_shift_kernel() {
        // A kernel reading one pixel to the left shifts the image right.
        let buffer = ramp_gray(5, 1);
        let kernel = Kernel::from_slice(3, 1, &[1.0, 0.0, 0.0]).unwrap();
        let result = convolve(&buffer, &kernel);
        assert_eq!(result.data(), &[0, 0, 10, 20, 30]);
    }

    #[test]
    fn test_convolve_result_clamped() {
        let buffer = PixelBuffer::filled(3, 3, ChannelLayout::Gray, 200).unwrap();
        let kernel = Kernel::from_slice(1, 1, &[2.0]).unwrap();
        let result = convolve(&buffer, &kernel);
        assert!(result.data().iter().all(|&v| v == 255));

        let kernel = Kernel::from_slice(1, 1, &[-1.0]).unwrap();
        let result = convolve(&buffer, &kernel);
        assert!(result.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_convolve_rgb_channels_independent() {
        let mut buffer = PixelBuffer::new(3, 1, ChannelLayout::Rgb).unwrap();
        for x in 0..3 {
            buffer.set_unchecked(x, 0, 0, 90);
            buffer.set_unchecked(x, 0, 1, 30);
            buffer.set_unchecked(x, 0, 2, 210);
        }
        let result = box_filter(&buffer.freeze(), 3).unwrap();
        assert_eq!(result.get_unchecked(1, 0, 0), 90);
        assert_eq!(result.get_unchecked(1, 0, 1), 30);
        assert_eq!(result.get_unchecked(1, 0, 2), 210);
    }

    // ========== box_filter tests ==========

    #[test]
    fn test_box_filter_size_one_is_identity() {
        let buffer = ramp_gray(7, 3);
        let result = box_filter(&buffer, 1).unwrap();
        assert_eq!(result, buffer);
    }

    #[test]
    fn test_box_filter_averages_window() {
        // Single bright pixel in a black 3x3 spreads to 255/9 everywhere.
        let mut buffer = PixelBuffer::new(3, 3, ChannelLayout::Gray).unwrap();
        buffer.set_unchecked(1, 1, 0, 255);
        let result = box_filter(&buffer.freeze(), 3).unwrap();
        // Center window holds the bright pixel once: 255/9 = 28.3.
        assert_eq!(result.get_unchecked(1, 1, 0), 28);
    }

    #[test]
    fn test_box_filter_flat_is_unchanged() {
        let buffer = PixelBuffer::filled(8, 8, ChannelLayout::Gray, 131).unwrap();
        for size in [1, 3, 5] {
            let result = box_filter(&buffer, size).unwrap();
            assert_eq!(result, buffer, "size {size}");
        }
    }

    #[test]
    fn test_box_filter_invalid_size() {
        let buffer = ramp_gray(4, 4);
        assert!(box_filter(&buffer, 0).is_err());
        assert!(box_filter(&buffer, 2).is_err());
        assert!(box_filter(&buffer, 7).is_err());
    }

    // ========== gaussian_filter tests ==========

    #[test]
    fn test_gaussian_filter_preserves_flat() {
        let buffer = PixelBuffer::filled(9, 9, ChannelLayout::Gray, 77).unwrap();
        let result = gaussian_filter(&buffer, 1.0).unwrap();
        assert_eq!(result, buffer);
    }

    #[test]
    fn test_gaussian_filter_reduces_contrast() {
        let mut buffer = PixelBuffer::new(9, 9, ChannelLayout::Gray).unwrap();
        buffer.set_unchecked(4, 4, 0, 255);
        let result = gaussian_filter(&buffer.freeze(), 1.0).unwrap();
        let peak = result.get_unchecked(4, 4, 0);
        assert!(peak > 0 && peak < 255, "peak {peak}");
    }

    #[test]
    fn test_gaussian_filter_kernel_larger_than_image() {
        // sigma 2.0 yields a 13x13 kernel over a 4x4 buffer; edge
        // replication must still produce a full-size result.
        let buffer = ramp_gray(4, 4);
        let result = gaussian_filter(&buffer, 2.0).unwrap();
        assert_eq!(result.shape(), buffer.shape());
    }

    #[test]
    fn test_gaussian_filter_invalid_sigma() {
        let buffer = ramp_gray(4, 4);
        assert!(gaussian_filter(&buffer, 0.0).is_err());
        assert!(gaussian_filter(&buffer, -2.0).is_err());
    }
}
