//! Sigma filtering
//!
//! Lee's sigma filter: averages only the window samples that lie within a
//! deviation band around the local mean, so genuine edges survive while
//! near-uniform noise is flattened.

use crate::{FilterError, FilterResult};
use pixlab_core::PixelBuffer;

/// Smooth a buffer with a sigma filter.
///
/// For each window the local mean and standard deviation are computed,
/// and samples deviating from the mean by more than
/// `sigma * std_dev` are discarded. The output is the mean of the
/// surviving samples; if every sample is discarded the plain window mean
/// is used. Channels are filtered independently, borders replicate.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `sigma` - Width of the deviation band in local standard deviations;
///   must be > 0.0
/// * `kernel_size` - Window side length; must be odd and positive
///   (typically 5)
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `sigma` is not a
/// positive finite number or `kernel_size` is even or zero.
pub fn sigma_filter(
    buffer: &PixelBuffer,
    sigma: f64,
    kernel_size: u32,
) -> FilterResult<PixelBuffer> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidParameters("sigma must be > 0.0".into()));
    }
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(FilterError::InvalidParameters(
            "kernel_size must be odd and positive".into(),
        ));
    }

    let radius = kernel_size / 2;
    let padded = buffer.pad_replicate(radius);
    let mut out = buffer.create_template();
    let channels = buffer.channels();
    let window_len = (kernel_size * kernel_size) as f64;

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            for c in 0..channels {
                let mut sum = 0.0_f64;
                let mut sum_sq = 0.0_f64;
                for ky in 0..kernel_size {
                    for kx in 0..kernel_size {
                        let v = padded.get_unchecked(x + kx, y + ky, c) as f64;
                        sum += v;
                        sum_sq += v * v;
                    }
                }
                let mean = sum / window_len;
                let std_dev = (sum_sq / window_len - mean * mean).max(0.0).sqrt();
                let threshold = sigma * std_dev;

                let mut kept_sum = 0.0_f64;
                let mut kept_count = 0u32;
                for ky in 0..kernel_size {
                    for kx in 0..kernel_size {
                        let v = padded.get_unchecked(x + kx, y + ky, c) as f64;
                        if (v - mean).abs() <= threshold {
                            kept_sum += v;
                            kept_count += 1;
                        }
                    }
                }

                let value = if kept_count > 0 {
                    kept_sum / kept_count as f64
                } else {
                    mean
                };
                out.set_unchecked(x, y, c, value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::ChannelLayout;

    #[test]
    fn test_sigma_flat_is_unchanged() {
        let buffer = PixelBuffer::filled(6, 6, ChannelLayout::Gray, 99).unwrap();
        let result = sigma_filter(&buffer, 1.0, 5).unwrap();
        assert_eq!(result, buffer);
    }

    #[test]
    fn test_sigma_size_one_is_identity() {
        let mut buffer = PixelBuffer::new(4, 4, ChannelLayout::Gray).unwrap();
        for (i, sample) in buffer.data_mut().iter_mut().enumerate() {
            *sample = (i * 13) as u8;
        }
        let buffer = buffer.freeze();
        let result = sigma_filter(&buffer, 2.0, 1).unwrap();
        assert_eq!(result, buffer);
    }

    #[test]
    fn test_sigma_rejects_outlier_from_average() {
        // One hot pixel in a flat 5x5 field. Within the center window the
        // outlier deviates far beyond one standard deviation, so it is
        // excluded and the output returns to the field value.
        let mut buffer = PixelBuffer::filled(5, 5, ChannelLayout::Gray, 50).unwrap().to_mut();
        buffer.set_unchecked(2, 2, 0, 250);
        let result = sigma_filter(&buffer.freeze(), 1.0, 5).unwrap();
        assert_eq!(result.get_unchecked(2, 2, 0), 50);
    }

    #[test]
    fn test_sigma_preserves_step_edge() {
        // A balanced two-level window keeps both populations inside the
        // band only when sigma is wide; with a narrow band each side
        // averages its own level and the edge stays sharp.
        let mut buffer = PixelBuffer::new(8, 4, ChannelLayout::Gray).unwrap();
        for y in 0..4 {
            for x in 0..8 {
                buffer.set_unchecked(x, y, 0, if x < 4 { 40 } else { 200 });
            }
        }
        let buffer = buffer.freeze();
        let result = sigma_filter(&buffer, 0.9, 3).unwrap();
        assert_eq!(result.get_unchecked(0, 0, 0), 40);
        assert_eq!(result.get_unchecked(7, 0, 0), 200);
        // Pixels bordering the step stay on their own side of it.
        assert!(result.get_unchecked(3, 1, 0) < 120);
        assert!(result.get_unchecked(4, 1, 0) > 120);
    }

    #[test]
    fn test_sigma_invalid_parameters() {
        let buffer = PixelBuffer::filled(4, 4, ChannelLayout::Gray, 1).unwrap();
        assert!(sigma_filter(&buffer, 0.0, 5).is_err());
        assert!(sigma_filter(&buffer, -1.0, 5).is_err());
        assert!(sigma_filter(&buffer, f64::NAN, 5).is_err());
        assert!(sigma_filter(&buffer, 1.0, 0).is_err());
        assert!(sigma_filter(&buffer, 1.0, 4).is_err());
    }
}
