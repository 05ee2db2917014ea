//! Unsharp masking
//!
//! Sharpens by adding back a scaled high-pass signal:
//! `sharp = src + lambda * (src - blur)` where the blur is Gaussian.

use crate::{FilterError, FilterResult, convolve::gaussian_filter};
use pixlab_core::PixelBuffer;

/// Sharpen a buffer by unsharp masking.
///
/// The blur is a Gaussian whose kernel is sized from `sigma` by the
/// three-sigma rule, and the border is replicated to the full blur-kernel
/// radius, so the mask is well defined all the way to the edge of the
/// image. Each output sample is
/// `src + lambda_coeff * (src - blur)`, clamped to `[0, 255]`.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `lambda_coeff` - Strength of the high-pass signal added back; must be
///   >= 0.0. Zero returns the input unchanged.
/// * `sigma` - Standard deviation of the Gaussian blur; must be > 0.0
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `lambda_coeff` is
/// negative, or [`FilterError::InvalidKernel`] if `sigma` is not a
/// positive finite number.
///
/// # Examples
///
/// ```
/// use pixlab_test::fixtures;
/// use pixlab_filter::unsharp_mask;
///
/// let edge = fixtures::step_edge_gray(8, 4, 50, 200);
/// let sharp = unsharp_mask(&edge, 1.5, 1.0).unwrap();
/// assert_eq!(sharp.shape(), edge.shape());
/// ```
pub fn unsharp_mask(
    buffer: &PixelBuffer,
    lambda_coeff: f64,
    sigma: f64,
) -> FilterResult<PixelBuffer> {
    if !lambda_coeff.is_finite() || lambda_coeff < 0.0 {
        return Err(FilterError::InvalidParameters(
            "lambda_coeff must be >= 0.0".into(),
        ));
    }
    if lambda_coeff == 0.0 {
        return Ok(buffer.clone());
    }

    let blurred = gaussian_filter(buffer, sigma)?;
    let mut out = buffer.create_template();
    for ((dst, &src), &blur) in out
        .data_mut()
        .iter_mut()
        .zip(buffer.data())
        .zip(blurred.data())
    {
        let result = (src as f64 + lambda_coeff * (src as f64 - blur as f64) + 0.5) as i32;
        *dst = result.clamp(0, 255) as u8;
    }

    Ok(out.into())
}
