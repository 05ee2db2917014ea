//! Tone mapping transforms
//!
//! Logarithmic and power-law (gamma) mappings plus the photographic
//! negative. All three remap each sample independently through a
//! 256-entry lookup table, so output shape and layout always match the
//! input.

use crate::{PointError, PointResult};
use pixlab_core::PixelBuffer;

/// Remap every sample through a 256-entry lookup table.
fn apply_lut(buffer: &PixelBuffer, lut: &[u8; 256]) -> PixelBuffer {
    let mut out = buffer.create_template();
    for (dst, &src) in out.data_mut().iter_mut().zip(buffer.data()) {
        *dst = lut[src as usize];
    }
    out.into()
}

/// Apply a logarithmic tone mapping: `s = c * ln(1 + r)`.
///
/// Samples are normalized to `[0, 1]` before the mapping and the result is
/// scaled back to `[0, 255]`. When `c` is `None` it is chosen as
/// `1 / ln(1 + max)` over the normalized samples, so the brightest input
/// sample maps exactly to 255. An all-zero buffer falls back to `c = 1.0`.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `c` - Scaling coefficient; must be > 0.0 when supplied
///
/// # Errors
///
/// Returns [`PointError::InvalidParameters`] if `c` is supplied and is not
/// a positive finite number.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_point::log_transform;
///
/// let buffer = PixelBuffer::filled(4, 4, ChannelLayout::Gray, 200).unwrap();
/// let result = log_transform(&buffer, None).unwrap();
/// assert_eq!(result.max_sample(), 255);
/// ```
pub fn log_transform(buffer: &PixelBuffer, c: Option<f64>) -> PointResult<PixelBuffer> {
    if let Some(c) = c
        && (!c.is_finite() || c <= 0.0)
    {
        return Err(PointError::InvalidParameters("c must be > 0.0".into()));
    }

    let c = c.unwrap_or_else(|| {
        let max = buffer.max_sample() as f64 / 255.0;
        if max > 0.0 { 1.0 / (1.0 + max).ln() } else { 1.0 }
    });

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let r = i as f64 / 255.0;
        let s = 255.0 * c * (1.0 + r).ln();
        *entry = s.round().clamp(0.0, 255.0) as u8;
    }

    Ok(apply_lut(buffer, &lut))
}

/// Apply a power-law (gamma) tone mapping: `s = c * r^gamma`.
///
/// Samples are normalized to `[0, 1]` before the mapping and the result is
/// scaled back to `[0, 255]`. When `c` is `None` it is chosen as
/// `1 / max^gamma` over the normalized samples, so the brightest input
/// sample maps exactly to 255. An all-zero buffer falls back to `c = 1.0`.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `gamma` - Exponent; must be > 0.0. Values < 1.0 lighten midtones,
///   values > 1.0 darken them.
/// * `c` - Scaling coefficient; must be > 0.0 when supplied
///
/// # Errors
///
/// Returns [`PointError::InvalidParameters`] if `gamma` or a supplied `c`
/// is not a positive finite number.
pub fn power_transform(
    buffer: &PixelBuffer,
    gamma: f64,
    c: Option<f64>,
) -> PointResult<PixelBuffer> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(PointError::InvalidParameters("gamma must be > 0.0".into()));
    }
    if let Some(c) = c
        && (!c.is_finite() || c <= 0.0)
    {
        return Err(PointError::InvalidParameters("c must be > 0.0".into()));
    }

    let c = c.unwrap_or_else(|| {
        let max = buffer.max_sample() as f64 / 255.0;
        if max > 0.0 { 1.0 / max.powf(gamma) } else { 1.0 }
    });

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let r = i as f64 / 255.0;
        let s = 255.0 * c * r.powf(gamma);
        *entry = s.round().clamp(0.0, 255.0) as u8;
    }

    Ok(apply_lut(buffer, &lut))
}

/// Invert an image: `s = 255 - r` for every sample.
///
/// Takes no parameters and cannot fail; applying it twice restores the
/// original buffer.
pub fn negative(buffer: &PixelBuffer) -> PixelBuffer {
    let mut out = buffer.create_template();
    for (dst, &src) in out.data_mut().iter_mut().zip(buffer.data()) {
        *dst = 255 - src;
    }
    out.into()
}
