//! Threshold and brightness-band transforms
//!
//! Both transforms operate on luminance. RGB input is converted with the
//! standard weights first, and the single-channel result is broadcast back
//! to all three channels so output shape always matches input shape.

use crate::{PointError, PointResult};
use pixlab_core::PixelBuffer;

/// How pixels outside the kept brightness band are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutsideMode {
    /// Replace out-of-band pixels with a fixed value.
    Constant(u8),
    /// Leave out-of-band pixels at their luminance value.
    Original,
}

/// Binarize an image against a luminance threshold.
///
/// Pixels with luminance `>= threshold` become 255, all others become 0.
/// When `threshold` is `None` the mean luminance of the input is used.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `threshold` - Cut point in `[0.0, 255.0]`, or `None` for the mean
///
/// # Errors
///
/// Returns [`PointError::InvalidParameters`] if `threshold` is supplied
/// and lies outside `[0.0, 255.0]`.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_point::binarize;
///
/// let buffer = PixelBuffer::filled(4, 4, ChannelLayout::Gray, 100).unwrap();
/// let result = binarize(&buffer, Some(100.0)).unwrap();
/// assert!(result.data().iter().all(|&v| v == 255));
/// ```
pub fn binarize(buffer: &PixelBuffer, threshold: Option<f64>) -> PointResult<PixelBuffer> {
    if let Some(t) = threshold
        && !(0.0..=255.0).contains(&t)
    {
        return Err(PointError::InvalidParameters(
            "threshold must be in [0.0, 255.0]".into(),
        ));
    }

    let luma = buffer.to_luma();
    let threshold = threshold.unwrap_or_else(|| luma.mean());

    let mut out = buffer.create_template();
    let channels = buffer.channels();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let value = if luma.get_unchecked(x, y, 0) as f64 >= threshold {
                255
            } else {
                0
            };
            for c in 0..channels {
                out.set_unchecked(x, y, c, value);
            }
        }
    }
    Ok(out.into())
}

/// Keep a brightness band and suppress everything outside it.
///
/// Pixels whose luminance lies in `[min_brightness, max_brightness]`
/// (inclusive) keep their luminance value. Out-of-band pixels are rendered
/// according to `outside`: either a constant or their luminance unchanged.
///
/// Applying the same cut twice produces the same result as applying it
/// once, since luminance of an already-cut pixel is the pixel value itself.
///
/// # Arguments
///
/// * `buffer` - Input image
/// * `min_brightness` - Lower band edge in `[0.0, 255.0]`
/// * `max_brightness` - Upper band edge in `[0.0, 255.0]`; must be greater
///   than `min_brightness`
/// * `outside` - Rendering of out-of-band pixels
///
/// # Errors
///
/// Returns [`PointError::InvalidParameters`] if either edge lies outside
/// `[0.0, 255.0]` or the band is empty.
pub fn brightness_range_cut(
    buffer: &PixelBuffer,
    min_brightness: f64,
    max_brightness: f64,
    outside: OutsideMode,
) -> PointResult<PixelBuffer> {
    for (name, value) in [
        ("min_brightness", min_brightness),
        ("max_brightness", max_brightness),
    ] {
        if !(0.0..=255.0).contains(&value) {
            return Err(PointError::InvalidParameters(format!(
                "{name} must be in [0.0, 255.0]"
            )));
        }
    }
    if min_brightness >= max_brightness {
        return Err(PointError::InvalidParameters(
            "min_brightness must be less than max_brightness".into(),
        ));
    }

    let luma = buffer.to_luma();
    let mut out = buffer.create_template();
    let channels = buffer.channels();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let gray = luma.get_unchecked(x, y, 0);
            let in_band = (min_brightness..=max_brightness).contains(&(gray as f64));
            let value = match (in_band, outside) {
                (true, _) => gray,
                (false, OutsideMode::Constant(constant)) => constant,
                (false, OutsideMode::Original) => gray,
            };
            for c in 0..channels {
                out.set_unchecked(x, y, c, value);
            }
        }
    }
    Ok(out.into())
}
