//! Heat-map rendering of difference maps

use crate::QualityResult;
use pixlab_core::{ChannelLayout, PixelBuffer};

/// Color scheme for difference-map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Black through red and yellow to white
    Hot,
    /// Black through blue and cyan to white
    Cool,
    /// Plain gray levels broadcast to three channels
    Gray,
}

// Piecewise-linear ramps. Arithmetic is widened to i32 so the segments
// saturate instead of wrapping.
fn hot(v: u8) -> [u8; 3] {
    let v = v as i32;
    [
        (v * 3).clamp(0, 255) as u8,
        ((v - 85) * 3).clamp(0, 255) as u8,
        ((v - 170) * 3).clamp(0, 255) as u8,
    ]
}

fn cool(v: u8) -> [u8; 3] {
    let v = v as i32;
    [
        ((v - 170) * 3).clamp(0, 255) as u8,
        ((v - 85) * 3).clamp(0, 255) as u8,
        (v * 3).clamp(0, 255) as u8,
    ]
}

/// Render a difference map as an RGB heat map.
///
/// A multi-channel map is first collapsed to its per-pixel channel mean.
/// The collapsed map is stretched so its largest value lands on 255 (an
/// all-zero map stays black), then pushed through the palette ramp. The
/// output is always three-channel, regardless of the input layout.
///
/// # Errors
///
/// Returns [`crate::QualityError::Core`] if the output buffer cannot be
/// created.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_quality::{Palette, visualize_difference};
///
/// let diff = PixelBuffer::filled(2, 2, ChannelLayout::Gray, 40).unwrap();
/// let vis = visualize_difference(&diff, Palette::Hot).unwrap();
/// // The uniform map stretches to full intensity, so hot renders white.
/// assert_eq!(vis.get_unchecked(0, 0, 0), 255);
/// assert_eq!(vis.get_unchecked(0, 0, 2), 255);
/// ```
pub fn visualize_difference(
    diff_map: &PixelBuffer,
    palette: Palette,
) -> QualityResult<PixelBuffer> {
    let (width, height, channels) = diff_map.shape();

    let mut gray = vec![0.0f64; (width as usize) * (height as usize)];
    let mut max = 0.0f64;
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            for c in 0..channels {
                sum += diff_map.get_unchecked(x, y, c) as f64;
            }
            let value = sum / channels as f64;
            gray[(y * width + x) as usize] = value;
            max = max.max(value);
        }
    }

    let mut out = PixelBuffer::new(width, height, ChannelLayout::Rgb)?;
    for y in 0..height {
        for x in 0..width {
            let value = gray[(y * width + x) as usize];
            let scaled = if max > 0.0 {
                (value / max * 255.0).round() as u8
            } else {
                0
            };
            let [r, g, b] = match palette {
                Palette::Hot => hot(scaled),
                Palette::Cool => cool(scaled),
                Palette::Gray => [scaled; 3],
            };
            out.set_unchecked(x, y, 0, r);
            out.set_unchecked(x, y, 1, g);
            out.set_unchecked(x, y, 2, b);
        }
    }
    Ok(out.into())
}
