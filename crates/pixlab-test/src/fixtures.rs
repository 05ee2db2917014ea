//! Synthetic test buffers
//!
//! The toolkit performs no file I/O, so tests build their inputs instead of
//! loading them. These constructors cover the shapes the suites keep
//! reaching for: ramps, step edges, checkerboards, and seeded noise.

use pixlab_core::{ChannelLayout, PixelBuffer};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Horizontal grayscale ramp from 0 (left) to 255 (right).
pub fn gradient_gray(width: u32, height: u32) -> PixelBuffer {
    let mut out = PixelBuffer::new(width, height, ChannelLayout::Gray)
        .expect("fixture dimensions must be positive");
    for y in 0..height {
        for x in 0..width {
            let value = if width > 1 {
                (x * 255 / (width - 1)) as u8
            } else {
                0
            };
            out.set_unchecked(x, y, 0, value);
        }
    }
    out.into()
}

/// RGB buffer with a horizontal red ramp, vertical green ramp, and flat blue.
pub fn gradient_rgb(width: u32, height: u32) -> PixelBuffer {
    let mut out = PixelBuffer::new(width, height, ChannelLayout::Rgb)
        .expect("fixture dimensions must be positive");
    for y in 0..height {
        for x in 0..width {
            let r = if width > 1 {
                (x * 255 / (width - 1)) as u8
            } else {
                0
            };
            let g = if height > 1 {
                (y * 255 / (height - 1)) as u8
            } else {
                0
            };
            out.set_unchecked(x, y, 0, r);
            out.set_unchecked(x, y, 1, g);
            out.set_unchecked(x, y, 2, 128);
        }
    }
    out.into()
}

/// Grayscale buffer split into a `left` half and a `right` half.
///
/// The vertical edge sits at `width / 2`; useful for checking that a filter
/// preserves or smears a hard transition.
pub fn step_edge_gray(width: u32, height: u32, left: u8, right: u8) -> PixelBuffer {
    let mut out = PixelBuffer::new(width, height, ChannelLayout::Gray)
        .expect("fixture dimensions must be positive");
    for y in 0..height {
        for x in 0..width {
            let value = if x < width / 2 { left } else { right };
            out.set_unchecked(x, y, 0, value);
        }
    }
    out.into()
}

/// Grayscale checkerboard with `tile` x `tile` squares of `low` and `high`.
pub fn checkerboard_gray(width: u32, height: u32, tile: u32, low: u8, high: u8) -> PixelBuffer {
    let tile = tile.max(1);
    let mut out = PixelBuffer::new(width, height, ChannelLayout::Gray)
        .expect("fixture dimensions must be positive");
    for y in 0..height {
        for x in 0..width {
            let value = if ((x / tile) + (y / tile)) % 2 == 0 {
                low
            } else {
                high
            };
            out.set_unchecked(x, y, 0, value);
        }
    }
    out.into()
}

/// Grayscale buffer of `base` with seeded uniform noise in `±amplitude`.
///
/// The same seed always produces the same buffer, so assertions on noise
/// suppression stay reproducible.
pub fn noisy_gray(width: u32, height: u32, base: u8, amplitude: u8, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let amplitude = amplitude as i32;
    let mut out = PixelBuffer::new(width, height, ChannelLayout::Gray)
        .expect("fixture dimensions must be positive");
    for y in 0..height {
        for x in 0..width {
            let offset = rng.random_range(-amplitude..=amplitude);
            let value = (base as i32 + offset).clamp(0, 255) as u8;
            out.set_unchecked(x, y, 0, value);
        }
    }
    out.into()
}
