//! Convolution kernels
//!
//! Defines the kernel structure shared by the convolution-based filters,
//! plus constructors for the two shapes the toolkit ships: the uniform
//! (box) kernel and the Gaussian kernel sized by the three-sigma rule.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
///
/// Weights are stored row-major. The center marks the output pixel the
/// kernel is anchored on; constructors place it at `(width/2, height/2)`.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zero-filled kernel with the given dimensions.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(
                "kernel dimensions must be positive".into(),
            ));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; (width * height) as usize],
        })
    }

    /// Create a kernel from a slice of row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if either dimension is zero
    /// or `data` does not hold exactly `width * height` values.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(
                "kernel dimensions must be positive".into(),
            ));
        }
        if data.len() != (width * height) as usize {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values, got {}",
                width * height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: data.to_vec(),
        })
    }

    /// Create a uniform (box) averaging kernel.
    ///
    /// All values are `1 / (size * size)`.
    pub fn uniform(size: u32) -> FilterResult<Self> {
        if size == 0 {
            return Err(FilterError::InvalidKernel(
                "kernel size must be positive".into(),
            ));
        }
        let value = 1.0 / (size * size) as f64;
        Ok(Self {
            width: size,
            height: size,
            cx: size / 2,
            cy: size / 2,
            data: vec![value; (size * size) as usize],
        })
    }

    /// Create a normalized Gaussian kernel sized by the three-sigma rule.
    ///
    /// The side length is `2 * ceil(3 * sigma) + 1`, so the kernel is
    /// always odd and covers three standard deviations in every direction.
    /// Weights follow `exp(-(x^2 + y^2) / (2 * sigma^2))` and are scaled to
    /// sum to 1; should the sum ever degenerate to zero the kernel falls
    /// back to uniform weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `sigma` is not a positive
    /// finite number, or is so large the kernel would be impractical.
    pub fn gaussian(sigma: f64) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidKernel("sigma must be > 0.0".into()));
        }
        let half = (3.0 * sigma).ceil();
        if half > 512.0 {
            return Err(FilterError::InvalidKernel(format!(
                "sigma {sigma} yields an impractically large kernel"
            )));
        }
        let half = half as u32;
        let size = 2 * half + 1;

        let mut data = vec![0.0; (size * size) as usize];
        for ky in 0..size {
            for kx in 0..size {
                let dx = kx as f64 - half as f64;
                let dy = ky as f64 - half as f64;
                let exponent = -(dx * dx + dy * dy) / (2.0 * sigma * sigma);
                data[(ky * size + kx) as usize] = exponent.exp();
            }
        }

        let sum: f64 = data.iter().sum();
        if sum > 0.0 {
            for value in &mut data {
                *value /= sum;
            }
        } else {
            data.fill(1.0 / (size * size) as f64);
        }

        Ok(Self {
            width: size,
            height: size,
            cx: half,
            cy: half,
            data,
        })
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Set the center coordinates.
    pub fn set_center(&mut self, cx: u32, cy: u32) -> FilterResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(FilterError::InvalidKernel(format!(
                "center ({cx}, {cy}) outside {}x{} kernel",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Get a value at (x, y), panicking if out of bounds.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[(y * self.width + x) as usize]
    }

    /// Set a value at (x, y). Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose values sum to 0 is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for value in &mut self.data {
                *value /= sum;
            }
        }
    }
}
