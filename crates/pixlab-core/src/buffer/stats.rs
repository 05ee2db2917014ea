//! Buffer statistics
//!
//! Sample-distribution queries used by the auto-parameter paths of the
//! transforms: maxima feed the logarithmic/power coefficient derivation,
//! the mean feeds binary thresholding, and percentiles feed the
//! brightness-range defaults. All accumulation is done in f64; the
//! sample counts of realistic buffers overflow f32 precision quickly.

use super::PixelBuffer;

/// Distribution of sample values, 256 bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Get the count for one sample value.
    #[inline]
    pub fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Get the total number of samples counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Nearest-rank percentile of the distribution.
    ///
    /// `p` is clamped to [0, 100]. Returns the smallest value whose
    /// cumulative count reaches `ceil(p/100 * total)` (the minimum for
    /// p = 0).
    pub fn percentile(&self, p: f64) -> u8 {
        let p = p.clamp(0.0, 100.0);
        let rank = ((p / 100.0) * self.total as f64).ceil().max(1.0) as u64;

        let mut cumulative = 0u64;
        for value in 0..256usize {
            cumulative += self.bins[value];
            if cumulative >= rank {
                return value as u8;
            }
        }
        255
    }
}

impl PixelBuffer {
    /// Count every sample of the buffer into a 256-bin histogram.
    ///
    /// Multi-channel buffers contribute all channels to the same bins.
    pub fn histogram(&self) -> Histogram {
        let mut bins = [0u64; 256];
        for &sample in self.data() {
            bins[sample as usize] += 1;
        }
        Histogram {
            bins,
            total: self.data().len() as u64,
        }
    }

    /// Get the largest sample value in the buffer.
    pub fn max_sample(&self) -> u8 {
        self.data().iter().copied().max().unwrap_or(0)
    }

    /// Get the smallest sample value in the buffer.
    pub fn min_sample(&self) -> u8 {
        self.data().iter().copied().min().unwrap_or(0)
    }

    /// Get the mean of all samples.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.data().iter().map(|&s| s as f64).sum();
        sum / self.data().len() as f64
    }

    /// Get the population standard deviation of all samples.
    pub fn std_dev(&self) -> f64 {
        let n = self.data().len() as f64;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &sample in self.data() {
            let v = sample as f64;
            sum += v;
            sum_sq += v * v;
        }
        let mean = sum / n;
        (sum_sq / n - mean * mean).max(0.0).sqrt()
    }

    /// Nearest-rank percentile over all samples.
    pub fn percentile(&self, p: f64) -> u8 {
        self.histogram().percentile(p)
    }
}
