//! Difference maps and quality metrics
//!
//! Quality is judged by how far a processed buffer strays from its
//! original: the absolute per-sample difference feeds summary statistics,
//! a coarse three-bucket distribution, PSNR, and a heuristic rating.

use crate::{QualityError, QualityResult};
use pixlab_core::PixelBuffer;

/// Upper edge of the "low difference" bucket (inclusive).
const LOW_DIFFERENCE_MAX: u8 = 20;

/// Lower edge of the "high difference" bucket (exclusive).
const HIGH_DIFFERENCE_MIN: u8 = 50;

/// Summary metrics for an original/processed pair.
///
/// Buckets count individual samples, so an RGB pair contributes three
/// counts per pixel. `psnr` is `f64::INFINITY` when the buffers are
/// identical.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetrics {
    /// Mean absolute difference over all samples
    pub mean_difference: f64,
    /// Largest absolute difference
    pub max_difference: u8,
    /// Population standard deviation of the differences
    pub std_difference: f64,
    /// Number of samples compared
    pub total_samples: u64,
    /// Samples with difference > 50
    pub high_difference_samples: u64,
    /// Samples with difference in 21..=50
    pub medium_difference_samples: u64,
    /// Samples with difference <= 20
    pub low_difference_samples: u64,
    /// Share of high-difference samples, in percent
    pub high_difference_percent: f64,
    /// Share of medium-difference samples, in percent
    pub medium_difference_percent: f64,
    /// Share of low-difference samples, in percent
    pub low_difference_percent: f64,
    /// Peak signal-to-noise ratio in dB
    pub psnr: f64,
    /// Heuristic rating in [0, 100]; higher means closer to the original
    pub quality_rating: f64,
    /// Human-readable rating bucket
    pub quality_label: &'static str,
}

/// Map a mean difference onto the heuristic rating scale.
///
/// The scale rewards closeness to the original. That is the right reading
/// for smoothing (less damage is better) but a deliberately strong
/// sharpening also scores low, so the rating is a closeness score, not a
/// universal goodness score.
fn rate(mean_difference: f64) -> (f64, &'static str) {
    if mean_difference < 10.0 {
        (90.0, "Excellent")
    } else if mean_difference < 25.0 {
        (75.0, "Good")
    } else if mean_difference < 50.0 {
        (60.0, "Satisfactory")
    } else {
        (30.0, "Poor")
    }
}

fn check_shapes(original: &PixelBuffer, processed: &PixelBuffer) -> QualityResult<()> {
    if !original.sizes_equal(processed) {
        return Err(QualityError::ShapeMismatch {
            expected: original.shape(),
            actual: processed.shape(),
        });
    }
    Ok(())
}

/// Compute the absolute per-sample difference of two buffers.
///
/// The result has the same shape and layout as the inputs; channels are
/// differenced independently.
///
/// # Errors
///
/// Returns [`QualityError::ShapeMismatch`] if the buffers differ in
/// width, height, or channel count.
///
/// # Examples
///
/// ```
/// use pixlab_core::{ChannelLayout, PixelBuffer};
/// use pixlab_quality::difference_map;
///
/// let a = PixelBuffer::filled(2, 2, ChannelLayout::Gray, 100).unwrap();
/// let b = PixelBuffer::filled(2, 2, ChannelLayout::Gray, 140).unwrap();
/// let diff = difference_map(&a, &b).unwrap();
/// assert!(diff.data().iter().all(|&v| v == 40));
/// ```
pub fn difference_map(
    original: &PixelBuffer,
    processed: &PixelBuffer,
) -> QualityResult<PixelBuffer> {
    check_shapes(original, processed)?;

    let mut out = original.create_template();
    for ((dst, &a), &b) in out
        .data_mut()
        .iter_mut()
        .zip(original.data())
        .zip(processed.data())
    {
        *dst = a.abs_diff(b);
    }
    Ok(out.into())
}

/// Compute summary quality metrics for an original/processed pair.
///
/// # Errors
///
/// Returns [`QualityError::ShapeMismatch`] if the buffers differ in
/// width, height, or channel count.
pub fn metrics(original: &PixelBuffer, processed: &PixelBuffer) -> QualityResult<QualityMetrics> {
    check_shapes(original, processed)?;

    let mut sum = 0.0_f64;
    let mut sum_sq = 0.0_f64;
    let mut max_difference = 0u8;
    let mut high = 0u64;
    let mut medium = 0u64;
    let mut low = 0u64;

    for (&a, &b) in original.data().iter().zip(processed.data()) {
        let diff = a.abs_diff(b);
        let d = diff as f64;
        sum += d;
        sum_sq += d * d;
        max_difference = max_difference.max(diff);
        if diff > HIGH_DIFFERENCE_MIN {
            high += 1;
        } else if diff > LOW_DIFFERENCE_MAX {
            medium += 1;
        } else {
            low += 1;
        }
    }

    let total = original.data().len() as u64;
    let n = total as f64;
    let mean_difference = sum / n;
    let std_difference = (sum_sq / n - mean_difference * mean_difference)
        .max(0.0)
        .sqrt();

    // MSE over the same samples; identical buffers give infinite PSNR.
    let mse = sum_sq / n;
    let psnr = if mse > 0.0 {
        10.0 * (255.0 * 255.0 / mse).log10()
    } else {
        f64::INFINITY
    };

    let (quality_rating, quality_label) = rate(mean_difference);

    Ok(QualityMetrics {
        mean_difference,
        max_difference,
        std_difference,
        total_samples: total,
        high_difference_samples: high,
        medium_difference_samples: medium,
        low_difference_samples: low,
        high_difference_percent: high as f64 / n * 100.0,
        medium_difference_percent: medium as f64 / n * 100.0,
        low_difference_percent: low as f64 / n * 100.0,
        psnr,
        quality_rating,
        quality_label,
    })
}

impl QualityMetrics {
    /// Render the metrics as a multi-line report.
    pub fn format_report(&self) -> String {
        let mut report = Vec::new();
        report.push("=== PROCESSING QUALITY ASSESSMENT ===".to_string());
        report.push(format!("Overall rating: {}", self.quality_label));
        report.push(String::new());
        report.push("Difference statistics:".to_string());
        report.push(format!("  Mean difference: {:.2}", self.mean_difference));
        report.push(format!("  Max difference: {}", self.max_difference));
        report.push(format!("  Std deviation: {:.2}", self.std_difference));
        report.push(format!("  PSNR: {:.2} dB", self.psnr));
        report.push(String::new());
        report.push("Difference distribution:".to_string());
        report.push(format!(
            "  Low (<={}): {:.1}%",
            LOW_DIFFERENCE_MAX, self.low_difference_percent
        ));
        report.push(format!(
            "  Medium ({}-{}): {:.1}%",
            LOW_DIFFERENCE_MAX + 1,
            HIGH_DIFFERENCE_MIN,
            self.medium_difference_percent
        ));
        report.push(format!(
            "  High (>{}): {:.1}%",
            HIGH_DIFFERENCE_MIN, self.high_difference_percent
        ));
        report.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlab_core::ChannelLayout;

    fn pair(a_val: u8, b_val: u8) -> (PixelBuffer, PixelBuffer) {
        let a = PixelBuffer::filled(4, 4, ChannelLayout::Gray, a_val).unwrap();
        let b = PixelBuffer::filled(4, 4, ChannelLayout::Gray, b_val).unwrap();
        (a, b)
    }

    // ========== difference_map tests ==========

    #[test]
    fn test_difference_map_identical_is_zero() {
        let (a, _) = pair(77, 0);
        let diff = difference_map(&a, &a).unwrap();
        assert!(diff.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_difference_map_is_symmetric() {
        let (a, b) = pair(30, 200);
        let ab = difference_map(&a, &b).unwrap();
        let ba = difference_map(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab.data().iter().all(|&v| v == 170));
    }

    #[test]
    fn test_difference_map_shape_mismatch() {
        let a = PixelBuffer::filled(4, 4, ChannelLayout::Gray, 0).unwrap();
        let b = PixelBuffer::filled(4, 5, ChannelLayout::Gray, 0).unwrap();
        let err = difference_map(&a, &b).unwrap_err();
        assert!(matches!(err, QualityError::ShapeMismatch { .. }));

        let c = PixelBuffer::filled(4, 4, ChannelLayout::Rgb, 0).unwrap();
        assert!(difference_map(&a, &c).is_err());
    }

    // ========== metrics tests ==========

    #[test]
    fn test_metrics_identical_buffers() {
        let (a, _) = pair(123, 0);
        let m = metrics(&a, &a).unwrap();
        assert_eq!(m.mean_difference, 0.0);
        assert_eq!(m.max_difference, 0);
        assert_eq!(m.std_difference, 0.0);
        assert_eq!(m.low_difference_samples, 16);
        assert_eq!(m.quality_rating, 90.0);
        assert_eq!(m.quality_label, "Excellent");
        assert!(m.psnr.is_infinite());
    }

    #[test]
    fn test_metrics_constant_offset() {
        let (a, b) = pair(100, 130);
        let m = metrics(&a, &b).unwrap();
        assert_eq!(m.mean_difference, 30.0);
        assert_eq!(m.max_difference, 30);
        assert_eq!(m.std_difference, 0.0);
        // 30 falls in the medium bucket.
        assert_eq!(m.medium_difference_samples, 16);
        assert_eq!(m.medium_difference_percent, 100.0);
        // MSE = 900, PSNR = 10 * log10(65025 / 900) = 18.59.
        assert!((m.psnr - 18.59).abs() < 0.01);
        assert_eq!(m.quality_rating, 60.0);
        assert_eq!(m.quality_label, "Satisfactory");
    }

    #[test]
    fn test_metrics_bucket_edges() {
        let mut a = PixelBuffer::new(3, 1, ChannelLayout::Gray).unwrap();
        let mut b = PixelBuffer::new(3, 1, ChannelLayout::Gray).unwrap();
        // Differences of exactly 20, 21, and 50, then one of 51.
        a.set_unchecked(0, 0, 0, 0);
        b.set_unchecked(0, 0, 0, 20);
        a.set_unchecked(1, 0, 0, 0);
        b.set_unchecked(1, 0, 0, 21);
        a.set_unchecked(2, 0, 0, 0);
        b.set_unchecked(2, 0, 0, 50);
        let m = metrics(&a.freeze(), &b.freeze()).unwrap();
        assert_eq!(m.low_difference_samples, 1);
        assert_eq!(m.medium_difference_samples, 2);
        assert_eq!(m.high_difference_samples, 0);

        let a = PixelBuffer::filled(1, 1, ChannelLayout::Gray, 0).unwrap();
        let b = PixelBuffer::filled(1, 1, ChannelLayout::Gray, 51).unwrap();
        let m = metrics(&a, &b).unwrap();
        assert_eq!(m.high_difference_samples, 1);
    }

    #[test]
    fn test_metrics_rating_boundaries() {
        for (offset, rating, label) in [
            (9u8, 90.0, "Excellent"),
            (10, 75.0, "Good"),
            (24, 75.0, "Good"),
            (25, 60.0, "Satisfactory"),
            (49, 60.0, "Satisfactory"),
            (50, 30.0, "Poor"),
        ] {
            let (a, b) = pair(0, offset);
            let m = metrics(&a, &b).unwrap();
            assert_eq!(m.quality_rating, rating, "offset {offset}");
            assert_eq!(m.quality_label, label, "offset {offset}");
        }
    }

    #[test]
    fn test_metrics_rgb_counts_samples() {
        let a = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, 10).unwrap();
        let b = PixelBuffer::filled(2, 2, ChannelLayout::Rgb, 10).unwrap();
        let m = metrics(&a, &b).unwrap();
        assert_eq!(m.total_samples, 12);
    }

    #[test]
    fn test_format_report_mentions_key_figures() {
        let (a, b) = pair(100, 130);
        let report = metrics(&a, &b).unwrap().format_report();
        assert!(report.contains("Satisfactory"));
        assert!(report.contains("Mean difference: 30.00"));
        assert!(report.contains("Medium (21-50): 100.0%"));
    }
}
