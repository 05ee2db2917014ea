//! Batch comparison of filter outputs against a shared original

use crate::assess::{self, QualityMetrics};
use crate::visualize::{Palette, visualize_difference};
use crate::{QualityError, QualityResult};
use indexmap::IndexMap;
use pixlab_core::PixelBuffer;

/// Everything computed for one successfully compared candidate.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    /// Summary metrics against the original
    pub metrics: QualityMetrics,
    /// Per-sample absolute difference
    pub difference_map: PixelBuffer,
    /// Hot-palette rendering of the difference map
    pub visualization: PixelBuffer,
}

/// Criterion for picking the best candidate out of a comparison batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestCriterion {
    /// Highest quality rating
    Overall,
    /// Lowest mean absolute difference
    Difference,
    /// Highest peak signal-to-noise ratio
    Psnr,
}

/// Compares a set of named filter outputs against one original buffer.
///
/// Each candidate is evaluated independently; a failure (typically a
/// shape mismatch) is stored as the error entry for that name and never
/// aborts the rest of the batch. Results keep candidate insertion order,
/// and ties between candidates go to the earlier one.
///
/// The underlying rating rewards closeness to the original, so "best
/// overall" means least destructive, not sharpest.
#[derive(Debug, Default)]
pub struct FilterComparator {
    results: IndexMap<String, QualityResult<ComparisonEntry>>,
}

fn evaluate(original: &PixelBuffer, processed: &PixelBuffer) -> QualityResult<ComparisonEntry> {
    let metrics = assess::metrics(original, processed)?;
    let difference_map = assess::difference_map(original, processed)?;
    let visualization = visualize_difference(&difference_map, Palette::Hot)?;
    Ok(ComparisonEntry {
        metrics,
        difference_map,
        visualization,
    })
}

impl FilterComparator {
    /// Create an empty comparator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every candidate against `original`.
    ///
    /// Replaces any results from a previous call. Per-candidate failures
    /// are recorded under the candidate's name instead of being
    /// propagated, so the returned map always has one entry per
    /// candidate.
    pub fn compare(
        &mut self,
        original: &PixelBuffer,
        candidates: &IndexMap<String, PixelBuffer>,
    ) -> &IndexMap<String, QualityResult<ComparisonEntry>> {
        self.results.clear();
        for (name, processed) in candidates {
            self.results
                .insert(name.clone(), evaluate(original, processed));
        }
        &self.results
    }

    /// Get the stored comparison results, in candidate insertion order.
    pub fn results(&self) -> &IndexMap<String, QualityResult<ComparisonEntry>> {
        &self.results
    }

    /// Pick the best successfully compared candidate under `criterion`.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::NoData`] if no comparison has run or every
    /// candidate failed.
    pub fn best(&self, criterion: BestCriterion) -> QualityResult<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, entry) in &self.results {
            let Ok(entry) = entry else { continue };
            // Scores are oriented so larger is better.
            let score = match criterion {
                BestCriterion::Overall => entry.metrics.quality_rating,
                BestCriterion::Difference => -entry.metrics.mean_difference,
                BestCriterion::Psnr => entry.metrics.psnr,
            };
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((name, score)),
            }
        }
        best.map(|(name, _)| name).ok_or(QualityError::NoData)
    }

    /// Render the stored results as a multi-line report.
    ///
    /// Successful candidates are ranked by quality rating, best first;
    /// failed candidates are listed at the end with their errors. The
    /// report is a pure function of the stored results.
    ///
    /// # Errors
    ///
    /// Returns [`QualityError::NoData`] if no comparison has run.
    pub fn format_report(&self) -> QualityResult<String> {
        if self.results.is_empty() {
            return Err(QualityError::NoData);
        }

        let successes: Vec<(&str, &QualityMetrics)> = self
            .results
            .iter()
            .filter_map(|(name, entry)| entry.as_ref().ok().map(|e| (name.as_str(), &e.metrics)))
            .collect();
        let failures: Vec<(&str, &QualityError)> = self
            .results
            .iter()
            .filter_map(|(name, entry)| entry.as_ref().err().map(|e| (name.as_str(), e)))
            .collect();

        let mut lines = Vec::new();
        lines.push("=== FILTER QUALITY COMPARISON ===".to_string());
        lines.push(String::new());
        lines.push("Summary:".to_string());
        lines.push(format!("  Candidates compared: {}", self.results.len()));
        lines.push(format!("  Failed: {}", failures.len()));

        if !successes.is_empty() {
            let sum: f64 = successes.iter().map(|(_, m)| m.quality_rating).sum();
            let average = sum / successes.len() as f64;
            let low = successes
                .iter()
                .map(|(_, m)| m.quality_rating)
                .fold(f64::INFINITY, f64::min);
            let high = successes
                .iter()
                .map(|(_, m)| m.quality_rating)
                .fold(f64::NEG_INFINITY, f64::max);
            lines.push(format!("  Average rating: {average:.2}"));
            lines.push(format!("  Rating range: {low:.2} - {high:.2}"));

            lines.push(String::new());
            lines.push("Best candidates:".to_string());
            for (label, criterion) in [
                ("Best overall", BestCriterion::Overall),
                ("Best by difference", BestCriterion::Difference),
                ("Best by PSNR", BestCriterion::Psnr),
            ] {
                lines.push(format!("  {}: {}", label, self.best(criterion)?));
            }

            let mut ranked = successes.clone();
            ranked.sort_by(|a, b| b.1.quality_rating.total_cmp(&a.1.quality_rating));

            lines.push(String::new());
            lines.push("Detailed results:".to_string());
            lines.push("-".repeat(40));
            for (rank, (name, m)) in ranked.iter().enumerate() {
                lines.push(format!("{}. {}", rank + 1, name));
                lines.push(format!(
                    "   Rating: {:.2} ({})",
                    m.quality_rating, m.quality_label
                ));
                lines.push(format!("   Mean difference: {:.2}", m.mean_difference));
                lines.push(format!("   Max difference: {}", m.max_difference));
                lines.push(format!("   PSNR: {:.2} dB", m.psnr));
                lines.push(String::new());
            }
        }

        if !failures.is_empty() {
            lines.push("Failed:".to_string());
            for (name, err) in &failures {
                lines.push(format!("  {name}: {err}"));
            }
        }

        Ok(lines.join("\n"))
    }
}
