//! pixlab-quality - Quality assessment for processed buffers
//!
//! This crate measures how far a processed pixel buffer strays from its
//! original:
//!
//! - Per-sample absolute difference maps
//! - Summary metrics: mean/max/std difference, bucket distribution, PSNR
//! - Heat-map rendering of difference maps (hot, cool, gray palettes)
//! - Batch comparison of named filter outputs with best-candidate
//!   selection and a ranked text report
//!
//! The quality rating is a fixed-threshold heuristic over the mean
//! difference. It measures closeness to the original, not perceptual
//! quality.

pub mod assess;
pub mod compare;
mod error;
pub mod visualize;

pub use error::{QualityError, QualityResult};

// Re-export commonly used types and functions
pub use assess::{QualityMetrics, difference_map, metrics};
pub use compare::{BestCriterion, ComparisonEntry, FilterComparator};
pub use visualize::{Palette, visualize_difference};
