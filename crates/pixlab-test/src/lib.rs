//! pixlab-test - Regression test support for pixlab
//!
//! This crate provides a small regression harness plus synthetic buffer
//! fixtures shared by the integration test suites:
//!
//! - **RegParams**: Collects named comparisons and reports a pass/fail
//!   summary at cleanup
//! - **fixtures**: Deterministic ramp, edge, checkerboard, and seeded-noise
//!   buffers, so suites never touch the filesystem
//!
//! # Usage
//!
//! ```
//! use pixlab_test::{fixtures, RegParams};
//!
//! let mut rp = RegParams::new("gradient");
//! let buffer = fixtures::gradient_gray(16, 4);
//! rp.compare_values(255.0, buffer.max_sample() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

pub mod fixtures;
mod params;

pub use params::RegParams;
