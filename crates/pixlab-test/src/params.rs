//! Regression test parameters and operations

use pixlab_core::PixelBuffer;

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the index of the
/// current comparison, and the accumulated failures. Comparisons never
/// panic; [`RegParams::cleanup`] reports the verdict at the end so a single
/// test run surfaces every failing check at once.
pub struct RegParams {
    /// Name of the test (e.g., "smooth")
    pub test_name: String,
    /// Current comparison index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "smooth")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values.
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if the values match within `delta`, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            false
        } else {
            true
        }
    }

    /// Compare a boolean condition.
    ///
    /// Records a failure with `label` when `condition` is false.
    pub fn compare_bool(&mut self, condition: bool, label: &str) -> bool {
        self.index += 1;

        if !condition {
            let msg = format!(
                "Failure in {}_reg: condition '{}' for index {}",
                self.test_name, label, self.index
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
        }
        condition
    }

    /// Compare two pixel buffers for exact equality.
    ///
    /// # Returns
    ///
    /// `true` if the buffers have identical shape and samples.
    pub fn compare_buffers(&mut self, buffer1: &PixelBuffer, buffer2: &PixelBuffer) -> bool {
        self.index += 1;

        if !buffer1.sizes_equal(buffer2) {
            let msg = format!(
                "Failure in {}_reg: buffer comparison for index {} - shape mismatch \
                 ({:?} vs {:?})",
                self.test_name,
                self.index,
                buffer1.shape(),
                buffer2.shape()
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            return false;
        }

        for y in 0..buffer1.height() {
            for x in 0..buffer1.width() {
                for c in 0..buffer1.channels() {
                    let s1 = buffer1.get_unchecked(x, y, c);
                    let s2 = buffer2.get_unchecked(x, y, c);
                    if s1 != s2 {
                        let msg = format!(
                            "Failure in {}_reg: buffer comparison for index {} - sample \
                             mismatch at ({}, {}, {}): {} vs {}",
                            self.test_name, self.index, x, y, c, s1, s2
                        );
                        eprintln!("{}", msg);
                        self.failures.push(msg);
                        self.success = false;
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Clean up and report results.
    ///
    /// # Returns
    ///
    /// `true` if all comparisons passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all comparisons have passed so far.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the list of failures.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
