//! Soft assertions: record failures now, fail once at the end.
//!
//! A scenario that checks five things should report all five verdicts
//! instead of stopping at the first miss. Checks record their failures
//! here; [`SoftAssertions::finish`] turns the record into a single error.

use crate::error::UatError;
use qatool_browser_test::BrowserError;
use std::fmt;

/// Collects assertion failures for a deferred verdict.
///
/// The collector is consumed by `finish`; a collector dropped without
/// finishing reports nothing, so every scenario ends with `finish`.
#[derive(Debug, Default)]
pub struct SoftAssertions {
    failures: Vec<String>,
}

impl SoftAssertions {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `context` as a failure unless `condition` holds.
    pub fn check(&mut self, condition: bool, context: &str) {
        if !condition {
            self.failures.push(context.to_string());
        }
    }

    /// Records a failure naming both values unless they compare equal.
    pub fn check_eq<T>(&mut self, actual: T, expected: T, context: &str)
    where
        T: PartialEq + fmt::Debug,
    {
        if actual != expected {
            self.failures
                .push(format!("{context}: expected {expected:?}, got {actual:?}"));
        }
    }

    /// Records a failure unless the driver operation succeeded.
    ///
    /// A timeout waiting for a state is a scenario verdict, not a harness
    /// fault, so it lands here instead of aborting the test.
    pub fn check_ok(&mut self, result: std::result::Result<(), BrowserError>, context: &str) {
        if let Err(error) = result {
            self.failures.push(format!("{context}: {error}"));
        }
    }

    /// Failure messages recorded so far, in order.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Reports whether any check has failed yet.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Consumes the collector.
    ///
    /// # Errors
    ///
    /// Returns `SoftAssertionsFailed` listing every recorded failure if any
    /// check missed.
    pub fn finish(self) -> crate::error::Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(UatError::SoftAssertionsFailed {
                failures: self.failures,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collectors_finish_ok() {
        let mut soft = SoftAssertions::new();
        soft.check(true, "never recorded");
        soft.check_eq(2, 2, "equal");

        assert!(!soft.has_failures());
        assert!(soft.finish().is_ok());
    }

    #[test]
    fn failures_accumulate_in_order() {
        let mut soft = SoftAssertions::new();
        soft.check(false, "first miss");
        soft.check_eq("actual", "expected", "second miss");
        soft.check(false, "third miss");

        assert_eq!(soft.failures().len(), 3);
        assert_eq!(soft.failures()[0], "first miss");
        assert!(soft.failures()[1].starts_with("second miss: "));

        let error = soft.finish().unwrap_err();
        assert!(error.to_string().starts_with("3 soft assertion(s) failed"));
    }

    #[test]
    fn driver_errors_become_recorded_failures() {
        let mut soft = SoftAssertions::new();
        soft.check_ok(Ok(()), "fine");
        soft.check_ok(
            Err(BrowserError::ConnectionFailed("gone".to_string())),
            "tab check",
        );

        assert_eq!(soft.failures().len(), 1);
        assert!(soft.failures()[0].contains("tab check"));
        assert!(soft.failures()[0].contains("gone"));
    }

    #[test]
    fn check_eq_reports_both_sides() {
        let mut soft = SoftAssertions::new();
        soft.check_eq(1, 2, "count");

        assert_eq!(soft.failures()[0], "count: expected 2, got 1");
    }
}
