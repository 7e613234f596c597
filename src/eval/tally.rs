//! Passed/failed accumulation for one evaluation run.

use std::ops::AddAssign;

use super::compare::Verdict;

/// Passed and failed counts. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run invalidated before execution: every test case failed.
    pub fn all_failed(total: usize) -> Self {
        Self { passed: 0, failed: total }
    }

    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Passed => self.passed += 1,
            Verdict::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of passed cases, `None` when nothing was counted.
    pub fn pass_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.passed as f64 / total as f64 * 100.0)
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

impl FromIterator<Verdict> for Tally {
    fn from_iter<I: IntoIterator<Item = Verdict>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for verdict in iter {
            tally.record(verdict);
        }
        tally
    }
}
