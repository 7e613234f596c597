//! Evaluation configuration.
//!
//! Defaults reproduce the reference batch layout (`results/` + `src/functions/`, oracle files named
//! `tests_250.txt`, a one-second timeout per invocation).

use std::path::PathBuf;
use std::time::Duration;

use crate::backend::Toolchain;

/// Settings for one evaluation batch.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Root of the `function/mode/percentage/run_N.txt` tree of candidates
    pub results_dir: PathBuf,
    /// Root of the per-function source tree holding oracle files
    pub functions_dir: PathBuf,
    /// Oracle file name inside each function directory
    pub oracle_file: String,
    /// Report (CSV) path; rows are appended
    pub report_path: PathBuf,
    /// Name the model was told to give the function
    pub placeholder: String,
    /// Class name of the generated harness
    pub unit_name: String,
    pub toolchain: Toolchain,
    /// Wall-clock limit for one harness invocation
    pub timeout: Duration,
    /// Absolute tolerance for numeric comparison
    pub tolerance: f64,
    /// Failed count recorded for a run whose function has no oracle file
    pub missing_oracle_failures: usize,
    /// Number of candidates evaluated concurrently
    pub jobs: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            functions_dir: PathBuf::from("src/functions"),
            oracle_file: "tests_250.txt".to_string(),
            report_path: PathBuf::from("test_results.csv"),
            placeholder: "function".to_string(),
            unit_name: "CandidateHarness".to_string(),
            toolchain: Toolchain::default(),
            timeout: Duration::from_millis(1000),
            tolerance: 1e-6,
            missing_oracle_failures: 250,
            jobs: 1,
        }
    }
}

impl EvalConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_functions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.functions_dir = dir.into();
        self
    }

    pub fn with_oracle_file(mut self, name: impl Into<String>) -> Self {
        self.oracle_file = name.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_unit_name(mut self, unit_name: impl Into<String>) -> Self {
        self.unit_name = unit_name.into();
        self
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_missing_oracle_failures(mut self, failures: usize) -> Self {
        self.missing_oracle_failures = failures;
        self
    }

    /// Set the worker count (at least one)
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Oracle path for a function.
    pub fn oracle_path(&self, function: &str) -> PathBuf {
        self.functions_dir.join(function).join(&self.oracle_file)
    }
}
