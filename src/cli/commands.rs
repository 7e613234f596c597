//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use synthcheck_syntax::Candidate;

use super::{CliError, CliResult, EvaluateArgs, ExitCode};
use crate::backend::{ToolchainBuilder, assemble};
use crate::config::EvalConfig;
use crate::eval::run_batch;
use crate::report::summary::summarize;
use crate::report::{ReportWriter, read_rows};
use crate::subset::sample_subset;

impl EvaluateArgs {
    /// Overlay the given flags on the default configuration.
    pub fn into_config(self) -> EvalConfig {
        let mut config = EvalConfig::default();
        if let Some(dir) = self.results {
            config = config.with_results_dir(dir);
        }
        if let Some(dir) = self.functions {
            config = config.with_functions_dir(dir);
        }
        if let Some(name) = self.oracle_file {
            config = config.with_oracle_file(name);
        }
        if let Some(path) = self.report {
            config = config.with_report_path(path);
        }
        if let Some(placeholder) = self.placeholder {
            config = config.with_placeholder(placeholder);
        }
        if let Some(unit_name) = self.unit_name {
            config = config.with_unit_name(unit_name);
        }
        if let Some(compiler) = self.compiler {
            config.toolchain.compiler = compiler;
        }
        if let Some(runtime) = self.runtime {
            config.toolchain.runtime = runtime;
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(failures) = self.missing_oracle_failures {
            config = config.with_missing_oracle_failures(failures);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_jobs(jobs);
        }
        config
    }
}

// ============================================================================
// evaluate
// ============================================================================

/// Run the whole batch and append one report row per candidate.
pub fn evaluate(config: EvalConfig) -> CliResult<ExitCode> {
    let mut report = ReportWriter::open_append(&config.report_path).map_err(|e| {
        CliError::failure(format!("Error opening report {}: {}", config.report_path.display(), e))
    })?;
    let builder = ToolchainBuilder::new(config.toolchain.clone(), config.timeout);

    let summary = run_batch(&config, &builder, &mut report).map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    println!(
        "Evaluated {} candidate(s): {} passed, {} failed. Report: {}",
        summary.candidates,
        summary.totals.passed,
        summary.totals.failed,
        config.report_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// check
// ============================================================================

/// Prepare a single candidate and print its harness source.
pub fn check_candidate(file: &Path, placeholder: &str, name: &str) -> CliResult<ExitCode> {
    let raw = read_file(file)?;
    match Candidate::prepare(&raw, placeholder, name) {
        Ok(candidate) => {
            let program = assemble(&candidate, &EvalConfig::default().unit_name);
            print!("{}", program.source);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let report = miette::Report::new(e);
            Err(CliError::failure(format!("{}: {:?}", file.display(), report)))
        }
    }
}

// ============================================================================
// sample
// ============================================================================

/// Print a random subset of an oracle's lines.
pub fn sample_oracle(oracle: &Path, percent: u32, seed: Option<u64>) -> CliResult<ExitCode> {
    let source = read_file(oracle)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let lines = sample_subset(&source, percent, &mut rng);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{line}").map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// summary
// ============================================================================

/// Print verification-rate means for a report.
pub fn summarize_report(report: &Path, json: bool) -> CliResult<ExitCode> {
    let rows = read_rows(report)
        .map_err(|e| CliError::failure(format!("Error reading report {}: {}", report.display(), e)))?;
    let summary = summarize(&rows);

    if json {
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::failure(format!("Error encoding summary: {}", e)))?;
        println!("{text}");
    } else {
        print!("{summary}");
    }
    Ok(ExitCode::SUCCESS)
}

fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading {}: {}", path.display(), e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_reports_submission_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_1.txt");
        fs::write(&path, "no code here").unwrap();
        let err = check_candidate(&path, "function", "gcd").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("run_1.txt"));
    }

    #[test]
    fn test_check_accepts_valid_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_1.txt");
        fs::write(&path, "int function(int a) { return a; }").unwrap();
        assert_eq!(check_candidate(&path, "function", "id").unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_missing_input_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = sample_oracle(&dir.path().join("absent.txt"), 50, Some(1)).unwrap_err();
        assert!(err.message.starts_with("Error reading"));
    }

    #[test]
    fn test_summary_over_written_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "Function,Method,Percentage,Run,Passed,Failed\nadd,baseline,25,1,10,0\n").unwrap();
        assert_eq!(summarize_report(&path, true).unwrap(), ExitCode::SUCCESS);
    }
}
