//! CLI module for synthcheck
//!
//! This module provides the command-line interface for the evaluator.
//!
//! ## Commands
//!
//! - `evaluate` - Evaluate every candidate in the results tree and append report rows
//! - `check <file>` - Prepare one candidate and print its harness source
//! - `sample <oracle>` - Print a random percentage of an oracle's test cases
//! - `summary <report>` - Average verification rates per method and percentage
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::version::SYNTHCHECK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Test-based evaluator for model-synthesised functions
#[derive(Parser, Debug)]
#[command(name = "synthcheck")]
#[command(version = SYNTHCHECK_VERSION)]
#[command(about = "Evaluate synthesised functions against their unit-test oracles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate every candidate in the results tree and append report rows
    Evaluate(EvaluateArgs),

    /// Prepare one candidate and print the harness that would be compiled
    Check {
        /// Candidate submission file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Function name to give the candidate
        #[arg(long, default_value = "candidate")]
        name: String,
        /// Placeholder name used in the submission
        #[arg(long, default_value = "function")]
        placeholder: String,
    },

    /// Print a random subset of an oracle's test cases
    Sample {
        /// Oracle file
        #[arg(value_name = "ORACLE")]
        oracle: PathBuf,
        /// Percentage of test cases to draw
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
        percent: u32,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Summarise a report: mean verification rate per method and percentage
    Summary {
        /// Report CSV file
        #[arg(value_name = "REPORT", default_value = "test_results.csv")]
        report: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Flags for `evaluate`. Unset flags keep the defaults of [`crate::config::EvalConfig`].
#[derive(Args, Debug, Default)]
pub struct EvaluateArgs {
    /// Root of the function/method/percentage/run tree
    #[arg(long, value_name = "DIR")]
    pub results: Option<PathBuf>,
    /// Root of the per-function oracle directories
    #[arg(long, value_name = "DIR")]
    pub functions: Option<PathBuf>,
    /// Oracle file name inside each function directory
    #[arg(long, value_name = "NAME")]
    pub oracle_file: Option<String>,
    /// Report file rows are appended to
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
    /// Placeholder name used in submissions
    #[arg(long)]
    pub placeholder: Option<String>,
    /// Class name of the generated harness
    #[arg(long, value_name = "NAME")]
    pub unit_name: Option<String>,
    /// Compiler command
    #[arg(long, value_name = "CMD")]
    pub compiler: Option<String>,
    /// Runtime command
    #[arg(long, value_name = "CMD")]
    pub runtime: Option<String>,
    /// Per-invocation timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
    /// Absolute tolerance for numeric comparison
    #[arg(long)]
    pub tolerance: Option<f64>,
    /// Failed count recorded when a function has no oracle
    #[arg(long, value_name = "N")]
    pub missing_oracle_failures: Option<usize>,
    /// Candidates evaluated concurrently
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Evaluate(args) => commands::evaluate(args.into_config()),
        Command::Check {
            file,
            name,
            placeholder,
        } => commands::check_candidate(&file, &placeholder, &name),
        Command::Sample { oracle, percent, seed } => commands::sample_oracle(&oracle, percent, seed),
        Command::Summary { report, json } => commands::summarize_report(&report, json),
    }
}

// ============================================================================
// Tests
// ============================================================================
