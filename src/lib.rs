#![forbid(unsafe_code)]
//! synthcheck: test-based evaluation of model-synthesised functions
//!
//! Each candidate submission is wrapped in a generated harness, compiled once, and executed
//! against every line of its function's oracle. Outcomes are compared with the expected literals
//! and tallied into an append-only CSV report.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli`, `backend` and `eval`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Generated code**: The harness assembler emits Java source as strings; nothing in it is executed by this crate.

pub mod backend;
pub mod cli;
pub mod config;
pub mod eval;
pub mod report;
pub mod subset;
pub mod version;

pub use synthcheck_syntax as syntax;

pub use backend::{HarnessBuilder, ToolchainBuilder, assemble};
pub use config::EvalConfig;
pub use eval::{EvalError, Tally, Verdict, evaluate_candidate, run_batch};
pub use report::{ReportRow, ReportSink, ReportWriter, RunKey};
