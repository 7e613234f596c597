//! Evaluation of candidate submissions against their oracles.
//!
//! ## Module Organization
//!
//! - `compare.rs` - Outcome vs. expected literal comparison
//! - `tally.rs` - Passed/failed counts
//! - `pipeline.rs` - One candidate: prepare, compile once, run every test case
//! - `discovery.rs` - Walking the results tree
//! - `batch.rs` - Whole-tree evaluation feeding the report

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod batch;
pub mod compare;
pub mod discovery;
pub mod pipeline;
pub mod tally;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::report::ReportError;

pub use batch::{BatchSummary, run_batch};
pub use compare::{Verdict, compare};
pub use discovery::{CandidateJob, discover_candidates};
pub use pipeline::{CandidateEvaluation, EvalStatus, evaluate_candidate, run_test_cases};
pub use tally::Tally;

/// Errors that abort a batch. Per-candidate failures never surface here; they become rows.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("cannot read results directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("an evaluation worker panicked")]
    WorkerPanicked,

    #[error("report lock poisoned by a failed worker")]
    SinkPoisoned,
}
