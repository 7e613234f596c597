//! Per-candidate evaluation: prepare, assemble, compile once, execute every test case.
//!
//! Failure tiers:
//! - invalid submission or compilation failure: every test case fails, nothing is executed
//! - per-test failure (timeout, launch error, missing output, diagnostic marker, malformed oracle
//!   line): that test case fails, its siblings still run

use synthcheck_syntax::{Candidate, OracleEntry};

use super::compare::{Verdict, compare};
use super::tally::Tally;
use crate::backend::{Executor, HarnessBuilder, Outcome, assemble};
use crate::config::EvalConfig;
use crate::report::RunKey;

/// How a candidate's evaluation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalStatus {
    /// Compiled and executed against every test case.
    Executed,
    /// The function has no oracle file.
    MissingOracle,
    /// The submission could not be read or prepared.
    InvalidSubmission(String),
    /// The harness did not compile.
    CompileFailed(String),
}

/// Terminal result for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvaluation {
    pub key: RunKey,
    pub tally: Tally,
    pub status: EvalStatus,
}

/// Evaluate one raw candidate submission against its oracle.
#[tracing::instrument(skip_all, fields(run = %key))]
pub fn evaluate_candidate<B: HarnessBuilder>(
    builder: &B,
    config: &EvalConfig,
    key: &RunKey,
    raw: &str,
    oracle: &[OracleEntry],
) -> CandidateEvaluation {
    let total = oracle.len();
    let finish = |tally: Tally, status: EvalStatus| CandidateEvaluation {
        key: key.clone(),
        tally,
        status,
    };

    let candidate = match Candidate::prepare(raw, &config.placeholder, &key.function) {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::warn!(error = %e, total, "invalid submission, counting every test case failed");
            return finish(Tally::all_failed(total), EvalStatus::InvalidSubmission(e.to_string()));
        }
    };

    let program = assemble(&candidate, &config.unit_name);
    let unit = match builder.build(&key.to_string(), &program) {
        Ok(unit) => unit,
        Err(e) => {
            tracing::warn!(error = %e, total, "failed to compile, counting every test case failed");
            return finish(Tally::all_failed(total), EvalStatus::CompileFailed(e.to_string()));
        }
    };

    let tally = run_test_cases(&unit, oracle, config.tolerance);
    tracing::debug!(passed = tally.passed, failed = tally.failed, "executed test cases");
    finish(tally, EvalStatus::Executed)
}

/// Execute every oracle entry in order and tally the verdicts.
pub fn run_test_cases<E: Executor>(unit: &E, oracle: &[OracleEntry], tolerance: f64) -> Tally {
    oracle.iter().map(|entry| run_test_case(unit, entry, tolerance)).collect()
}

fn run_test_case<E: Executor>(unit: &E, entry: &OracleEntry, tolerance: f64) -> Verdict {
    let case = match entry {
        OracleEntry::Case(case) => case,
        OracleEntry::Malformed(e) => {
            tracing::warn!(error = %e, "malformed test case counted as failed");
            return Verdict::Failed;
        }
    };

    let outcome = unit.execute(&case.args());
    let verdict = compare(outcome.value(), &case.expected, tolerance);

    if !verdict.is_pass() {
        match &outcome {
            Outcome::Timeout => tracing::info!(input = %case.arguments, "test timed out"),
            Outcome::Output(output) => tracing::debug!(
                input = %case.arguments,
                expected = %case.expected,
                output = %output,
                "test failed"
            ),
            Outcome::Error(reason) => tracing::debug!(
                input = %case.arguments,
                expected = %case.expected,
                reason = %reason,
                "test failed without output"
            ),
        }
    }
    verdict
}
