//! Batch evaluation over the whole results tree.
//!
//! Oracles are loaded once per function. Each candidate is evaluated independently and its row is
//! appended to the sink as soon as it is known, under a lock, so rows from concurrent workers never
//! interleave. A report write failure stops the batch; rows already appended stay.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use synthcheck_syntax::OracleEntry;
use synthcheck_syntax::oracle::parse_oracle;

use super::EvalError;
use super::discovery::{CandidateJob, discover_candidates};
use super::pipeline::{CandidateEvaluation, EvalStatus, evaluate_candidate};
use super::tally::Tally;
use crate::backend::HarnessBuilder;
use crate::config::EvalConfig;
use crate::report::ReportSink;

/// Totals over every row a batch appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub candidates: usize,
    pub totals: Tally,
}

/// Oracles keyed by function name; `None` when the function has no readable oracle file.
type OracleTable = HashMap<String, Option<Vec<OracleEntry>>>;

/// Evaluate every candidate under `config.results_dir` and append one row per candidate to `sink`.
pub fn run_batch<B, S>(config: &EvalConfig, builder: &B, sink: &mut S) -> Result<BatchSummary, EvalError>
where
    B: HarnessBuilder + Sync,
    S: ReportSink + Send,
{
    let jobs = discover_candidates(&config.results_dir).map_err(|source| EvalError::Discovery {
        path: config.results_dir.clone(),
        source,
    })?;
    let oracles = load_oracles(config, &jobs);
    let workers = config.jobs.clamp(1, jobs.len().max(1));
    tracing::info!(candidates = jobs.len(), workers, "starting evaluation");

    let sink = Mutex::new(sink);
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);

    let worker = || -> Result<BatchSummary, EvalError> {
        let mut summary = BatchSummary::default();
        while !stop.load(Ordering::Relaxed) {
            let index = next.fetch_add(1, Ordering::Relaxed);
            let Some(job) = jobs.get(index) else {
                break;
            };
            let evaluation = evaluate_job(config, builder, job, &oracles);
            let row = evaluation.key.row(evaluation.tally);

            let appended = match sink.lock() {
                Ok(mut sink) => sink.append(&row).map_err(EvalError::from),
                Err(_) => Err(EvalError::SinkPoisoned),
            };
            if let Err(e) = appended {
                stop.store(true, Ordering::Relaxed);
                return Err(e);
            }

            summary.candidates += 1;
            summary.totals += evaluation.tally;
        }
        Ok(summary)
    };

    let results: Vec<Result<BatchSummary, EvalError>> = if workers == 1 {
        vec![worker()]
    } else {
        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers).map(|_| scope.spawn(&worker)).collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(EvalError::WorkerPanicked)))
                .collect()
        })
    };

    let mut summary = BatchSummary::default();
    for result in results {
        let part = result?;
        summary.candidates += part.candidates;
        summary.totals += part.totals;
    }
    tracing::info!(
        candidates = summary.candidates,
        passed = summary.totals.passed,
        failed = summary.totals.failed,
        "evaluation finished"
    );
    Ok(summary)
}

/// Evaluate a single discovered candidate.
pub fn evaluate_job<B: HarnessBuilder>(
    config: &EvalConfig,
    builder: &B,
    job: &CandidateJob,
    oracles: &OracleTable,
) -> CandidateEvaluation {
    let Some(Some(oracle)) = oracles.get(&job.key.function) else {
        tracing::warn!(
            run = %job.key,
            failed = config.missing_oracle_failures,
            "no oracle for function, recording the run as failed"
        );
        return CandidateEvaluation {
            key: job.key.clone(),
            tally: Tally::all_failed(config.missing_oracle_failures),
            status: EvalStatus::MissingOracle,
        };
    };

    let evaluation = match fs::read_to_string(&job.path) {
        Ok(raw) => evaluate_candidate(builder, config, &job.key, &raw, oracle),
        Err(e) => {
            tracing::warn!(run = %job.key, path = %job.path.display(), error = %e, "cannot read candidate");
            CandidateEvaluation {
                key: job.key.clone(),
                tally: Tally::all_failed(oracle.len()),
                status: EvalStatus::InvalidSubmission(e.to_string()),
            }
        }
    };

    tracing::info!(
        run = %evaluation.key,
        passed = evaluation.tally.passed,
        failed = evaluation.tally.failed,
        "candidate evaluated"
    );
    evaluation
}

/// Load the oracle of every function that has at least one candidate.
pub fn load_oracles(config: &EvalConfig, jobs: &[CandidateJob]) -> OracleTable {
    let mut table = OracleTable::new();
    for job in jobs {
        if table.contains_key(&job.key.function) {
            continue;
        }
        let path = config.oracle_path(&job.key.function);
        let oracle = match fs::read_to_string(&path) {
            Ok(source) => Some(parse_oracle(&source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!(function = %job.key.function, path = %path.display(), "oracle file not found");
                None
            }
            Err(e) => {
                tracing::error!(function = %job.key.function, path = %path.display(), error = %e, "cannot read oracle file");
                None
            }
        };
        table.insert(job.key.function.clone(), oracle);
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::backend::{CompileError, Executor, HarnessProgram, Outcome};
    use crate::report::{ReportError, ReportRow};

    /// Answers every invocation with the sum of its integer arguments.
    struct Adder;

    impl Executor for Adder {
        fn execute(&self, args: &[String]) -> Outcome {
            let sum: i64 = args.iter().filter_map(|a| a.trim().parse::<i64>().ok()).sum();
            Outcome::Output(sum.to_string())
        }
    }

    struct AdderBuilder;

    impl HarnessBuilder for AdderBuilder {
        type Unit = Adder;

        fn build(&self, _label: &str, _program: &HarnessProgram) -> Result<Adder, CompileError> {
            Ok(Adder)
        }
    }

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn config_for(root: &Path) -> EvalConfig {
        EvalConfig::new()
            .with_results_dir(root.join("results"))
            .with_functions_dir(root.join("functions"))
    }

    #[test]
    fn test_missing_oracle_records_configured_failures() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "results/mul/baseline/25_percent/run_1.txt", "int function(int a) { return a; }");

        let mut rows: Vec<ReportRow> = Vec::new();
        let summary = run_batch(&config_for(dir.path()), &AdderBuilder, &mut rows).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].passed, rows[0].failed), (0, 250));
        assert_eq!(summary.totals, Tally::all_failed(250));
    }

    #[test]
    fn test_one_row_per_candidate_in_parallel() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "functions/add/tests_250.txt", "add(1,2) == 3\nadd(2,2) == 5\n");
        for run in 1..=6 {
            write(
                dir.path(),
                &format!("results/add/baseline/50_percent/run_{run}.txt"),
                "int function(int a, int b) { return a + b; }",
            );
        }

        let mut rows: Vec<ReportRow> = Vec::new();
        let summary = run_batch(&config_for(dir.path()).with_jobs(3), &AdderBuilder, &mut rows).unwrap();

        assert_eq!(summary.candidates, 6);
        assert_eq!(summary.totals, Tally { passed: 6, failed: 6 });
        let mut runs: Vec<&str> = rows.iter().map(|r| r.run.as_str()).collect();
        runs.sort();
        assert_eq!(runs, vec!["1", "2", "3", "4", "5", "6"]);
        assert!(rows.iter().all(|r| (r.passed, r.failed) == (1, 1)));
    }

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn append(&mut self, _row: &ReportRow) -> Result<(), ReportError> {
            Err(ReportError::Io(io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_report_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "functions/add/tests_250.txt", "add(1,2) == 3\n");
        write(dir.path(), "results/add/baseline/50_percent/run_1.txt", "int function(int a, int b) { return a + b; }");
        write(dir.path(), "results/add/baseline/50_percent/run_2.txt", "int function(int a, int b) { return a + b; }");

        let err = run_batch(&config_for(dir.path()), &AdderBuilder, &mut FailingSink).unwrap_err();
        assert!(matches!(err, EvalError::Report(_)));
    }

    #[test]
    fn test_missing_results_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows: Vec<ReportRow> = Vec::new();
        let err = run_batch(&config_for(dir.path()), &AdderBuilder, &mut rows).unwrap_err();
        assert!(matches!(err, EvalError::Discovery { .. }));
    }
}
