//! Process runner: one child process per test case, bounded by a wall-clock timeout.
//!
//! Only the first stdout line matters. Stdout is drained on a helper thread so a chatty child
//! cannot block on a full pipe; stderr is discarded. When the deadline passes the child is killed
//! and the outcome is [`Outcome::Timeout`].

use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::harness::ERROR_MARKER;

const POLL_INTERVAL: Duration = Duration::from_millis(5);
/// Time allowed to collect output that was written just before the child exited.
const OUTPUT_GRACE: Duration = Duration::from_millis(50);

/// Result of executing a harness once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First line of standard output.
    Output(String),
    /// The deadline passed and the process was killed.
    Timeout,
    /// Launch/I-O failure, missing output, or a diagnostic-marker line from the harness.
    Error(String),
}

impl Outcome {
    /// The observed value, if any. Only [`Outcome::Output`] carries one.
    pub fn value(&self) -> Option<&str> {
        match self {
            Outcome::Output(line) => Some(line),
            Outcome::Timeout | Outcome::Error(_) => None,
        }
    }

    /// Classify a first stdout line (or its absence).
    pub fn from_first_line(line: Option<String>) -> Self {
        match line {
            Some(line) if line.starts_with(ERROR_MARKER) => Outcome::Error(line),
            Some(line) => Outcome::Output(line),
            None => Outcome::Error("no output".to_string()),
        }
    }
}

/// Anything that can run a compiled harness with an argument list.
pub trait Executor {
    fn execute(&self, args: &[String]) -> Outcome;
}

/// Errors while driving a child process.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for child process: {0}")]
    Wait(#[source] io::Error),
}

/// Runs `<runtime> -cp . <unit> <args...>` inside a workspace directory.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    runtime: String,
    workdir: PathBuf,
    unit_name: String,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(runtime: impl Into<String>, workdir: &Path, unit_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runtime: runtime.into(),
            workdir: workdir.to_path_buf(),
            unit_name: unit_name.into(),
            timeout,
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.runtime);
        cmd.arg("-cp")
            .arg(".")
            .arg(&self.unit_name)
            .args(args)
            .current_dir(&self.workdir);
        cmd
    }

    /// Run once and return the outcome, or the process error that prevented one.
    pub fn try_execute(&self, args: &[String]) -> Result<Outcome, RunError> {
        run_with_timeout(self.command(args), &self.runtime, self.timeout)
    }
}

impl Executor for ProcessRunner {
    fn execute(&self, args: &[String]) -> Outcome {
        match self.try_execute(args) {
            Ok(outcome) => outcome,
            Err(err) => Outcome::Error(err.to_string()),
        }
    }
}

/// Spawn `cmd`, wait up to `timeout`, and classify its first stdout line.
///
/// The whole call is bounded by `timeout` (plus a short grace for reading output after exit),
/// even when a grandchild inherits the stdout pipe and keeps it open.
pub fn run_with_timeout(mut cmd: Command, label: &str, timeout: Duration) -> Result<Outcome, RunError> {
    let started = Instant::now();
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| RunError::Spawn {
            command: label.to_string(),
            source,
        })?;

    // The reader is detached; it sends the first line as soon as it has one and then drains
    // until every holder of the pipe is gone.
    let (tx, rx) = mpsc::channel();
    if let Some(stdout) = child.stdout.take() {
        thread::spawn(move || read_first_line(stdout, tx));
    }

    if !wait_until(&mut child, timeout)? {
        return Ok(Outcome::Timeout);
    }

    let remaining = timeout.saturating_sub(started.elapsed()).max(OUTPUT_GRACE);
    let first_line = rx.recv_timeout(remaining).unwrap_or(None);
    Ok(Outcome::from_first_line(first_line))
}

/// Wait for `child` to exit. Returns `false` (after killing it) if the deadline passed first.
fn wait_until(child: &mut Child, timeout: Duration) -> Result<bool, RunError> {
    let started = Instant::now();
    loop {
        match child.try_wait().map_err(RunError::Wait)? {
            Some(_status) => return Ok(true),
            None if started.elapsed() >= timeout => {
                let _ = child.kill();
                child.wait().map_err(RunError::Wait)?;
                return Ok(false);
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

fn read_first_line(stdout: ChildStdout, tx: Sender<Option<String>>) {
    let mut reader = BufReader::new(stdout);
    let mut line = String::new();
    let first = match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    };
    let _ = tx.send(first);
    // Drain the rest so the child never blocks on a full pipe.
    let _ = io::copy(&mut reader, &mut io::sink());
}
