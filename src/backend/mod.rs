//! synthcheck backend: turn a prepared candidate into something that can be executed.
//!
//! The pipeline is:
//! 1. Candidate → `harness::assemble` → harness source (pure)
//! 2. Source → `project::HarnessWorkspace` → private scratch directory
//! 3. Workspace → `project::Toolchain::compile_checked` → compiled unit
//! 4. Compiled unit → `runner::ProcessRunner` → one [`Outcome`] per argument list
//!
//! ## Module Organization
//!
//! - `harness.rs` - Harness source builder and the diagnostic marker
//! - `project.rs` - Scoped workspaces and the compiler invocation
//! - `runner.rs` - Child-process execution with timeout

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod harness;
pub mod project;
pub mod runner;

use std::time::Duration;

pub use harness::{ERROR_MARKER, HarnessProgram, assemble};
pub use project::{BuildResult, CompileError, HarnessWorkspace, Toolchain};
pub use runner::{Executor, Outcome, ProcessRunner, RunError};

/// Compiles harness programs into executable units.
///
/// The default implementation shells out to the configured toolchain; tests substitute scripted
/// builders so the evaluation pipeline can be exercised without a compiler.
pub trait HarnessBuilder {
    type Unit: Executor;

    /// Compile `program`. `label` identifies the candidate in workspace names and logs.
    fn build(&self, label: &str, program: &HarnessProgram) -> Result<Self::Unit, CompileError>;
}

/// A compiled harness and the workspace that owns its artifacts.
///
/// Dropping it removes the workspace.
#[derive(Debug)]
pub struct CompiledHarness {
    runner: ProcessRunner,
    workspace: HarnessWorkspace,
}

impl CompiledHarness {
    pub fn workspace(&self) -> &HarnessWorkspace {
        &self.workspace
    }
}

impl Executor for CompiledHarness {
    fn execute(&self, args: &[String]) -> Outcome {
        self.runner.execute(args)
    }
}

/// Builder backed by an external compiler and runtime.
#[derive(Debug, Clone)]
pub struct ToolchainBuilder {
    toolchain: Toolchain,
    timeout: Duration,
}

impl ToolchainBuilder {
    pub fn new(toolchain: Toolchain, timeout: Duration) -> Self {
        Self { toolchain, timeout }
    }
}

impl HarnessBuilder for ToolchainBuilder {
    type Unit = CompiledHarness;

    fn build(&self, label: &str, program: &HarnessProgram) -> Result<CompiledHarness, CompileError> {
        let workspace = HarnessWorkspace::create(label, program).map_err(CompileError::Workspace)?;
        self.toolchain.compile_checked(&workspace)?;
        let runner = ProcessRunner::new(&self.toolchain.runtime, workspace.path(), &program.unit_name, self.timeout);
        Ok(CompiledHarness { runner, workspace })
    }
}
