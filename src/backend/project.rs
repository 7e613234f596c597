//! Harness workspaces and the compiler invocation.
//!
//! Each candidate gets its own temporary directory holding the harness source and the compiled
//! artifacts. The directory is removed when the [`HarnessWorkspace`] is dropped, whether the
//! compilation succeeded or not, so candidates never share a working-directory slot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;
use thiserror::Error;

use super::harness::HarnessProgram;

/// Errors raised while preparing or compiling a harness.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to prepare workspace: {0}")]
    Workspace(#[source] io::Error),

    #[error("failed to launch compiler `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("compilation failed:\n{stderr}")]
    Rejected { stderr: String },
}

/// Scoped scratch directory for one harness program.
#[derive(Debug)]
pub struct HarnessWorkspace {
    dir: TempDir,
    source_file: PathBuf,
}

impl HarnessWorkspace {
    /// Create a fresh directory and write the harness source into it.
    ///
    /// `label` only decorates the directory name; uniqueness comes from the temp-dir suffix.
    pub fn create(label: &str, program: &HarnessProgram) -> io::Result<Self> {
        let prefix = format!("synthcheck-{}-", sanitize_label(label));
        let dir = tempfile::Builder::new().prefix(&prefix).tempdir()?;
        let source_file = dir.path().join(program.file_name());
        fs::write(&source_file, &program.source)?;
        tracing::debug!(path = %source_file.display(), "wrote harness source");
        Ok(Self { dir, source_file })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }
}

/// Result of a compiler run.
#[derive(Debug)]
pub struct BuildResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// External compiler and runtime commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub compiler: String,
    pub runtime: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: "javac".to_string(),
            runtime: "java".to_string(),
        }
    }
}

impl Toolchain {
    pub fn new(compiler: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            compiler: compiler.into(),
            runtime: runtime.into(),
        }
    }

    /// Compile the workspace's harness source in place.
    pub fn compile(&self, workspace: &HarnessWorkspace) -> Result<BuildResult, CompileError> {
        let file_name = workspace
            .source_file()
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        let output = Command::new(&self.compiler)
            .arg(file_name)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CompileError::Launch {
                command: self.compiler.clone(),
                source,
            })?;

        Ok(BuildResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Compile and turn a rejected build into an error.
    pub fn compile_checked(&self, workspace: &HarnessWorkspace) -> Result<(), CompileError> {
        let build = self.compile(workspace)?;
        if build.success {
            Ok(())
        } else {
            let stderr = if build.stderr.trim().is_empty() {
                build.stdout
            } else {
                build.stderr
            };
            Err(CompileError::Rejected { stderr })
        }
    }
}

/// Keep directory labels to a portable character set.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
