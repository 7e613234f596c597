//! Discovery of candidate submissions in the results tree.
//!
//! Layout: `<results>/<function>/<method>/<percentage>_percent/run_<n>.txt`. Entries are sorted
//! by name at every level so batches are reproducible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::report::RunKey;

const PERCENT_SUFFIX: &str = "_percent";
const RUN_PREFIX: &str = "run_";
const RUN_EXTENSION: &str = "txt";

/// A candidate submission file and the run it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateJob {
    pub key: RunKey,
    pub path: PathBuf,
}

/// Walk `results_dir` and list every run file.
///
/// Only an unreadable root is an error. Unreadable subdirectories are logged and skipped.
pub fn discover_candidates(results_dir: &Path) -> io::Result<Vec<CandidateJob>> {
    let mut jobs = Vec::new();

    for function_dir in sorted_entries(results_dir)?.into_iter().filter(|p| p.is_dir()) {
        let function = file_name(&function_dir);
        for method_dir in subdirectories(&function_dir) {
            let method = file_name(&method_dir);
            for percentage_dir in subdirectories(&method_dir) {
                let dir_name = file_name(&percentage_dir);
                let percentage = dir_name.strip_suffix(PERCENT_SUFFIX).unwrap_or(&dir_name).to_string();
                for path in run_files(&percentage_dir) {
                    let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
                    let run = stem.strip_prefix(RUN_PREFIX).unwrap_or(&stem).to_string();
                    jobs.push(CandidateJob {
                        key: RunKey::new(function.clone(), method.clone(), percentage.clone(), run),
                        path,
                    });
                }
            }
        }
    }

    tracing::debug!(count = jobs.len(), root = %results_dir.display(), "discovered candidates");
    Ok(jobs)
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    Ok(paths)
}

fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    match sorted_entries(dir) {
        Ok(paths) => paths.into_iter().filter(|p| p.is_dir()).collect(),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            Vec::new()
        }
    }
}

fn run_files(dir: &Path) -> Vec<PathBuf> {
    match sorted_entries(dir) {
        Ok(paths) => paths
            .into_iter()
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == RUN_EXTENSION))
            .collect(),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            Vec::new()
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
}
