//! The report: an append-only CSV with one row per evaluated candidate.
//!
//! Columns are fixed: `Function,Method,Percentage,Run,Passed,Failed`. The header is written only
//! when the file is new or empty, and every row is flushed as soon as it is appended so rows
//! computed before a later failure survive.

pub mod summary;

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::Tally;

/// Report column names, in order.
pub const HEADER: [&str; 6] = ["Function", "Method", "Percentage", "Run", "Passed", "Failed"];

/// Errors reading or writing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("report CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Identity of one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunKey {
    pub function: String,
    pub method: String,
    pub percentage: String,
    pub run: String,
}

impl RunKey {
    pub fn new(
        function: impl Into<String>,
        method: impl Into<String>,
        percentage: impl Into<String>,
        run: impl Into<String>,
    ) -> Self {
        Self {
            function: function.into(),
            method: method.into(),
            percentage: percentage.into(),
            run: run.into(),
        }
    }

    /// The terminal report row for this run.
    pub fn row(&self, tally: Tally) -> ReportRow {
        ReportRow {
            function: self.function.clone(),
            method: self.method.clone(),
            percentage: self.percentage.clone(),
            run: self.run.clone(),
            passed: tally.passed,
            failed: tally.failed,
        }
    }
}

impl fmt::Display for RunKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.function, self.method, self.percentage, self.run)
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportRow {
    pub function: String,
    pub method: String,
    pub percentage: String,
    pub run: String,
    pub passed: usize,
    pub failed: usize,
}

/// Append-only CSV report writer.
pub struct ReportWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// Open `path` for appending, writing the header if the file is new or empty.
    pub fn open_append(path: &Path) -> Result<Self, ReportError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        Self::from_writer(file, is_empty)
    }
}

impl<W: io::Write> ReportWriter<W> {
    pub fn from_writer(inner: W, write_header: bool) -> Result<Self, ReportError> {
        let writer = csv::WriterBuilder::new().has_headers(false).from_writer(inner);
        let mut report = Self { writer };
        if write_header {
            report.writer.write_record(HEADER)?;
            report.writer.flush()?;
        }
        Ok(report)
    }

    /// Append and flush one row.
    pub fn append(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, ReportError> {
        self.writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
    }
}

/// Destination for report rows.
///
/// The batch driver appends from a single place; implementors decide how rows are persisted.
pub trait ReportSink {
    fn append(&mut self, row: &ReportRow) -> Result<(), ReportError>;
}

impl<W: io::Write> ReportSink for ReportWriter<W> {
    fn append(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        ReportWriter::append(self, row)
    }
}

impl ReportSink for Vec<ReportRow> {
    fn append(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.push(row.clone());
        Ok(())
    }
}

/// Read every row of a report file.
pub fn read_rows(path: &Path) -> Result<Vec<ReportRow>, ReportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<ReportRow>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(run: &str, passed: usize, failed: usize) -> ReportRow {
        RunKey::new("add", "baseline", "25", run).row(Tally { passed, failed })
    }

    #[test]
    fn test_header_and_rows_in_column_order() {
        let mut report = ReportWriter::from_writer(Vec::new(), true).unwrap();
        report.append(&row("1", 240, 10)).unwrap();
        report.append(&row("2", 0, 250)).unwrap();
        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "Function,Method,Percentage,Run,Passed,Failed\nadd,baseline,25,1,240,10\nadd,baseline,25,2,0,250\n"
        );
    }

    #[test]
    fn test_open_append_never_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        let mut first = ReportWriter::open_append(&path).unwrap();
        first.append(&row("1", 1, 0)).unwrap();
        drop(first);

        let mut second = ReportWriter::open_append(&path).unwrap();
        second.append(&row("2", 0, 1)).unwrap();
        drop(second);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Function,Method,Percentage,Run,Passed,Failed\nadd,baseline,25,1,1,0\nadd,baseline,25,2,0,1\n"
        );
        assert_eq!(read_rows(&path).unwrap(), vec![row("1", 1, 0), row("2", 0, 1)]);
    }

    #[test]
    fn test_run_key_display() {
        assert_eq!(RunKey::new("gcd", "decomposition", "50", "3").to_string(), "gcd/decomposition/50/3");
    }
}
