//! Effectiveness summary over a report.
//!
//! For every row the verification rate is `passed / (passed + failed) * 100`. Rates are averaged
//! per (function, method, percentage), and those means are averaged again per (method, percentage)
//! so every function weighs the same regardless of how many runs it has.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::ReportRow;
use crate::eval::Tally;

/// Mean verification rate of one function under one method and percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSummary {
    pub function: String,
    pub method: String,
    pub percentage: u32,
    pub runs: usize,
    pub mean_pass_rate: f64,
}

/// Mean of the per-function means for one method and percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub percentage: u32,
    pub functions: usize,
    pub mean_pass_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub per_function: Vec<FunctionSummary>,
    pub per_method: Vec<MethodSummary>,
}

/// Summarise report rows. Rows with a non-numeric percentage or no counted cases are skipped.
pub fn summarize(rows: &[ReportRow]) -> Summary {
    let mut by_function: BTreeMap<(String, String, u32), Vec<f64>> = BTreeMap::new();

    for row in rows {
        let Ok(percentage) = row.percentage.trim().parse::<u32>() else {
            tracing::warn!(percentage = %row.percentage, function = %row.function, "skipping row with non-numeric percentage");
            continue;
        };
        let tally = Tally {
            passed: row.passed,
            failed: row.failed,
        };
        let Some(rate) = tally.pass_rate() else {
            continue;
        };
        by_function
            .entry((row.method.clone(), row.function.clone(), percentage))
            .or_default()
            .push(rate);
    }

    let per_function: Vec<FunctionSummary> = by_function
        .into_iter()
        .map(|((method, function, percentage), rates)| FunctionSummary {
            function,
            method,
            percentage,
            runs: rates.len(),
            mean_pass_rate: mean(&rates),
        })
        .collect();

    let mut by_method: BTreeMap<(String, u32), Vec<f64>> = BTreeMap::new();
    for entry in &per_function {
        by_method
            .entry((entry.method.clone(), entry.percentage))
            .or_default()
            .push(entry.mean_pass_rate);
    }

    let per_method = by_method
        .into_iter()
        .map(|((method, percentage), means)| MethodSummary {
            method,
            percentage,
            functions: means.len(),
            mean_pass_rate: mean(&means),
        })
        .collect();

    Summary {
        per_function,
        per_method,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {:>10} {:>10} {:>12}", "Method", "Percentage", "Functions", "Verified %")?;
        for entry in &self.per_method {
            writeln!(
                f,
                "{:<16} {:>10} {:>10} {:>12.2}",
                entry.method, entry.percentage, entry.functions, entry.mean_pass_rate
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RunKey;

    fn row(function: &str, method: &str, percentage: &str, run: &str, passed: usize, failed: usize) -> ReportRow {
        RunKey::new(function, method, percentage, run).row(Tally { passed, failed })
    }

    #[test]
    fn test_means_per_function_then_per_method() {
        let rows = vec![
            row("add", "baseline", "25", "1", 100, 0),
            row("add", "baseline", "25", "2", 50, 50),
            row("gcd", "baseline", "25", "1", 0, 100),
            row("gcd", "decomposition", "25", "1", 25, 75),
        ];
        let summary = summarize(&rows);

        assert_eq!(summary.per_function.len(), 3);
        let add = &summary.per_function[0];
        assert_eq!((add.function.as_str(), add.runs, add.mean_pass_rate), ("add", 2, 75.0));

        assert_eq!(summary.per_method.len(), 2);
        let baseline = &summary.per_method[0];
        assert_eq!(baseline.method, "baseline");
        assert_eq!(baseline.functions, 2);
        assert_eq!(baseline.mean_pass_rate, 37.5);
        assert_eq!(summary.per_method[1].mean_pass_rate, 25.0);
    }

    #[test]
    fn test_skips_unusable_rows() {
        let rows = vec![row("add", "baseline", "n/a", "1", 1, 0), row("add", "baseline", "25", "1", 0, 0)];
        assert_eq!(summarize(&rows), Summary::default());
    }

    #[test]
    fn test_percentages_sort_numerically() {
        let rows = vec![
            row("add", "baseline", "100", "1", 1, 0),
            row("add", "baseline", "25", "1", 1, 0),
        ];
        let summary = summarize(&rows);
        let order: Vec<u32> = summary.per_method.iter().map(|m| m.percentage).collect();
        assert_eq!(order, vec![25, 100]);
    }

    #[test]
    fn test_display_table() {
        let summary = summarize(&[row("add", "baseline", "50", "1", 1, 1)]);
        let text = summary.to_string();
        assert!(text.starts_with("Method"));
        assert!(text.contains("baseline"));
        assert!(text.contains("50.00"));
    }
}
