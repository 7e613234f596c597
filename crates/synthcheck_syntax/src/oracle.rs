//! Oracle files: one test case per line, `name(arg, arg, ...) == expected`.
//!
//! ## Notes
//! - The call's closing parenthesis is located by matching, not by searching for `") "`, so quoted
//!   arguments may contain parentheses and `==`.
//! - The expected literal is kept verbatim (trimmed). Quote stripping and decimal-comma handling
//!   belong to the comparator.
//! - Blank lines are not test cases. Any other line that does not match the grammar is still a test
//!   case, reported as [`OracleEntry::Malformed`] so the caller can count it as failed.

use crate::errors::SyntaxError;
use crate::splitter::split_arguments;

/// A single input/expected-output assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The oracle line this case was read from (trimmed).
    pub line: String,
    /// Name of the called function.
    pub name: String,
    /// Raw text between the call's parentheses.
    pub arguments: String,
    /// Expected literal, verbatim.
    pub expected: String,
}

impl TestCase {
    /// Top-level argument tokens of the call.
    pub fn args(&self) -> Vec<String> {
        split_arguments(&self.arguments)
    }
}

/// One non-blank oracle line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleEntry {
    Case(TestCase),
    Malformed(SyntaxError),
}

/// Parse every non-blank line of an oracle file.
pub fn parse_oracle(source: &str) -> Vec<OracleEntry> {
    source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match parse_test_case(line) {
            Ok(case) => OracleEntry::Case(case),
            Err(err) => {
                tracing::debug!(line, error = %err, "malformed oracle line");
                OracleEntry::Malformed(err)
            }
        })
        .collect()
}

/// Parse a single `name(args) == expected` line.
pub fn parse_test_case(line: &str) -> Result<TestCase, SyntaxError> {
    let line = line.trim();

    let open = line
        .find('(')
        .ok_or_else(|| SyntaxError::malformed(line, "missing `(`"))?;
    let name = line[..open].trim();
    if name.is_empty() {
        return Err(SyntaxError::malformed(line, "missing function name"));
    }

    let close = matching_paren(line, open).ok_or_else(|| SyntaxError::malformed(line, "unbalanced parentheses"))?;
    let arguments = line[open + 1..close].trim();

    let rest = line[close + 1..].trim_start();
    let Some(expected) = rest.strip_prefix("==") else {
        return Err(SyntaxError::malformed(line, "missing `==` after the call"));
    };
    let expected = expected.trim();
    if expected.is_empty() {
        return Err(SyntaxError::malformed(line, "missing expected value"));
    }

    Ok(TestCase {
        line: line.to_string(),
        name: name.to_string(),
        arguments: arguments.to_string(),
        expected: expected.to_string(),
    })
}

/// Byte index of the `)` matching the `(` at `open`, ignoring parentheses inside quotes.
fn matching_paren(line: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for (idx, c) in line[open..].char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}
