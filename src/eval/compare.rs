//! Output comparison: numeric with tolerance first, exact text second.
//!
//! 1. No observed value (timeout, error, empty output) fails.
//! 2. The expected literal is trimmed and stripped of `"` characters.
//! 3. If both sides parse as floating-point numbers (the expected side after turning `,` into
//!    `.`), they pass when equal or within the absolute tolerance. Numbers are read as the JVM
//!    reads them: a trailing `d`/`f` suffix is allowed and only `Infinity`/`NaN` name non-finite
//!    values.
//! 4. Otherwise the trimmed observed text must equal the normalised expected text.

/// Result of comparing one outcome against its expected literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Passed
    }

    fn from_bool(passed: bool) -> Self {
        if passed { Verdict::Passed } else { Verdict::Failed }
    }
}

/// Trim the expected literal and drop its quote characters.
pub fn normalize_expected(expected: &str) -> String {
    expected.trim().replace('"', "")
}

/// Parse the expected side, accepting a decimal comma.
pub fn parse_expected_number(expected: &str) -> Option<f64> {
    parse_java_double(&expected.trim().replace(',', "."))
}

/// Parse the observed side.
pub fn parse_actual_number(actual: &str) -> Option<f64> {
    parse_java_double(actual)
}

/// Parse a number the way a JVM `parseDouble` reads it.
///
/// A single trailing `d`/`D`/`f`/`F` suffix is dropped. `Infinity` and `NaN` are only accepted
/// with that exact spelling; `inf`, `nan` and other case variants stay text.
fn parse_java_double(text: &str) -> Option<f64> {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" || unsigned == "NaN" {
        return text.parse::<f64>().ok();
    }

    let body = match unsigned.strip_suffix(['d', 'D', 'f', 'F']) {
        Some(rest) if !rest.is_empty() => &text[..text.len() - 1],
        _ => text,
    };
    let numeric = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return None;
    }
    body.parse::<f64>().ok()
}

/// Compare an observed value with an expected literal.
pub fn compare(actual: Option<&str>, expected: &str, tolerance: f64) -> Verdict {
    let Some(actual) = actual else {
        return Verdict::Failed;
    };

    let expected = normalize_expected(expected);
    match (parse_expected_number(&expected), parse_actual_number(actual)) {
        (Some(want), Some(got)) => Verdict::from_bool(want == got || (want - got).abs() <= tolerance),
        _ => Verdict::from_bool(actual.trim() == expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_missing_value_fails() {
        assert_eq!(compare(None, "5", TOL), Verdict::Failed);
    }

    #[test]
    fn test_integer_match() {
        assert_eq!(compare(Some("5"), "5", TOL), Verdict::Passed);
        assert_eq!(compare(Some("5.0"), "5", TOL), Verdict::Passed);
    }

    #[test]
    fn test_decimal_comma_expected() {
        assert_eq!(compare(Some("3.141590"), "3,14159", TOL), Verdict::Passed);
    }

    #[test]
    fn test_outside_tolerance_fails() {
        assert_eq!(compare(Some("1.0001"), "1.0", TOL), Verdict::Failed);
    }

    #[test]
    fn test_within_tolerance_passes() {
        assert_eq!(compare(Some("0.30000000000000004"), "0.3", TOL), Verdict::Passed);
    }

    #[test]
    fn test_scientific_notation_output() {
        assert_eq!(compare(Some("1.0E-7"), "0", TOL), Verdict::Passed);
    }

    #[test]
    fn test_quoted_text_expected() {
        assert_eq!(compare(Some("hello"), "\"hello\"", TOL), Verdict::Passed);
        assert_eq!(compare(Some("  hello "), " \"hello\" ", TOL), Verdict::Passed);
        assert_eq!(compare(Some("Hello"), "\"hello\"", TOL), Verdict::Failed);
    }

    #[test]
    fn test_boolean_text() {
        assert_eq!(compare(Some("true"), "true", TOL), Verdict::Passed);
        assert_eq!(compare(Some("false"), "true", TOL), Verdict::Failed);
    }

    #[test]
    fn test_number_vs_text_falls_back_to_string() {
        assert_eq!(compare(Some("five"), "5", TOL), Verdict::Failed);
        assert_eq!(compare(Some("[1, 2]"), "[1, 2]", TOL), Verdict::Passed);
    }

    #[test]
    fn test_infinities_compare_equal() {
        assert_eq!(compare(Some("Infinity"), "Infinity", TOL), Verdict::Passed);
        assert_eq!(compare(Some("NaN"), "NaN", TOL), Verdict::Failed);
    }

    #[test]
    fn test_java_type_suffix_is_numeric() {
        assert_eq!(compare(Some("2.0"), "2d", TOL), Verdict::Passed);
        assert_eq!(compare(Some("1.5"), "1.5f", TOL), Verdict::Passed);
        assert_eq!(compare(Some("1.0"), "1.0D", TOL), Verdict::Passed);
        assert_eq!(parse_actual_number("2F"), Some(2.0));
        assert_eq!(parse_actual_number("f"), None);
    }

    #[test]
    fn test_non_java_infinity_spellings_stay_text() {
        assert_eq!(parse_actual_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_actual_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert!(parse_actual_number("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_actual_number("inf"), None);
        assert_eq!(parse_actual_number("infinity"), None);
        assert_eq!(parse_actual_number("nan"), None);
        assert_eq!(parse_expected_number("INF"), None);

        // Equal as text only.
        assert_eq!(compare(Some("inf"), "inf", TOL), Verdict::Passed);
        assert_eq!(compare(Some("inf"), "Infinity", TOL), Verdict::Failed);
    }

    #[test]
    fn test_exponent_forms_still_parse() {
        assert_eq!(parse_actual_number("1e5"), Some(100000.0));
        assert_eq!(parse_actual_number("-2.5E-3"), Some(-0.0025));
        assert_eq!(parse_expected_number(" 1,5e2 "), Some(150.0));
    }

    #[test]
    fn test_verdict_is_pass() {
        assert!(Verdict::Passed.is_pass());
        assert!(!Verdict::Failed.is_pass());
    }
}
