//! Property-based tests for synthcheck
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use synthcheck::eval::{Verdict, compare};
use synthcheck::syntax::splitter::split_arguments;

const TOL: f64 = 1e-6;

// =============================================================================
// Strategies
// =============================================================================

/// A single argument token as it appears in an oracle line.
fn argument_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-99_999i32..99_999).prop_map(|n| n.to_string()),
        prop::collection::vec(-999i32..999, 0..5).prop_map(|xs| {
            let items: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
            format!("[{}]", items.join(", "))
        }),
        "[a-z ,\\[\\]]{0,8}".prop_map(|s| format!("\"{}\"", s)),
    ]
}

// =============================================================================
// Splitter Properties
// =============================================================================

proptest! {
    /// Property: joining tokens with commas and splitting gives the tokens back
    #[test]
    fn split_recovers_joined_tokens(args in prop::collection::vec(argument_strategy(), 0..6)) {
        let joined = args.join(", ");
        prop_assert_eq!(split_arguments(&joined), args);
    }

    /// Property: every token is trimmed and the split never panics
    #[test]
    fn split_tokens_are_trimmed(input in "\\PC{0,40}") {
        for token in split_arguments(&input) {
            prop_assert_eq!(token.trim(), token.as_str());
        }
    }
}

// =============================================================================
// Comparator Properties
// =============================================================================

proptest! {
    /// Property: a printed number always matches itself
    #[test]
    fn number_matches_itself(x in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let text = x.to_string();
        prop_assert_eq!(compare(Some(&text), &text, TOL), Verdict::Passed);
    }

    /// Property: integers one apart never match
    #[test]
    fn distinct_integers_fail(n in -1_000_000i64..1_000_000) {
        let expected = (n + 1).to_string();
        prop_assert_eq!(compare(Some(&n.to_string()), &expected, TOL), Verdict::Failed);
    }

    /// Property: quotes around the expected literal are ignored for text
    #[test]
    fn quoted_text_matches_unquoted_output(s in "[p-z]{1,8}") {
        let expected = format!("\"{}\"", s);
        prop_assert_eq!(compare(Some(&s), &expected, TOL), Verdict::Passed);
    }

    /// Property: no observed value never passes
    #[test]
    fn missing_output_fails(expected in "\\PC{0,20}") {
        prop_assert_eq!(compare(None, &expected, TOL), Verdict::Failed);
    }
}
