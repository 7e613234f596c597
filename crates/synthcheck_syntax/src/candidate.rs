//! Candidate submissions: raw model responses turned into named, typed function source.
//!
//! Preparation is three steps, each a pure function of its input:
//! 1. [`strip_code_fence`] removes a surrounding Markdown code fence, if any.
//! 2. [`substitute_placeholder`] renames the placeholder function to the real function name.
//! 3. [`extract_signature`] derives the parameter descriptor.

use crate::errors::SyntaxError;
use crate::signature::{Signature, extract_signature};

const FENCE: &str = "```";

/// A candidate ready for harness assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Real function name the oracle calls.
    pub name: String,
    /// Function source with the placeholder renamed.
    pub source: String,
    pub signature: Signature,
}

impl Candidate {
    /// Prepare a raw submission for assembly.
    pub fn prepare(raw: &str, placeholder: &str, name: &str) -> Result<Self, SyntaxError> {
        let code = strip_code_fence(raw);
        if code.is_empty() {
            return Err(SyntaxError::EmptyCandidate);
        }
        let source = substitute_placeholder(code, placeholder, name);
        let signature = extract_signature(&source)?;
        Ok(Candidate {
            name: name.to_string(),
            source,
            signature,
        })
    }
}

/// Return the code inside the first fence pair, or the trimmed input when it is not fenced.
///
/// The opening fence may carry a language tag (```` ```java ````); the closing fence is the last
/// one in the text. An opening fence without a closing one is stripped on its own.
pub fn strip_code_fence(raw: &str) -> &str {
    let Some(start) = raw.find(FENCE) else {
        return raw.trim();
    };
    let after_open = &raw[start + FENCE.len()..];
    let body = match after_open.find('\n') {
        Some(nl) if is_fence_tag(&after_open[..nl]) => &after_open[nl + 1..],
        _ => after_open,
    };
    match body.rfind(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn is_fence_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '#' | '.'))
}

/// Rename `placeholder` to `name` where it appears as an identifier in call or declaration
/// position (`placeholder(`), outside string/char literals and comments.
///
/// Substrings of longer identifiers (`functionality`, `myfunction`) and occurrences that are not
/// followed by `(` are left untouched. A literal ends at its closing quote or at the end of the
/// line, so a stray apostrophe cannot swallow the rest of the source.
pub fn substitute_placeholder(code: &str, placeholder: &str, name: &str) -> String {
    if placeholder.is_empty() {
        return code.to_string();
    }

    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len());
    let mut i = 0;
    let mut state = Scan::Code;

    while i < bytes.len() {
        let b = bytes[i];

        match state {
            Scan::Literal(quote) => {
                if b == b'\\' && i + 1 < bytes.len() && bytes[i + 1] != b'\n' {
                    out.push('\\');
                    i += 1;
                } else if b == quote || b == b'\n' {
                    state = Scan::Code;
                }
                push_char_at(code, &mut out, &mut i);
                continue;
            }
            Scan::LineComment => {
                if b == b'\n' {
                    state = Scan::Code;
                }
                push_char_at(code, &mut out, &mut i);
                continue;
            }
            Scan::BlockComment => {
                if code[i..].starts_with("*/") {
                    out.push_str("*/");
                    i += 2;
                    state = Scan::Code;
                } else {
                    push_char_at(code, &mut out, &mut i);
                }
                continue;
            }
            Scan::Code => {}
        }

        if code[i..].starts_with("//") {
            state = Scan::LineComment;
            out.push_str("//");
            i += 2;
            continue;
        }
        if code[i..].starts_with("/*") {
            state = Scan::BlockComment;
            out.push_str("/*");
            i += 2;
            continue;
        }
        if b == b'"' || b == b'\'' {
            state = Scan::Literal(b);
            out.push(b as char);
            i += 1;
            continue;
        }

        if code[i..].starts_with(placeholder)
            && !is_ident_byte_before(bytes, i)
            && is_call_position(code, i + placeholder.len())
        {
            out.push_str(name);
            i += placeholder.len();
            continue;
        }

        push_char_at(code, &mut out, &mut i);
    }

    out
}

/// Scanner state for [`substitute_placeholder`].
#[derive(Clone, Copy)]
enum Scan {
    Code,
    Literal(u8),
    LineComment,
    BlockComment,
}

fn push_char_at(code: &str, out: &mut String, i: &mut usize) {
    // `i` always sits on a char boundary: every branch advances by whole chars or ASCII bytes.
    let ch = code[*i..].chars().next().unwrap_or_default();
    out.push(ch);
    *i += ch.len_utf8().max(1);
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_ident_byte_before(bytes: &[u8], i: usize) -> bool {
    i > 0 && is_ident_byte(bytes[i - 1])
}

fn is_call_position(code: &str, end: usize) -> bool {
    let rest = &code[end..];
    let next_is_ident = rest.as_bytes().first().is_some_and(|b| is_ident_byte(*b));
    !next_is_ident && rest.trim_start().starts_with('(')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let raw = "Here you go:\n```java\nint function(int a) { return a; }\n```\nThanks";
        assert_eq!(strip_code_fence(raw), "int function(int a) { return a; }");
    }

    #[test]
    fn test_strip_fence_without_tag() {
        let raw = "```\nint function() { return 1; }\n```";
        assert_eq!(strip_code_fence(raw), "int function() { return 1; }");
    }

    #[test]
    fn test_strip_unfenced_is_trimmed() {
        assert_eq!(strip_code_fence("  int f() { return 1; }\n\n"), "int f() { return 1; }");
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(strip_code_fence("```int f() { return 1; }```"), "int f() { return 1; }");
    }

    #[test]
    fn test_strip_unclosed_fence() {
        assert_eq!(strip_code_fence("```java\nint f() { return 1; }"), "int f() { return 1; }");
    }

    #[test]
    fn test_substitute_declaration_and_recursive_call() {
        let code = "int function(int n) { return n <= 1 ? 1 : n * function (n - 1); }";
        assert_eq!(
            substitute_placeholder(code, "function", "fact"),
            "int fact(int n) { return n <= 1 ? 1 : n * fact (n - 1); }"
        );
    }

    #[test]
    fn test_substitute_leaves_unrelated_text_alone() {
        let code = "int function(int x) { int functionality = x; String s = \"function(\"; // function\n return functionality + myfunction(x); }";
        let renamed = substitute_placeholder(code, "function", "inc");
        assert_eq!(
            renamed,
            "int inc(int x) { int functionality = x; String s = \"function(\"; // function\n return functionality + myfunction(x); }"
        );
    }

    #[test]
    fn test_substitute_after_apostrophe_in_line_comment() {
        let code = "int function(int n) {\n    // don't recurse below one\n    return n <= 1 ? 1 : n * function(n - 1);\n}";
        assert_eq!(
            substitute_placeholder(code, "function", "fact"),
            "int fact(int n) {\n    // don't recurse below one\n    return n <= 1 ? 1 : n * fact(n - 1);\n}"
        );
    }

    #[test]
    fn test_substitute_skips_comments_verbatim() {
        let code = "/* Here's function(a, b) */\nint function(int a, int b) { return a + b; } // function(x)";
        assert_eq!(
            substitute_placeholder(code, "function", "add"),
            "/* Here's function(a, b) */\nint add(int a, int b) { return a + b; } // function(x)"
        );
    }

    #[test]
    fn test_unterminated_char_literal_ends_at_newline() {
        let code = "char c = ';\nint function() { return 1; }";
        assert_eq!(
            substitute_placeholder(code, "function", "one"),
            "char c = ';\nint one() { return 1; }"
        );
    }

    #[test]
    fn test_prepare_with_leading_comment() {
        let raw = "```java\n// Here's the implementation\npublic static int function(int a, int b) {\n    return a + b;\n}\n```";
        let candidate = Candidate::prepare(raw, "function", "add").unwrap();
        assert!(candidate.source.contains("public static int add(int a, int b)"));
        assert!(!candidate.source.contains("function("));
    }

    #[test]
    fn test_substitute_handles_escaped_quotes_and_unicode() {
        let code = "String function() { return \"\\\"function()\\\" é\"; }";
        assert_eq!(
            substitute_placeholder(code, "function", "quote"),
            "String quote() { return \"\\\"function()\\\" é\"; }"
        );
    }

    #[test]
    fn test_prepare_candidate() {
        let raw = "```java\npublic static int function(int a, int b) {\n    return a + b;\n}\n```";
        let candidate = Candidate::prepare(raw, "function", "add").unwrap();
        assert_eq!(candidate.name, "add");
        assert!(candidate.source.starts_with("public static int add(int a, int b) {"));
        assert_eq!(candidate.signature.arity(), 2);
    }

    #[test]
    fn test_prepare_empty_candidate() {
        assert_eq!(
            Candidate::prepare("```java\n```", "function", "add"),
            Err(SyntaxError::EmptyCandidate)
        );
    }

    #[test]
    fn test_prepare_unsupported_type() {
        let err = Candidate::prepare("int function(Map<String, Integer> m) { return 0; }", "function", "f")
            .unwrap_err();
        assert!(matches!(err, SyntaxError::UnsupportedType { .. }));
    }
}
