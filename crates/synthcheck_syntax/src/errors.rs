//! Errors raised while reading oracle lines and candidate submissions.
//!
//! Every variant carries the offending text so the CLI can render it as a diagnostic without
//! having to re-read the source file.

use miette::Diagnostic;
use thiserror::Error;

/// Error produced by the text frontend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error("candidate submission is empty")]
    #[diagnostic(
        code(synthcheck::candidate::empty),
        help("the model response contained no code after removing fences")
    )]
    EmptyCandidate,

    #[error("candidate has no body: `{header}` is never followed by `{{`")]
    #[diagnostic(code(synthcheck::signature::missing_body))]
    MissingBody { header: String },

    #[error("candidate signature `{header}` has no parameter list")]
    #[diagnostic(
        code(synthcheck::signature::missing_params),
        help("expected a declaration such as `int function(int a, int b) {{ ... }}`")
    )]
    MissingParameterList { header: String },

    #[error("unsupported parameter type `{declared}` at position {position}")]
    #[diagnostic(
        code(synthcheck::signature::unsupported_type),
        help("supported parameter types are int, double, int[], double[] and String")
    )]
    UnsupportedType { declared: String, position: usize },

    #[error("malformed test case `{line}`: {reason}")]
    #[diagnostic(
        code(synthcheck::oracle::malformed),
        help("test cases have the form `name(arg, arg, ...) == expected`")
    )]
    MalformedTestCase { line: String, reason: String },
}

impl SyntaxError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        SyntaxError::MalformedTestCase {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    /// Return `true` if this error invalidates a whole candidate submission
    /// (as opposed to a single oracle line).
    pub fn is_submission_error(&self) -> bool {
        !matches!(self, SyntaxError::MalformedTestCase { .. })
    }
}
