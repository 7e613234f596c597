//! Text frontend for synthcheck: call-expression splitting, oracle lines, candidate signatures.
//!
//! Everything in this crate is pure string processing. It never touches the filesystem or spawns
//! processes, so every edge case of the oracle and candidate formats can be unit tested directly.
//!
//! ## Notes
//! - Oracle lines have the shape `name(arg, arg, ...) == expected`.
//! - Candidates are function-shaped snippets whose declared name is a placeholder.
//! - Supported parameter types are a fixed set, see [`signature::ParamType`].
//!
//! ## Examples
//! ```rust
//! use synthcheck_syntax::{oracle, splitter};
//!
//! let case = oracle::parse_test_case("f([1,2,3], \"a,b\", 4) == 7").unwrap();
//! assert_eq!(case.name, "f");
//! assert_eq!(splitter::split_arguments(&case.arguments), vec!["[1,2,3]", "\"a,b\"", "4"]);
//! ```

pub mod candidate;
pub mod errors;
pub mod oracle;
pub mod signature;
pub mod splitter;

pub use candidate::Candidate;
pub use errors::SyntaxError;
pub use oracle::{OracleEntry, TestCase};
pub use signature::{Param, ParamType, Signature};
