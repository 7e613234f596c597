//! Derive a candidate's parameter types from its textual signature.
//!
//! The header is everything before the first `{`. Parameters are the text between the first `(`
//! and the following `)`, split on commas; each parameter's first whitespace-separated token is
//! its declared type. Parameter lists are not expected to contain nested brackets.

use crate::errors::SyntaxError;

/// Declared parameter type accepted by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    Double,
    IntArray,
    DoubleArray,
    Text,
}

impl ParamType {
    /// Map a declared type token to a supported type.
    pub fn from_declared(declared: &str) -> Option<Self> {
        match declared {
            "int" => Some(ParamType::Int),
            "double" => Some(ParamType::Double),
            "int[]" => Some(ParamType::IntArray),
            "double[]" => Some(ParamType::DoubleArray),
            "String" => Some(ParamType::Text),
            _ => None,
        }
    }

    /// Type name as written in generated source.
    pub fn source_name(self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Double => "double",
            ParamType::IntArray => "int[]",
            ParamType::DoubleArray => "double[]",
            ParamType::Text => "String",
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, ParamType::IntArray | ParamType::DoubleArray)
    }
}

/// A parameter with its synthetic harness-side name (`param0`, `param1`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: ParamType,
    pub name: String,
}

/// Parameter descriptor plus the declared return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Declared return type token, empty when the header has none (e.g. a bare constructor).
    pub return_type: String,
    pub params: Vec<Param>,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `true` when the return value is an array and must be printed element-wise.
    pub fn returns_array(&self) -> bool {
        self.return_type.ends_with("[]")
    }
}

/// Extract the signature from candidate source whose function has already been renamed.
pub fn extract_signature(source: &str) -> Result<Signature, SyntaxError> {
    let header = match source.find('{') {
        Some(brace) => source[..brace].trim(),
        None => {
            return Err(SyntaxError::MissingBody {
                header: first_line(source).to_string(),
            });
        }
    };

    let missing_params = || SyntaxError::MissingParameterList {
        header: header.to_string(),
    };
    let open = header.find('(').ok_or_else(missing_params)?;
    let close = header[open..].find(')').map(|off| open + off).ok_or_else(missing_params)?;

    let return_type = header[..open]
        .split_whitespace()
        .rev()
        .nth(1)
        .unwrap_or_default()
        .to_string();

    let params_text = header[open + 1..close].trim();
    if params_text.is_empty() {
        return Ok(Signature {
            return_type,
            params: Vec::new(),
        });
    }

    let params = params_text
        .split(',')
        .enumerate()
        .map(|(position, param)| {
            let declared = param.split_whitespace().next().unwrap_or_default();
            ParamType::from_declared(declared)
                .map(|ty| Param {
                    ty,
                    name: format!("param{}", position),
                })
                .ok_or_else(|| SyntaxError::UnsupportedType {
                    declared: declared.to_string(),
                    position,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Signature { return_type, params })
}

fn first_line(source: &str) -> &str {
    source.lines().next().unwrap_or_default().trim()
}
