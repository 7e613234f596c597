//! Harness assembly: wrap a prepared candidate in a compilable unit with a generated entry point.
//!
//! The assembler is a pure builder (candidate + unit name → source text). Writing the source,
//! compiling it and running it live in `project` and `runner`.
//!
//! ## Generated entry point
//!
//! - Checks the number of command-line tokens against the parameter count.
//! - Converts each token to its declared type (`int`/`double` by literal parsing, arrays by
//!   stripping `[`/`]` and splitting on commas, `String` verbatim). `[]` is an empty array.
//! - Calls the candidate through an instance of the unit, so static and instance methods both work.
//! - Prints the return value as the only stdout line (arrays via `Arrays.toString`).
//! - Catches every `Throwable` and prints one line starting with [`ERROR_MARKER`] instead.

use synthcheck_syntax::{Candidate, ParamType};

/// Prefix of the single diagnostic line the entry point prints on any error.
pub const ERROR_MARKER: &str = "Error: ";

const INDENT: &str = "    ";

/// A complete harness source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessProgram {
    /// Public class name; also the runtime's entry-point argument.
    pub unit_name: String,
    pub source: String,
}

impl HarnessProgram {
    /// File name the compiler expects for this unit.
    pub fn file_name(&self) -> String {
        format!("{}.java", self.unit_name)
    }
}

/// Assemble the harness program for `candidate`.
pub fn assemble(candidate: &Candidate, unit_name: &str) -> HarnessProgram {
    let mut out = String::new();
    out.push_str("import java.util.*;\n\n");
    out.push_str(&format!("public class {} {{\n", unit_name));

    for line in candidate.source.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(INDENT);
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push('\n');

    emit_main(&mut out, candidate, unit_name);

    let params = &candidate.signature.params;
    if params.iter().any(|p| p.ty.is_array()) {
        out.push('\n');
        out.push_str(ARRAY_HELPERS);
    }

    out.push_str("}\n");

    HarnessProgram {
        unit_name: unit_name.to_string(),
        source: out,
    }
}

fn emit_main(out: &mut String, candidate: &Candidate, unit_name: &str) {
    let params = &candidate.signature.params;
    let body = format!("{INDENT}{INDENT}{INDENT}");

    out.push_str(&format!("{INDENT}public static void main(String[] args) {{\n"));
    out.push_str(&format!("{INDENT}{INDENT}try {{\n"));

    out.push_str(&format!("{body}if (args.length != {}) {{\n", params.len()));
    out.push_str(&format!(
        "{body}{INDENT}throw new IllegalArgumentException(\"Expected {} argument(s), got \" + args.length);\n",
        params.len()
    ));
    out.push_str(&format!("{body}}}\n"));

    for (idx, param) in params.iter().enumerate() {
        let conversion = match param.ty {
            ParamType::Int => format!("Integer.parseInt(args[{idx}].trim())"),
            ParamType::Double => format!("Double.parseDouble(args[{idx}].trim())"),
            ParamType::IntArray => format!("harnessIntArray(args[{idx}])"),
            ParamType::DoubleArray => format!("harnessDoubleArray(args[{idx}])"),
            ParamType::Text => format!("args[{idx}]"),
        };
        out.push_str(&format!(
            "{body}{} {} = {};\n",
            param.ty.source_name(),
            param.name,
            conversion
        ));
    }

    let arg_list = params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ");
    let call = format!("new {}().{}({})", unit_name, candidate.name, arg_list);
    let printed = if candidate.signature.returns_array() {
        format!("Arrays.toString({call})")
    } else {
        call
    };
    out.push_str(&format!("{body}System.out.println({printed});\n"));

    out.push_str(&format!("{INDENT}{INDENT}}} catch (Throwable e) {{\n"));
    out.push_str(&format!("{body}System.out.println(\"{ERROR_MARKER}\" + e);\n"));
    out.push_str(&format!("{INDENT}{INDENT}}}\n"));
    out.push_str(&format!("{INDENT}}}\n"));
}

const ARRAY_HELPERS: &str = r#"    private static String harnessArrayBody(String token) {
        String trimmed = token.trim();
        if (!trimmed.startsWith("[") || !trimmed.endsWith("]")) {
            throw new IllegalArgumentException("Expected an array literal, got " + token);
        }
        return trimmed.substring(1, trimmed.length() - 1).trim();
    }

    private static int[] harnessIntArray(String token) {
        String body = harnessArrayBody(token);
        if (body.isEmpty()) {
            return new int[0];
        }
        return Arrays.stream(body.split(",")).map(String::trim).mapToInt(Integer::parseInt).toArray();
    }

    private static double[] harnessDoubleArray(String token) {
        String body = harnessArrayBody(token);
        if (body.isEmpty()) {
            return new double[0];
        }
        return Arrays.stream(body.split(",")).map(String::trim).mapToDouble(Double::parseDouble).toArray();
    }
"#;
