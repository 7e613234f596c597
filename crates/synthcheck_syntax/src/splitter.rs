//! Split the argument list of a call expression into top-level tokens.
//!
//! A comma separates arguments only at bracket depth 0 and outside double quotes, so array
//! literals (`[1, 2, 3]`) and quoted text containing commas stay intact. Bracket depth is frozen
//! while inside quotes, and a backslash-escaped quote does not toggle the quote state.

/// Split `input` (the text between a call's parentheses) into trimmed argument tokens.
///
/// A blank argument list yields no tokens.
pub fn split_arguments(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
            current.push(c);
            continue;
        }

        match c {
            '"' => in_quotes = true,
            '[' => depth += 1,
            ']' => depth -= 1,
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.is_empty() {
        args.push(current.trim().to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_scalars() {
        assert_eq!(split_arguments("2,3"), vec!["2", "3"]);
        assert_eq!(split_arguments(" 2 ,  3 "), vec!["2", "3"]);
    }

    #[test]
    fn test_split_keeps_arrays_and_quoted_commas() {
        assert_eq!(
            split_arguments("[1,2,3], \"a,b\", 4"),
            vec!["[1,2,3]", "\"a,b\"", "4"]
        );
    }

    #[test]
    fn test_split_nested_arrays() {
        assert_eq!(split_arguments("[[1, 2], [3]], 5"), vec!["[[1, 2], [3]]", "5"]);
    }

    #[test]
    fn test_split_brackets_inside_quotes_do_not_count() {
        assert_eq!(split_arguments("\"[\", 1"), vec!["\"[\"", "1"]);
        assert_eq!(split_arguments("\"a]b,c\", [1, 2]"), vec!["\"a]b,c\"", "[1, 2]"]);
    }

    #[test]
    fn test_split_escaped_quote_stays_inside_string() {
        assert_eq!(
            split_arguments(r#""say \"hi, there\"", 2"#),
            vec![r#""say \"hi, there\"""#, "2"]
        );
    }

    #[test]
    fn test_split_empty_input_yields_nothing() {
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn test_split_empty_array_argument() {
        assert_eq!(split_arguments("[], 0"), vec!["[]", "0"]);
    }

    #[test]
    fn test_split_trailing_comma_drops_empty_tail() {
        assert_eq!(split_arguments("1, 2,"), vec!["1", "2"]);
    }
}
