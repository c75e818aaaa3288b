//! Value formatting: pattern first, then the width rule.
//!
//! Patterns follow the .NET `ToString(format)` conventions, since template
//! authors write them that way (`yyyy-MM-dd`, `N2`, `D5`, `#,##0.00`):
//!
//! - date/time values accept custom patterns and the one-letter standard
//!   patterns (`d`, `D`, `t`, `T`, `s`, `u`, `o`, ...), rendered with
//!   invariant-culture names;
//! - numbers accept the standard `C D E F N P X` patterns with an optional
//!   precision, and custom `0`/`#` patterns;
//! - text and booleans ignore the pattern.
//!
//! A pattern that does not apply to the value yields the value's natural form.

use crate::error::Result;
use crate::types::{Value, VariableSpec};

mod date_parser;
mod number_parser;

use number_parser::Number;

/// Format `value` for the marker described by `spec`.
///
/// - `None` renders as an empty string (the resolver's way to blank a marker out).
/// - A literal marker (no name) renders its pattern verbatim.
/// - Otherwise the value is rendered with the pattern.
///
/// The width rule, if any, is applied last, so a blanked-out marker with a
/// width still occupies its minimum width.
///
/// # Errors
///
/// [`crate::Error::InvalidRange`] if the width rule's minimum exceeds its maximum.
///
/// # Examples
///
/// ```
/// use tplexpand::{format, parse_variable, Value};
///
/// let spec = parse_variable("!=^10:abcd").unwrap();
/// assert_eq!(format(&spec, Some(&Value::from(""))).unwrap(), "===abcd===");
/// assert_eq!(format(&spec, None).unwrap(), "==========");
/// ```
pub fn format(spec: &VariableSpec, value: Option<&Value>) -> Result<String> {
    let text = match value {
        None => String::new(),
        Some(_) if spec.is_literal() => spec.pattern().to_owned(),
        Some(value) => render(value, spec.pattern()),
    };

    match spec.width() {
        Some(width) => width.apply(&text),
        None => Ok(text),
    }
}

/// Render `value` with a pattern; an empty pattern gives the natural form.
pub fn render(value: &Value, pattern: &str) -> String {
    if pattern.is_empty() {
        return value.to_string();
    }

    let rendered = match value {
        Value::Text(_) | Value::Boolean(_) => None,
        Value::Integer(n) => number_parser::render(Number::Int(*n), pattern),
        Value::Float(n) => number_parser::render(Number::Float(*n), pattern),
        Value::DateTime(dt) => {
            date_parser::tokenize(date_parser::expand_standard(pattern))
                .ok()
                .map(|(_, tokens)| {
                    let mut out = String::with_capacity(pattern.len() * 2);
                    date_parser::render(&tokens, dt, &mut out);
                    out
                })
        }
    };

    rendered.unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_variable;
    use chrono::NaiveDate;

    fn spec(text: &str) -> VariableSpec {
        parse_variable(text).unwrap()
    }

    #[test]
    fn test_literal_with_none_is_empty() {
        let literal = spec(":Mercy");
        assert_eq!(format(&literal, None).unwrap(), "");
    }

    #[test]
    fn test_literal_with_any_value_is_pattern() {
        let literal = spec(":Mercy");
        assert_eq!(format(&literal, Some(&Value::from(""))).unwrap(), "Mercy");
        assert_eq!(format(&literal, Some(&Value::from(12))).unwrap(), "Mercy");
    }

    #[test]
    fn test_none_is_empty_for_named_markers() {
        assert_eq!(format(&spec("NAME:abcd"), None).unwrap(), "");
    }

    #[test]
    fn test_literal_with_padding() {
        let v = spec("!=^10:abcd");
        assert_eq!(format(&v, Some(&Value::from(""))).unwrap(), "===abcd===");
    }

    #[test]
    fn test_blank_variable_is_ok() {
        assert_eq!(format(&spec("!:"), None).unwrap(), "");
    }

    #[test]
    fn test_date_patterns_are_applied() {
        let dt = NaiveDate::from_ymd_opt(2013, 11, 4)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let value = Value::from(dt);
        assert_eq!(format(&spec("DATE:yyyy-MM-dd"), Some(&value)).unwrap(), "2013-11-04");
        assert_eq!(format(&spec("DATE:HH:mm"), Some(&value)).unwrap(), "08:30");
        assert_eq!(format(&spec("DATE"), Some(&value)).unwrap(), "2013-11-04 08:30:00");
    }

    #[test]
    fn test_pattern_then_width() {
        let value = Value::from(1.23456);
        assert_eq!(format(&spec("PI!*>8:F3"), Some(&value)).unwrap(), "***1.235");
        assert_eq!(format(&spec("PI!2:F3"), Some(&value)).unwrap(), "1.");
    }

    #[test]
    fn test_text_ignores_pattern() {
        let value = Value::from("Hello");
        assert_eq!(format(&spec("GREETING:yyyy"), Some(&value)).unwrap(), "Hello");
        assert_eq!(format(&spec("GREETING!>7:N2"), Some(&value)).unwrap(), "  Hello");
    }

    #[test]
    fn test_inapplicable_pattern_falls_back_to_natural_form() {
        assert_eq!(render(&Value::from(2.5), "D4"), "2.5");
        assert_eq!(render(&Value::from(7), "hello"), "7");
        assert_eq!(render(&Value::from(true), "X"), "True");
    }

    #[test]
    fn test_inverted_width_range_is_reported() {
        let err = format(&spec("NAME!9.3"), Some(&Value::from("x"))).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidRange { min: 9, max: 3 }));
    }
}
