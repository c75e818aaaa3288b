//! Variable specification parsing.
//!
//! A specification has the form `NAME!WIDTH:PATTERN`, optionally wrapped in
//! one layer of `${` `}`. All three parts are optional, but `!` and `:` may
//! legitimately appear inside the pattern and `:` or `!` may be the width
//! rule's pad character, so the split follows precedence rules rather than
//! splitting on every delimiter:
//!
//! - the first `:` that comes before any `!` starts the pattern, and the
//!   pattern is never split further;
//! - a `!` that comes first starts the width rule; if the character right
//!   after it is `!` or `:` it is the pad character, and the pattern starts
//!   at the next `:` after it.

use tracing::trace;

use crate::constants::{MARKER_CLOSE, MARKER_OPEN, PATTERN_DELIMITER, WIDTH_DELIMITER};
use crate::error::{Error, Result};
use crate::types::VariableSpec;
use crate::validation::is_blank;
use crate::width::parse_width;

/// Raw pieces of a specification body before the width rule is parsed.
#[derive(Debug, PartialEq, Eq)]
struct Components<'a> {
    name: &'a str,
    width: Option<&'a str>,
    pattern: &'a str,
}

/// Parse a marker body, with or without its `${` `}` delimiters.
///
/// # Errors
///
/// - [`Error::EmptySpecification`] if the body is blank.
/// - [`Error::EmptyVariable`] if it has neither a name, a width rule nor a
///   pattern (for example `!` or `:` on their own).
/// - [`Error::MalformedWidth`] if the width rule does not parse.
///
/// # Examples
///
/// ```
/// use tplexpand::{parse_variable, Alignment};
///
/// let spec = parse_variable("${DATE!*^12:yyyy-MM-dd}").unwrap();
/// assert_eq!(spec.name(), "DATE");
/// assert_eq!(spec.pattern(), "yyyy-MM-dd");
/// let width = spec.width().unwrap();
/// assert_eq!(width.pad_char, '*');
/// assert_eq!(width.alignment, Alignment::Center);
/// assert_eq!((width.min_width, width.max_width), (12, 12));
/// ```
pub fn parse_variable(specification: &str) -> Result<VariableSpec> {
    if is_blank(specification) {
        return Err(Error::EmptySpecification);
    }

    let body = strip_delimiters(specification);
    if is_blank(body) {
        return Err(Error::EmptySpecification);
    }

    let Components {
        name,
        width,
        pattern,
    } = split_components(body);

    let width = match width {
        Some(rule) if !is_blank(rule) => Some(parse_width(rule)?),
        _ => None,
    };

    if is_blank(name) && width.is_none() && pattern.is_empty() {
        return Err(Error::EmptyVariable {
            specification: body.to_owned(),
        });
    }

    trace!(specification = %body, name, pattern, "parsed variable specification");

    Ok(VariableSpec {
        raw_specification: body.into(),
        name: name.into(),
        pattern: pattern.into(),
        width,
    })
}

/// Remove exactly one layer of `${` `}` if both are present.
fn strip_delimiters(specification: &str) -> &str {
    specification
        .strip_prefix(MARKER_OPEN)
        .and_then(|rest| rest.strip_suffix(MARKER_CLOSE))
        .unwrap_or(specification)
}

fn split_components(body: &str) -> Components<'_> {
    let width_at = body.find(WIDTH_DELIMITER);
    let pattern_at = body.find(PATTERN_DELIMITER);

    match (width_at, pattern_at) {
        // NAME
        (None, None) => Components {
            name: body,
            width: None,
            pattern: "",
        },
        // NAME:PATTERN, or NAME:PATTERN where PATTERN contains `!`.
        (None, Some(colon)) => name_and_pattern(body, colon),
        (Some(bang), Some(colon)) if colon < bang => name_and_pattern(body, colon),
        // NAME!WIDTH
        (Some(bang), None) => Components {
            name: &body[..bang],
            width: Some(&body[bang + 1..]),
            pattern: "",
        },
        // NAME!WIDTH:PATTERN, where the pad char may be `!` or `:`.
        (Some(bang), Some(colon)) => {
            let after_bang = &body[bang + 1..];
            let pattern_colon = if after_bang.starts_with([WIDTH_DELIMITER, PATTERN_DELIMITER]) {
                // Both delimiters are one byte, so bang + 2 is the char after the pad char.
                body[bang + 2..]
                    .find(PATTERN_DELIMITER)
                    .map(|offset| bang + 2 + offset)
            } else {
                Some(colon)
            };

            match pattern_colon {
                Some(colon) => Components {
                    name: &body[..bang],
                    width: Some(&body[bang + 1..colon]),
                    pattern: &body[colon + 1..],
                },
                None => Components {
                    name: &body[..bang],
                    width: Some(after_bang),
                    pattern: "",
                },
            }
        }
    }
}

fn name_and_pattern(body: &str, colon: usize) -> Components<'_> {
    Components {
        name: &body[..colon],
        width: None,
        pattern: &body[colon + 1..],
    }
}
