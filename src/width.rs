//! Width rule parsing.
//!
//! A width rule has the shape `[[PadChar]Alignment][MinWidth][.][MaxWidth]`.
//! Every part is optional, and the pad character may be any character
//! (including an alignment character, a digit or `.`), so the parser decides
//! what each leading character means from the length of the rule and the
//! class of its first two characters rather than from a grammar:
//!
//! | Rule         | Pad  | Align  | Min | Max       |
//! |--------------|------|--------|-----|-----------|
//! | `^`          | ` `  | Center | 0   | unbounded |
//! | `7`          | ` `  | Left   | 7   | 7         |
//! | `*`          | `*`  | Left   | 0   | unbounded |
//! | `*>20`       | `*`  | Right  | 20  | 20        |
//! | `<<`         | `<`  | Left   | 0   | unbounded |
//! | `^5.`        | ` `  | Center | 5   | unbounded |
//! | `.9`         | ` `  | Left   | 0   | 9         |
//! | `=.9`        | `=`  | Left   | 0   | 9         |
//!
//! A `.` pad character is only reachable together with an explicit
//! alignment (`.<9`), since a leading `.` otherwise starts the numeric tail.

use tracing::trace;

use crate::constants::RANGE_SEPARATOR;
use crate::error::{Error, Result};
use crate::types::{Alignment, WidthSpec};
use crate::validation::{is_blank, parse_width_number};

/// Parse a width rule. Blank text yields [`WidthSpec::default`].
///
/// Fails with [`Error::MalformedWidth`] when a width is not a non-negative
/// integer or when the rule contains more than one `.`.
pub fn parse_width(text: &str) -> Result<WidthSpec> {
    let mut spec = WidthSpec::default();
    let trimmed = text.trim();

    let mut chars = trimmed.chars();
    let Some(c1) = chars.next() else {
        return Ok(spec);
    };

    let Some(c2) = chars.next() else {
        // A lone character is ambiguous; its class decides.
        if let Some(alignment) = Alignment::from_char(c1) {
            spec.alignment = alignment;
        } else if let Some(digit) = c1.to_digit(10) {
            spec.min_width = digit;
            spec.max_width = digit;
        } else {
            spec.pad_char = c1;
        }
        return Ok(spec);
    };

    let numbers = if let Some(alignment) = Alignment::from_char(c2) {
        // `PA...`, where P may itself be an alignment character.
        spec.pad_char = c1;
        spec.alignment = alignment;
        &trimmed[c1.len_utf8() + c2.len_utf8()..]
    } else if let Some(alignment) = Alignment::from_char(c1) {
        spec.alignment = alignment;
        &trimmed[c1.len_utf8()..]
    } else if c1.is_ascii_digit() || c1 == RANGE_SEPARATOR {
        trimmed
    } else {
        spec.pad_char = c1;
        &trimmed[c1.len_utf8()..]
    };

    parse_numbers(text, numbers, &mut spec)?;

    trace!(rule = %text, parsed = %spec, "parsed width rule");
    Ok(spec)
}

/// Parse the `[min][.][max]` tail into `spec`.
///
/// A blank tail leaves the widths at their defaults, which lets rules such as
/// `<<` (pad with `<`, align left) through.
fn parse_numbers(original: &str, numbers: &str, spec: &mut WidthSpec) -> Result<()> {
    if is_blank(numbers) {
        return Ok(());
    }

    let mut parts = numbers.split(RANGE_SEPARATOR);
    let first = parts.next().unwrap_or_default();
    match (parts.next(), parts.next()) {
        (None, _) => {
            let width = parse_width_number(first)
                .ok_or_else(|| Error::malformed_width(original, "width is not a non-negative integer"))?;
            spec.min_width = width;
            spec.max_width = width;
        }
        (Some(second), None) => {
            spec.min_width = convert_width(original, first, 0)?;
            spec.max_width = convert_width(original, second, u32::MAX)?;
        }
        (Some(_), Some(_)) => {
            return Err(Error::malformed_width(
                original,
                "at most one separator permitted between minimum and maximum widths",
            ));
        }
    }
    Ok(())
}

fn convert_width(original: &str, width: &str, default_if_unset: u32) -> Result<u32> {
    if is_blank(width) {
        return Ok(default_if_unset);
    }
    parse_width_number(width)
        .ok_or_else(|| Error::malformed_width(original, "width is not a non-negative integer"))
}
