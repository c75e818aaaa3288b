//! Pad-and-truncate text shaping.
//!
//! Lengths are counted in `char`s, so multi-byte text is never split inside
//! a character.

use crate::error::{Error, Result};
use crate::types::Alignment;

/// Fit `text` into `min_width..=max_width` characters.
///
/// - Longer than `max_width`: truncated, keeping the left, right or middle
///   part according to `alignment`. For center alignment the left cut is
///   `floor(excess / 2)`, so an odd excess loses its extra char on the right.
/// - Shorter than `min_width`: padded with `pad_char` on the right (left
///   alignment), the left (right alignment) or both sides (center, with an
///   odd deficit putting the extra pad char on the right).
/// - Otherwise returned unchanged.
///
/// `None` behaves like an empty string.
///
/// # Errors
///
/// [`Error::InvalidRange`] if `min_width > max_width`.
///
/// # Examples
///
/// ```
/// use tplexpand::{shape, Alignment};
///
/// assert_eq!(shape(Some("abcdefg"), 3, 5, Alignment::Center, '*').unwrap(), "bcdef");
/// assert_eq!(shape(Some("a"), 3, 5, Alignment::Center, '*').unwrap(), "*a*");
/// assert_eq!(shape(None, 3, 3, Alignment::Left, '*').unwrap(), "***");
/// ```
pub fn shape(
    text: Option<&str>,
    min_width: u32,
    max_width: u32,
    alignment: Alignment,
    pad_char: char,
) -> Result<String> {
    if min_width > max_width {
        return Err(Error::InvalidRange {
            min: min_width,
            max: max_width,
        });
    }

    let text = text.unwrap_or_default();
    let len = text.chars().count();
    let min = usize::try_from(min_width).unwrap_or(usize::MAX);
    let max = usize::try_from(max_width).unwrap_or(usize::MAX);

    if len > max {
        let skip = match alignment {
            Alignment::Left => 0,
            Alignment::Right => len - max,
            Alignment::Center => (len - max) / 2,
        };
        return Ok(text.chars().skip(skip).take(max).collect());
    }

    if len < min {
        let deficit = min - len;
        let left = match alignment {
            Alignment::Left => 0,
            Alignment::Right => deficit,
            Alignment::Center => deficit / 2,
        };
        let right = deficit - left;

        let mut shaped = String::with_capacity(text.len() + deficit * pad_char.len_utf8());
        shaped.extend(std::iter::repeat_n(pad_char, left));
        shaped.push_str(text);
        shaped.extend(std::iter::repeat_n(pad_char, right));
        return Ok(shaped);
    }

    Ok(text.to_owned())
}
