//! Text classification helpers shared by the parsers.

/// Check if `s` is empty or contains only whitespace.
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parse a non-negative width, tolerating surrounding whitespace and a leading `+`.
///
/// Returns `None` for anything else, including negative numbers and values
/// that do not fit in a `u32`.
#[inline]
pub fn parse_width_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || s.starts_with('-') {
        return None;
    }
    s.parse().ok()
}
