//! Marker syntax and capacity constants for the template engine.
//!
//! This module centralizes every character that carries meaning in the
//! marker grammar, so the scanner and the parsers agree on them.

// ============================================================================
// Marker Delimiters
// ============================================================================

/// Two-character sentinel that opens a marker, as in `${NAME}`.
pub const MARKER_OPEN: &str = "${";

/// Character that closes a marker.
pub const MARKER_CLOSE: char = '}';

/// Character that, placed immediately before [`MARKER_OPEN`], stops the
/// marker from being substituted.
pub const MARKER_ESCAPE: char = '\\';

// ============================================================================
// Specification Delimiters
// ============================================================================

/// Separates the variable name from the width rule: `NAME!WIDTH`.
pub const WIDTH_DELIMITER: char = '!';

/// Separates the name (and width rule) from the format pattern: `NAME:PATTERN`.
pub const PATTERN_DELIMITER: char = ':';

/// Separates the minimum from the maximum width: `MIN.MAX`.
pub const RANGE_SEPARATOR: char = '.';

// ============================================================================
// Alignment Characters
// ============================================================================

/// Left alignment (pad on the right, keep the left when truncating).
pub const ALIGN_LEFT: char = '<';

/// Right alignment (pad on the left, keep the right when truncating).
pub const ALIGN_RIGHT: char = '>';

/// Center alignment.
pub const ALIGN_CENTER: char = '^';

/// Pad character used when a width rule does not name one.
pub const DEFAULT_PAD_CHAR: char = ' ';

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity hint for the marker vector.
///
/// Templates are short snippets, usually with a handful of markers.
pub const MARKERS_INITIAL_CAPACITY: usize = 8;

/// Extra capacity reserved for the substituted output beyond the document length.
///
/// Replacements such as dates are typically longer than the marker text.
pub const OUTPUT_SLACK_CAPACITY: usize = 64;
