//! Marker scanning.
//!
//! A marker is `${`, then the shortest run of characters up to the first `}`
//! on the same line. Markers do not nest. A `${` immediately preceded by `\`
//! is not a marker and stays in the document untouched, backslash included.
//! A `${` with no `}` before the end of its line is plain text.

use std::ops::Range;

use crate::constants::{MARKERS_INITIAL_CAPACITY, MARKER_CLOSE, MARKER_ESCAPE, MARKER_OPEN};
use crate::error::Result;
use crate::parsing::parse_variable;
use crate::types::Marker;

/// Iterator over the byte ranges of the markers in a document, delimiters included.
#[derive(Debug, Clone)]
pub struct MarkerSpans<'a> {
    document: &'a str,
    position: usize,
}

impl<'a> MarkerSpans<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            document,
            position: 0,
        }
    }

    fn is_escaped(&self, open_at: usize) -> bool {
        self.document[..open_at].ends_with(MARKER_ESCAPE)
    }
}

impl Iterator for MarkerSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.position + self.document[self.position..].find(MARKER_OPEN)?;
            // `$` is one byte, so the next candidate starts right after it.
            self.position = start + 1;

            if self.is_escaped(start) {
                continue;
            }

            let body_start = start + MARKER_OPEN.len();
            let body = &self.document[body_start..];
            let Some(stop) = body.find([MARKER_CLOSE, '\n']) else {
                continue;
            };
            if !body[stop..].starts_with(MARKER_CLOSE) {
                continue;
            }

            let end = body_start + stop + MARKER_CLOSE.len_utf8();
            self.position = end;
            return Some(start..end);
        }
    }
}

/// Locate and parse every marker in `document`, in document order.
///
/// # Errors
///
/// The first marker whose specification fails to parse.
///
/// # Examples
///
/// ```
/// use tplexpand::find_markers;
///
/// let markers = find_markers(r"Dear ${NAME!20}, \${NOT_ME} ${DATE:yyyy}").unwrap();
/// let names: Vec<_> = markers.iter().map(|m| m.spec.name()).collect();
/// assert_eq!(names, ["NAME", "DATE"]);
/// ```
pub fn find_markers(document: &str) -> Result<Vec<Marker>> {
    let mut markers = Vec::with_capacity(MARKERS_INITIAL_CAPACITY);
    for span in MarkerSpans::new(document) {
        let spec = parse_variable(&document[span.clone()])?;
        markers.push(Marker {
            start: span.start,
            end: span.end,
            spec,
        });
    }
    Ok(markers)
}
