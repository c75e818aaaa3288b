//! Variable markers for text-expansion templates.
//!
//! A template is plain text with embedded markers such as
//! `${DATE!*^20:dddd, dd MMMM yyyy}`. Each marker names a variable, an
//! optional width rule and an optional format pattern. Substitution resolves
//! every marker to a value, formats it and splices the result into a fresh
//! copy of the document.
//!
//! # Architecture
//!
//! Substitution runs in four phases per marker:
//! 1. **Scanning**: `${ ... }` spans are located in a single linear pass;
//!    escaped (`\${`) and unterminated markers are left as text
//! 2. **Parsing**: the marker body is split into name, width rule and pattern,
//!    and the width rule is parsed into a [`WidthSpec`]
//! 3. **Resolution**: overrides, then a [`Resolver`], then an optional hook
//! 4. **Formatting**: the value is rendered with the pattern and then padded
//!    or truncated by the width rule
//!
//! The implementation is organized into focused modules:
//! - `constants`: Marker syntax characters and allocation hints
//! - `types`: `WidthSpec`, `VariableSpec`, `Marker` and `Value`
//! - `error`: Error types
//! - `validation`: Character and number classification
//! - `width`: Width rule parsing
//! - `shaping`: Pad and truncate
//! - `parsing`: Variable specification parsing
//! - `tokenization`: Marker scanning
//! - `format`: Date and number patterns
//! - `builtins`: `DATE`, `USER`, `MACHINENAME` and friends
//! - `substitution`: The find-and-replace pipeline
//! - `template`: Named templates and per-call options
//!
//! # Marker Syntax
//!
//! ```text
//! ${NAME!WIDTH:PATTERN}
//! WIDTH = [[PadChar]Alignment][MinWidth][.][MaxWidth]
//! ```
//!
//! - The first `:` before any `!` starts the pattern; the pattern may contain
//!   `!`, `:` and `}` (up to the first `}` on the line, which closes the marker)
//! - The character after `!` may itself be `!` or `:`, acting as a pad char
//! - A marker with no name is a literal: `${!-^20:Title}` centers `Title`
//! - Alignment is `<` (default), `>` or `^`; a lone number is an exact width
//!
//! # Known Limitations
//!
//! - **No nesting**: `${A ${B}}` is one marker whose body is `A ${B`.
//! - **Single line**: a marker must close on the line it opens.
//! - **Escapes are kept**: `\${X}` stays in the output with its backslash.
//! - **Invariant culture**: month and day names are English, the decimal
//!   separator is `.` and the group separator is `,`.
//!
//! # Logging
//!
//! Events are emitted through `tracing` at `debug` and `trace` level. No
//! subscriber is installed by this crate.

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

// ============================================================================
// Module Organization
// ============================================================================

mod builtins;
mod constants;
mod error;
mod format;
mod parsing;
mod shaping;
mod substitution;
mod template;
mod tokenization;
mod types;
mod validation;
mod width;

// ============================================================================
// Re-exports for Public API
// ============================================================================

pub use builtins::{Builtin, BuiltinVariables};
pub use error::{BoxError, Error, ResolveError, Result};
pub use format::{format, render};
pub use parsing::parse_variable;
pub use shaping::shape;
pub use substitution::{Overrides, Resolver, UnresolvedHook, substitute};
pub use template::{SubstituteOptions, TextTemplate};
pub use tokenization::{MarkerSpans, find_markers};
pub use types::{Alignment, Marker, Value, VariableSpec, WidthSpec};
pub use width::parse_width;
