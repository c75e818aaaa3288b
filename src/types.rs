//! Core types for the template engine.
//!
//! This module defines the parsed forms of a marker (`VariableSpec`,
//! `WidthSpec`), a located marker within a document (`Marker`), and the
//! dynamically-typed `Value` a resolver hands back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::constants::{ALIGN_CENTER, ALIGN_LEFT, ALIGN_RIGHT, DEFAULT_PAD_CHAR};

/// How shaped text is positioned within its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Pad on the right; the left side is kept when truncating.
    #[default]
    Left,
    /// Pad on the left; the right side is kept when truncating.
    Right,
    /// Pad both sides; the middle is kept when truncating.
    Center,
}

impl Alignment {
    /// Maps an alignment character (`<`, `>`, `^`) to its alignment.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ALIGN_LEFT => Some(Self::Left),
            ALIGN_RIGHT => Some(Self::Right),
            ALIGN_CENTER => Some(Self::Center),
            _ => None,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Self::Left => ALIGN_LEFT,
            Self::Right => ALIGN_RIGHT,
            Self::Center => ALIGN_CENTER,
        }
    }
}

/// A width rule: pad character, alignment and the permitted length range.
///
/// Equality is structural; two rules parsed from different text are equal
/// when all four fields match.
///
/// The syntax accepted by [`crate::parse_width`] is
/// `[[PadChar]Alignment][MinWidth][.][MaxWidth]`, everything optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidthSpec {
    pub pad_char: char,
    pub alignment: Alignment,
    /// Text shorter than this is padded up to it.
    pub min_width: u32,
    /// Text longer than this is truncated down to it. `u32::MAX` means unbounded.
    pub max_width: u32,
}

impl Default for WidthSpec {
    fn default() -> Self {
        Self {
            pad_char: DEFAULT_PAD_CHAR,
            alignment: Alignment::Left,
            min_width: 0,
            max_width: u32::MAX,
        }
    }
}

impl WidthSpec {
    /// Shapes `text` according to this rule.
    ///
    /// Fails with [`crate::Error::InvalidRange`] if the rule was built
    /// directly with `min_width > max_width`.
    pub fn apply(&self, text: &str) -> crate::Result<String> {
        crate::shaping::shape(
            Some(text),
            self.min_width,
            self.max_width,
            self.alignment,
            self.pad_char,
        )
    }
}

/// Canonical form: pad char and alignment are always written, then either a
/// single width (when min == max) or `[min].[max]` with defaults omitted.
impl fmt::Display for WidthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pad_char, self.alignment.as_char())?;
        if self.min_width == self.max_width {
            return write!(f, "{}", self.min_width);
        }
        if self.min_width > 0 {
            write!(f, "{}", self.min_width)?;
        }
        f.write_str(".")?;
        if self.max_width < u32::MAX {
            write!(f, "{}", self.max_width)?;
        }
        Ok(())
    }
}

impl FromStr for WidthSpec {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::width::parse_width(s)
    }
}

/// A parsed marker body: `NAME!WIDTH:PATTERN`.
///
/// Built by [`crate::parse_variable`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSpec {
    pub(crate) raw_specification: Box<str>,
    pub(crate) name: Box<str>,
    pub(crate) pattern: Box<str>,
    pub(crate) width: Option<WidthSpec>,
}

impl VariableSpec {
    /// The marker body after one layer of `${` `}` has been stripped.
    pub fn raw_specification(&self) -> &str {
        &self.raw_specification
    }

    /// The variable name. Empty for literal markers such as `${:text}`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The format pattern; empty when none was given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn width(&self) -> Option<&WidthSpec> {
        self.width.as_ref()
    }

    /// True when the marker emits its pattern verbatim instead of looking up a value.
    pub fn is_literal(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Renders `value` with this marker's pattern and width rule.
    pub fn format(&self, value: Option<&Value>) -> crate::Result<String> {
        crate::format::format(self, value)
    }
}

impl FromStr for VariableSpec {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parsing::parse_variable(s)
    }
}

/// A marker located in a document. `start..end` covers the whole marker,
/// delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub start: usize,
    pub end: usize,
    pub spec: VariableSpec,
}

/// A value produced by a resolver, formatted according to a marker's pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
}

/// The natural string form, used when a marker has no pattern.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => f.write_str(if *b { "True" } else { "False" }),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Self::DateTime(value.naive_local())
    }
}

impl Value {
    /// The current local date and time.
    pub fn now() -> Self {
        Local::now().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_chars_round_trip() {
        for alignment in [Alignment::Left, Alignment::Right, Alignment::Center] {
            assert_eq!(Alignment::from_char(alignment.as_char()), Some(alignment));
        }
        assert_eq!(Alignment::from_char('='), None);
    }

    #[test]
    fn test_width_spec_defaults() {
        let ws = WidthSpec::default();
        assert_eq!(ws.pad_char, ' ');
        assert_eq!(ws.alignment, Alignment::Left);
        assert_eq!(ws.min_width, 0);
        assert_eq!(ws.max_width, u32::MAX);
    }

    #[test]
    fn test_width_spec_canonical_form() {
        assert_eq!(WidthSpec::default().to_string(), " <.");

        let fixed = WidthSpec {
            pad_char: '*',
            alignment: Alignment::Right,
            min_width: 20,
            max_width: 20,
        };
        assert_eq!(fixed.to_string(), "*>20");

        let ranged = WidthSpec {
            pad_char: '!',
            alignment: Alignment::Center,
            min_width: 17,
            max_width: 20,
        };
        assert_eq!(ranged.to_string(), "!^17.20");

        let max_only = WidthSpec {
            max_width: 9,
            ..WidthSpec::default()
        };
        assert_eq!(max_only.to_string(), " <.9");
    }

    #[test]
    fn test_canonical_form_parses_back() {
        let ws = WidthSpec {
            pad_char: '=',
            alignment: Alignment::Center,
            min_width: 3,
            max_width: 12,
        };
        let reparsed: WidthSpec = ws.to_string().parse().unwrap();
        assert_eq!(reparsed, ws);
    }

    #[test]
    fn test_value_natural_forms() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(true).to_string(), "True");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        assert_eq!(Value::from(date).to_string(), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_alignment_serde_names() {
        let json = serde_json::to_string(&Alignment::Center).unwrap();
        assert_eq!(json, "\"center\"");
        let back: Alignment = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(back, Alignment::Right);
    }
}
