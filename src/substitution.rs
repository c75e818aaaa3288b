//! Single-pass find-and-replace of markers in a document.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::constants::OUTPUT_SLACK_CAPACITY;
use crate::error::{Error, ResolveError, Result};
use crate::parsing::parse_variable;
use crate::tokenization::MarkerSpans;
use crate::types::{Value, VariableSpec};

/// Supplies default values for variable names.
///
/// `Ok(None)` blanks the marker out. [`ResolveError::Unknown`] means "no
/// default"; the marker can still be satisfied by the unresolved hook. Any
/// other error aborts the substitution.
pub trait Resolver {
    fn resolve(&self, name: &str) -> std::result::Result<Option<Value>, ResolveError>;
}

impl<F> Resolver for F
where
    F: Fn(&str) -> std::result::Result<Option<Value>, ResolveError>,
{
    fn resolve(&self, name: &str) -> std::result::Result<Option<Value>, ResolveError> {
        self(name)
    }
}

/// Caller-supplied values keyed by variable name. A `None` value blanks the
/// marker out: it renders as an empty string, padded by its width rule.
pub type Overrides = HashMap<String, Option<Value>>;

/// Called for every marker not found in the overrides, with the resolver's
/// default if it had one. Returning `Some` replaces the default.
pub type UnresolvedHook<'a> = &'a dyn Fn(&str, Option<&Value>) -> Option<Value>;

/// Where a marker's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Override,
    Hook,
    Resolver,
}

/// Replace every marker in `document` with its formatted value.
///
/// Values are looked up in order: `overrides` (by non-empty name), then
/// `resolver` for a default, then `on_unresolved`, which may replace that
/// default. Literal markers (no name, e.g. `${:text}`) go through the same
/// chain with an empty name: any value renders the pattern, a `None` blanks
/// it. [`crate::BuiltinVariables`] answers a blank name with empty text.
///
/// Escaped markers (`\${...}`) and markers with no `}` on their line are
/// copied to the output unchanged.
///
/// # Errors
///
/// - [`Error::UnknownVariable`] if no step supplies a value.
/// - [`Error::Resolution`] if the resolver fails for another reason, even
///   when the hook would have supplied a value.
/// - Any parse or width error raised by a marker.
///
/// No partial output is produced on failure.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use tplexpand::{substitute, BuiltinVariables, Value};
///
/// let overrides = HashMap::from([
///     ("NAME".to_owned(), Some(Value::from("World"))),
///     ("TITLE".to_owned(), None),
/// ]);
/// let out = substitute("Hello ${TITLE}${NAME!>7}!", Some(&overrides), &BuiltinVariables, None).unwrap();
/// assert_eq!(out, "Hello   World!");
/// ```
pub fn substitute(
    document: &str,
    overrides: Option<&Overrides>,
    resolver: &dyn Resolver,
    on_unresolved: Option<UnresolvedHook<'_>>,
) -> Result<String> {
    let mut out = String::with_capacity(document.len() + OUTPUT_SLACK_CAPACITY);
    let mut copied_to = 0;

    for span in MarkerSpans::new(document) {
        let marker = &document[span.clone()];
        let spec = parse_variable(marker)?;

        let (value, source) = resolve_marker(marker, &spec, overrides, resolver, on_unresolved)?;
        let replacement = spec.format(value.as_ref())?;
        debug!(
            name = spec.name(),
            source = ?source,
            replacement = replacement.as_str(),
            "replaced marker"
        );

        out.push_str(&document[copied_to..span.start]);
        out.push_str(&replacement);
        copied_to = span.end;
    }

    out.push_str(&document[copied_to..]);
    Ok(out)
}

fn resolve_marker(
    marker: &str,
    spec: &VariableSpec,
    overrides: Option<&Overrides>,
    resolver: &dyn Resolver,
    on_unresolved: Option<UnresolvedHook<'_>>,
) -> Result<(Option<Value>, Source)> {
    let name = spec.name();

    let overridden = overrides
        .filter(|_| !spec.is_literal())
        .and_then(|map| map.get(name));
    if let Some(value) = overridden {
        return Ok((value.clone(), Source::Override));
    }

    let default = match resolver.resolve(name) {
        Ok(value) => Some(value),
        Err(ResolveError::Unknown(_)) => None,
        Err(ResolveError::Failed(source)) => {
            return Err(Error::Resolution {
                marker: marker.to_owned(),
                source,
            });
        }
    };
    trace!(name, known = default.is_some(), "resolved default");

    let candidate = default.as_ref().and_then(Option::as_ref);
    if let Some(value) = on_unresolved.and_then(|hook| hook(name, candidate)) {
        return Ok((Some(value), Source::Hook));
    }

    default
        .map(|value| (value, Source::Resolver))
        .ok_or_else(|| Error::unknown_variable(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Resolved = std::result::Result<Option<Value>, ResolveError>;

    fn always_unknown(name: &str) -> Resolved {
        Err(ResolveError::Unknown(name.to_owned()))
    }

    fn empty_text_for_blank(name: &str) -> Resolved {
        if name.is_empty() {
            Ok(Some(Value::from("")))
        } else {
            Err(ResolveError::Unknown(name.to_owned()))
        }
    }

    fn overrides(pairs: &[(&str, Value)]) -> Overrides {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Some(v.clone())))
            .collect()
    }

    #[test]
    fn test_override_replaces_marker() {
        let map = overrides(&[("NAME", Value::from("World"))]);
        let out = substitute("Hello ${NAME}", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn test_unknown_variable_fails() {
        let err = substitute("${UNKNOWN}", None, &always_unknown, None).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { name } if name == "UNKNOWN"));
    }

    #[test]
    fn test_document_without_markers_is_unchanged() {
        let doc = "no markers here, just $ and { and }";
        assert_eq!(substitute(doc, None, &always_unknown, None).unwrap(), doc);
    }

    #[test]
    fn test_escaped_marker_is_left_verbatim() {
        let map = overrides(&[("X", Value::from("x"))]);
        let out = substitute(r"\${X} ${X}", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, r"\${X} x");
    }

    #[test]
    fn test_unterminated_marker_is_left_verbatim() {
        let map = overrides(&[("X", Value::from("x"))]);
        let out = substitute("${X ${X}\n${Y", Some(&map), &always_unknown, None);
        // `${X ${X}` is one marker whose name is `X ${X`.
        assert!(matches!(out, Err(Error::UnknownVariable { .. })));

        let out = substitute("${Y\n${X}", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, "${Y\nx");
    }

    #[test]
    fn test_resolver_supplies_defaults() {
        let resolver = |name: &str| match name {
            "COUNT" => Ok(Some(Value::from(42))),
            _ => Err(ResolveError::Unknown(name.to_owned())),
        };
        let out = substitute("[${COUNT:D5}]", None, &resolver, None).unwrap();
        assert_eq!(out, "[00042]");
    }

    #[test]
    fn test_override_shadows_resolver() {
        let resolver = |_: &str| -> Resolved { Ok(Some(Value::from("builtin"))) };
        let map = overrides(&[("USER", Value::from("override"))]);
        let out = substitute("${USER}", Some(&map), &resolver, None).unwrap();
        assert_eq!(out, "override");
    }

    #[test]
    fn test_hook_sees_default_and_can_replace_it() {
        let seen = RefCell::new(Vec::new());
        let hook = |name: &str, default: Option<&Value>| {
            seen.borrow_mut()
                .push((name.to_owned(), default.map(ToString::to_string)));
            (name == "B").then(|| Value::from("hooked"))
        };
        let resolver = |name: &str| match name {
            "A" => Ok(Some(Value::from("a"))),
            _ => Err(ResolveError::Unknown(name.to_owned())),
        };

        let out = substitute("${A}/${B}", None, &resolver, Some(&hook)).unwrap();
        assert_eq!(out, "a/hooked");
        assert_eq!(
            *seen.borrow(),
            vec![
                ("A".to_owned(), Some("a".to_owned())),
                ("B".to_owned(), None),
            ]
        );
    }

    #[test]
    fn test_hook_is_not_consulted_for_overrides() {
        let hook = |_: &str, _: Option<&Value>| -> Option<Value> {
            panic!("hook must not run for overridden names")
        };
        let map = overrides(&[("A", Value::from("a"))]);
        let out = substitute("${A}", Some(&map), &always_unknown, Some(&hook)).unwrap();
        assert_eq!(out, "a");
    }

    #[test]
    fn test_hook_declining_falls_back_to_unknown() {
        let hook = |_: &str, _: Option<&Value>| -> Option<Value> { None };
        let err = substitute("${NOPE}", None, &always_unknown, Some(&hook)).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { name } if name == "NOPE"));
    }

    #[test]
    fn test_resolver_failure_carries_marker_text() {
        let resolver = |_: &str| -> Resolved { Err(ResolveError::failed("disk on fire")) };
        let err = substitute("x ${DB!10} y", None, &resolver, None).unwrap_err();
        match err {
            Error::Resolution { marker, source } => {
                assert_eq!(marker, "${DB!10}");
                assert_eq!(source.to_string(), "disk on fire");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolver_failure_is_not_masked_by_hook() {
        let resolver = |_: &str| -> Resolved { Err(ResolveError::failed("db down")) };
        let hook = |_: &str, _: Option<&Value>| -> Option<Value> { Some(Value::from("hooked")) };
        let err = substitute("${DB}", None, &resolver, Some(&hook)).unwrap_err();
        assert!(matches!(err, Error::Resolution { ref marker, .. } if marker == "${DB}"));
    }

    #[test]
    fn test_literal_markers_emit_their_pattern() {
        let out = substitute("${!-^11: hi }", None, &empty_text_for_blank, None).unwrap();
        assert_eq!(out, "--- hi ----");
        let out = substitute("a${:b}c", None, &empty_text_for_blank, None).unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_literal_markers_ask_the_resolver() {
        let calls = RefCell::new(Vec::new());
        let resolver = |name: &str| {
            calls.borrow_mut().push(name.to_owned());
            empty_text_for_blank(name)
        };
        substitute("a${:b}c", None, &resolver, None).unwrap();
        assert_eq!(*calls.borrow(), vec![String::new()]);
    }

    #[test]
    fn test_unknown_literal_fails() {
        let err = substitute("${:b}", None, &always_unknown, None).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { name } if name.is_empty()));
    }

    #[test]
    fn test_hook_can_supply_a_literal() {
        let hook = |_: &str, _: Option<&Value>| -> Option<Value> { Some(Value::from("gate")) };
        let out = substitute("${:b}", None, &always_unknown, Some(&hook)).unwrap();
        assert_eq!(out, "b");
    }

    #[test]
    fn test_none_override_blanks_named_markers() {
        let map: Overrides = HashMap::from([("NAME".to_owned(), None)]);
        let out = substitute("[${NAME}]", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, "[]");
        let out = substitute("[${NAME!*>4:yyyy}]", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, "[****]");
    }

    #[test]
    fn test_blank_resolution_blanks_literals() {
        let blank = |_: &str| -> Resolved { Ok(None) };
        let out = substitute("[${:Mercy}]", None, &blank, None).unwrap();
        assert_eq!(out, "[]");
        let out = substitute("[${!=^5:Mercy}]", None, &blank, None).unwrap();
        assert_eq!(out, "[=====]");
    }

    #[test]
    fn test_literal_overrides_are_ignored() {
        let map: Overrides = HashMap::from([(String::new(), None)]);
        let out = substitute("[${:Mercy}]", Some(&map), &empty_text_for_blank, None).unwrap();
        assert_eq!(out, "[Mercy]");
    }

    #[test]
    fn test_names_are_matched_untrimmed() {
        let map = overrides(&[("DATE", Value::from("override"))]);
        let err = substitute("${ DATE }", Some(&map), &crate::BuiltinVariables, None).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable { name } if name == " DATE "));
    }

    #[test]
    fn test_parse_errors_abort_substitution() {
        let map = overrides(&[("X", Value::from("x"))]);
        assert!(matches!(
            substitute("${X} ${}", Some(&map), &always_unknown, None),
            Err(Error::EmptySpecification)
        ));
        assert!(matches!(
            substitute("${X!1.2.3}", Some(&map), &always_unknown, None),
            Err(Error::MalformedWidth { .. })
        ));
        assert!(matches!(
            substitute("${X!9.3}", Some(&map), &always_unknown, None),
            Err(Error::InvalidRange { min: 9, max: 3 })
        ));
    }

    #[test]
    fn test_replacements_do_not_shift_later_markers() {
        let map = overrides(&[
            ("A", Value::from("a much longer replacement")),
            ("B", Value::from("")),
        ]);
        let out = substitute("${A}|${B}|${A!3}", Some(&map), &always_unknown, None).unwrap();
        assert_eq!(out, "a much longer replacement||a m");
    }
}
