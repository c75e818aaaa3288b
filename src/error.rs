//! Error types for parsing, shaping and substitution.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error returned by caller-supplied resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// A numeric width token did not parse, or the rule had more than one `.`.
    #[error("the width specification {text:?} is invalid: {reason}")]
    MalformedWidth { text: String, reason: &'static str },

    /// A shaper was asked for a minimum width above its maximum.
    #[error("minimum width {min} must be less than or equal to the maximum width {max}")]
    InvalidRange { min: u32, max: u32 },

    /// The marker body was empty or whitespace.
    #[error("empty variable specifications are not permitted")]
    EmptySpecification,

    /// The marker body has neither a name, a width rule nor a pattern.
    #[error("variable specification {specification:?} has no name, width or pattern")]
    EmptyVariable { specification: String },

    /// Nothing supplied a value for the named variable.
    #[error("no value for variable '{name}' and no built-in variable with that name exists")]
    UnknownVariable { name: String },

    /// A resolver failed for a reason other than not knowing the variable.
    #[error("failed to resolve marker {marker:?}: {source}")]
    Resolution {
        marker: String,
        #[source]
        source: BoxError,
    },
}

impl Error {
    pub(crate) fn malformed_width(text: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedWidth {
            text: text.into(),
            reason,
        }
    }

    pub(crate) fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }
}

/// Failure reported by a [`crate::Resolver`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The resolver does not recognise the name. Substitution treats this as
    /// "no default" and only fails if nothing else supplies a value.
    #[error("unknown variable '{0}'")]
    Unknown(String),

    /// Any other failure; aborts the substitution with the marker text attached.
    #[error(transparent)]
    Failed(BoxError),
}

impl ResolveError {
    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::unknown_variable("NOPE");
        assert!(err.to_string().contains("NOPE"));

        let err = Error::malformed_width("1.2.3", "at most one separator permitted");
        assert!(err.to_string().contains("1.2.3"));
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn test_resolution_error_keeps_source() {
        let err = Error::Resolution {
            marker: "${DB}".to_owned(),
            source: "connection refused".into(),
        };
        assert!(err.to_string().contains("${DB}"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("connection refused"));
    }
}
