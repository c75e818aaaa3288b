//! In-memory text templates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builtins::BuiltinVariables;
use crate::error::Result;
use crate::substitution::{Overrides, Resolver, UnresolvedHook, substitute};

/// Per-call processing switches, loadable from host configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstituteOptions {
    /// Strip one leading `\r\n` or `\n` from the template text before substituting.
    pub trim_one_leading_newline: bool,
}

/// A named template document.
///
/// The text is never modified; each call to [`TextTemplate::process`]
/// produces a fresh string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTemplate {
    name: Option<String>,
    description: Option<String>,
    file_path: Option<PathBuf>,
    text: String,
}

impl TextTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            description: None,
            file_path: None,
            text: text.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record the file the template was loaded from.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// The final component of [`Self::file_path`], if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_path.as_deref()?.file_name()?.to_str()
    }

    /// The template text before substitution.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every marker in the template.
    ///
    /// See [`substitute`] for the resolution order and the errors.
    pub fn process(
        &self,
        overrides: Option<&Overrides>,
        options: SubstituteOptions,
        resolver: &dyn Resolver,
        on_unresolved: Option<UnresolvedHook<'_>>,
    ) -> Result<String> {
        let text = if options.trim_one_leading_newline {
            trim_one_leading_newline(&self.text)
        } else {
            &self.text
        };

        debug!(
            name = self.name.as_deref(),
            file_path = ?self.file_path,
            overrides = overrides.map_or(0, HashMap::len),
            "processing template"
        );

        substitute(text, overrides, resolver, on_unresolved)
    }

    /// Substitute using only the built-in variables.
    pub fn process_default(&self) -> Result<String> {
        self.process(None, SubstituteOptions::default(), &BuiltinVariables, None)
    }
}

fn trim_one_leading_newline(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}
