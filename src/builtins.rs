//! Built-in variables available to every template.
//!
//! The set is a closed enum, so adding a variable without giving it a name
//! and a provider is a compile error rather than a runtime lookup failure.
//! Names are matched case-insensitively.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::ResolveError;
use crate::substitution::Resolver;
use crate::types::Value;

/// Separates the domain from the user name in `DOMAINUSER`.
const DOMAIN_SEPARATOR: char = '\\';

/// Sub-folder of [`Builtin::ExeFolder`] that holds plugins.
const PLUGINS_FOLDER_NAME: &str = "Plugins";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// The current local date and time.
    Date,
    MachineName,
    /// `DOMAIN\user` when a domain is known, otherwise just the user name.
    DomainUser,
    /// The part of `DOMAINUSER` before the separator; empty without a domain.
    Domain,
    /// The user name without its domain.
    User,
    /// Full path of the running executable.
    ExePath,
    /// Folder containing the running executable.
    ExeFolder,
    PluginsFolder,
}

impl Builtin {
    pub const ALL: [Self; 8] = [
        Self::Date,
        Self::MachineName,
        Self::DomainUser,
        Self::Domain,
        Self::User,
        Self::ExePath,
        Self::ExeFolder,
        Self::PluginsFolder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::MachineName => "MACHINENAME",
            Self::DomainUser => "DOMAINUSER",
            Self::Domain => "DOMAIN",
            Self::User => "USER",
            Self::ExePath => "EXEPATH",
            Self::ExeFolder => "EXEFOLDER",
            Self::PluginsFolder => "PLUGINSFOLDER",
        }
    }

    /// Case-insensitive lookup by name. Surrounding whitespace is part of the name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|builtin| builtin.name().eq_ignore_ascii_case(name))
    }

    /// Compute the variable's current value.
    pub fn value(self) -> Result<Value, ResolveError> {
        match self {
            Self::Date => Ok(Value::now()),
            Self::MachineName => machine_name().map(Value::from),
            Self::DomainUser => domain_user().map(Value::from),
            Self::Domain => domain_user().map(|du| {
                du.split_once(DOMAIN_SEPARATOR)
                    .map(|(domain, _)| domain.to_owned())
                    .unwrap_or_default()
                    .into()
            }),
            Self::User => domain_user().map(|du| {
                du.split_once(DOMAIN_SEPARATOR)
                    .map_or(du.clone(), |(_, user)| user.to_owned())
                    .into()
            }),
            Self::ExePath => exe_path().map(|path| path.display().to_string().into()),
            Self::ExeFolder => exe_folder().map(|path| path.display().to_string().into()),
            Self::PluginsFolder => exe_folder()
                .map(|path| path.join(PLUGINS_FOLDER_NAME).display().to_string().into()),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The built-in registry as a [`Resolver`].
///
/// A blank name, as used by literal markers, resolves to empty text so the
/// literal renders. Unknown names resolve to [`ResolveError::Unknown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVariables;

impl BuiltinVariables {
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        Builtin::ALL.into_iter().map(Builtin::name)
    }
}

impl Resolver for BuiltinVariables {
    fn resolve(&self, name: &str) -> Result<Option<Value>, ResolveError> {
        if name.trim().is_empty() {
            return Ok(Some(Value::Text(String::new())));
        }
        Builtin::from_name(name)
            .ok_or_else(|| ResolveError::Unknown(name.to_owned()))?
            .value()
            .map(Some)
    }
}

fn first_env_var(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

fn machine_name() -> Result<String, ResolveError> {
    if let Some(name) = first_env_var(&["COMPUTERNAME", "HOSTNAME"]) {
        return Ok(name);
    }
    std::fs::read_to_string("/etc/hostname")
        .ok()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ResolveError::failed("the machine name could not be determined"))
}

fn domain_user() -> Result<String, ResolveError> {
    let user = first_env_var(&["USERNAME", "USER", "LOGNAME"])
        .ok_or_else(|| ResolveError::failed("the current user could not be determined"))?;
    Ok(match first_env_var(&["USERDOMAIN"]) {
        Some(domain) => format!("{domain}{DOMAIN_SEPARATOR}{user}"),
        None => user,
    })
}

fn exe_path() -> Result<PathBuf, ResolveError> {
    env::current_exe().map_err(ResolveError::failed)
}

fn exe_folder() -> Result<PathBuf, ResolveError> {
    let exe = exe_path()?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or_else(|| ResolveError::failed("the executable has no parent folder"))
}
