//! The contract between the tokenizer and whatever supplies variable values and
//! command output.

use std::fmt;
use std::io;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use crate::var::VarStyle;

/// Prefix marking an existence check in [`Lookup::text`].
pub const EXISTS_MARKER: char = '?';

/// One request the tokenizer makes of a [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// `:name`, `:'name'` or `:"name"`: substitute the variable's value.
    Value { name: &'a str, style: VarStyle },
    /// `:{?name}`: answer `TRUE` or `FALSE`.
    Exists { name: &'a str },
    /// `` `text` ``: command substitution over the verbatim span.
    Command { text: &'a str },
}

impl Lookup<'_> {
    /// True for variable references, false for backtick commands.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        !matches!(self, Self::Command { .. })
    }

    /// The variable name, if this is a variable reference.
    #[must_use]
    pub const fn name(&self) -> Option<&str> {
        match self {
            Self::Value { name, .. } | Self::Exists { name } => Some(*name),
            Self::Command { .. } => None,
        }
    }

    /// Single-string form of the request: `name`, `'name'`, `"name"`, `?name`,
    /// or the verbatim command text.
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { name, style } => match style.quote() {
                Some(q) => write!(f, "{q}{name}{q}"),
                None => f.write_str(name),
            },
            Self::Exists { name } => write!(f, "{EXISTS_MARKER}{name}"),
            Self::Command { text } => f.write_str(text),
        }
    }
}

/// What a [`Resolver`] made of a [`Lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Use this text in place of the reference.
    Replaced(String),
    /// Not recognized; the reference stays as written.
    Unhandled,
}

impl Resolution {
    #[must_use]
    pub fn replaced(text: impl Into<String>) -> Self {
        Self::Replaced(text.into())
    }
}

impl From<Option<String>> for Resolution {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unhandled, Self::Replaced)
    }
}

/// Failure reported by a resolver. Aborts the scan of the current line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The command could not be started.
    #[error("cannot run `{command}`: {message}")]
    Spawn {
        command: String,
        kind: io::ErrorKind,
        message: String,
    },
    /// The command ran but did not succeed.
    #[error("`{command}` failed: {status}")]
    Status { command: String, status: ExitStatus },
    /// The command wrote something that is not UTF-8.
    #[error("command output is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
    /// Free-form failure from a caller-supplied resolver.
    #[error("{0}")]
    Message(String),
}

/// Supplies replacement text for variable references and backtick commands.
///
/// Plain single- and double-quoted literals never reach the resolver.
pub trait Resolver {
    fn resolve(&mut self, lookup: &Lookup<'_>) -> Result<Resolution, ResolveError>;
}

impl<F> Resolver for F
where
    F: FnMut(&Lookup<'_>) -> Result<Resolution, ResolveError>,
{
    fn resolve(&mut self, lookup: &Lookup<'_>) -> Result<Resolution, ResolveError> {
        self(lookup)
    }
}

/// Resolver that recognizes nothing, leaving every reference as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Literal;

impl Resolver for Literal {
    fn resolve(&mut self, _: &Lookup<'_>) -> Result<Resolution, ResolveError> {
        Ok(Resolution::Unhandled)
    }
}
