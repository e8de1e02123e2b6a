//! A variable store and the resolver that reads from it.

use std::collections::BTreeMap;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::resolve::{Lookup, Resolution, ResolveError, Resolver};
use crate::var::VarStyle;

/// Named string variables, as set by `\set`-style meta-commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: BTreeMap<String, String>,
}

impl Vars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn unset(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Variables in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Wrap `value` in single quotes, doubling any embedded `'`.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    quote_with(value, '\'')
}

/// Wrap `value` in double quotes, doubling any embedded `"`.
#[must_use]
pub fn quote_ident(value: &str) -> String {
    quote_with(value, '"')
}

fn quote_with(value: &str, q: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for ch in value.chars() {
        if ch == q {
            out.push(q);
        }
        out.push(ch);
    }
    out.push(q);
    out
}

/// Resolves references against a [`Vars`] store.
///
/// - `:name` becomes the value as is.
/// - `:'name'` becomes the value as a quoted literal.
/// - `:"name"` becomes the value as a quoted identifier.
/// - `:{?name}` becomes `TRUE` or `FALSE`.
/// - Undefined names are left as written.
///
/// Backtick spans are returned verbatim unless command execution is enabled, in
/// which case they run through the shell and are replaced by their output.
#[derive(Debug, Clone)]
pub struct VarsResolver<'a> {
    vars: &'a Vars,
    exec: bool,
    shell: String,
    shell_flag: String,
}

impl<'a> VarsResolver<'a> {
    #[must_use]
    pub fn new(vars: &'a Vars) -> Self {
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        Self {
            vars,
            exec: false,
            shell: shell.to_string(),
            shell_flag: flag.to_string(),
        }
    }

    /// Run backtick spans as commands.
    #[must_use]
    pub const fn exec(mut self, enabled: bool) -> Self {
        self.exec = enabled;
        self
    }

    /// Shell used for backtick commands, invoked as `program flag command`.
    #[must_use]
    pub fn shell(mut self, program: impl Into<String>, flag: impl Into<String>) -> Self {
        self.shell = program.into();
        self.shell_flag = flag.into();
        self
    }

    fn value(&self, name: &str, style: VarStyle) -> Resolution {
        self.vars
            .get(name)
            .map(|v| match style {
                VarStyle::Bare => v.to_string(),
                VarStyle::SingleQuoted => quote_literal(v),
                VarStyle::DoubleQuoted => quote_ident(v),
            })
            .into()
    }

    fn run(&self, command: &str) -> Result<String, ResolveError> {
        debug!(command, shell = %self.shell, "running backtick command");
        let output = Command::new(&self.shell)
            .arg(&self.shell_flag)
            .arg(command)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| ResolveError::Spawn {
                command: command.to_string(),
                kind: e.kind(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(ResolveError::Status {
                command: command.to_string(),
                status: output.status,
            });
        }
        let mut text = String::from_utf8(output.stdout)?;
        let len = text.trim_end_matches(['\n', '\r']).len();
        text.truncate(len);
        Ok(text)
    }
}

impl Resolver for VarsResolver<'_> {
    fn resolve(&mut self, lookup: &Lookup<'_>) -> Result<Resolution, ResolveError> {
        match *lookup {
            Lookup::Value { name, style } => Ok(self.value(name, style)),
            Lookup::Exists { name } => {
                let answer = if self.vars.contains(name) {
                    "TRUE"
                } else {
                    "FALSE"
                };
                Ok(Resolution::replaced(answer))
            }
            Lookup::Command { text } if self.exec => self.run(text).map(Resolution::Replaced),
            Lookup::Command { text } => Ok(Resolution::replaced(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store() {
        let mut vars = Vars::new();
        assert!(vars.is_empty());
        assert_eq!(vars.set("b", "1"), None);
        assert_eq!(vars.set("a", "2"), None);
        assert_eq!(vars.set("b", "3"), Some("1".to_string()));
        assert_eq!(vars.get("b"), Some("3"));
        assert_eq!(vars.len(), 2);
        let names: Vec<_> = vars.entries().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(vars.unset("a"), Some("2".to_string()));
        assert!(!vars.contains("a"));
    }

    #[test]
    fn quoting() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_ident(r#"a"b"#), r#""a""b""#);
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn resolves_styles() {
        let vars: Vars = [("foo", "b'r")].into_iter().collect();
        let mut r = VarsResolver::new(&vars);
        let get = |r: &mut VarsResolver<'_>, style| {
            r.resolve(&Lookup::Value { name: "foo", style })
                .expect("resolve")
        };
        assert_eq!(get(&mut r, VarStyle::Bare), Resolution::replaced("b'r"));
        assert_eq!(
            get(&mut r, VarStyle::SingleQuoted),
            Resolution::replaced("'b''r'")
        );
        assert_eq!(
            get(&mut r, VarStyle::DoubleQuoted),
            Resolution::replaced("\"b'r\"")
        );
    }

    #[test]
    fn undefined_is_unhandled() {
        let vars = Vars::new();
        let got = VarsResolver::new(&vars)
            .resolve(&Lookup::Value {
                name: "nope",
                style: VarStyle::Bare,
            })
            .expect("resolve");
        assert_eq!(got, Resolution::Unhandled);
    }

    #[test]
    fn existence() {
        let vars: Vars = [("foo", "")].into_iter().collect();
        let mut r = VarsResolver::new(&vars);
        let yes = r.resolve(&Lookup::Exists { name: "foo" }).expect("resolve");
        let no = r.resolve(&Lookup::Exists { name: "bar" }).expect("resolve");
        assert_eq!(yes, Resolution::replaced("TRUE"));
        assert_eq!(no, Resolution::replaced("FALSE"));
    }

    #[test]
    fn commands_pass_through_without_exec() {
        let vars = Vars::new();
        let got = VarsResolver::new(&vars)
            .resolve(&Lookup::Command { text: "rm -rf /" })
            .expect("resolve");
        assert_eq!(got, Resolution::replaced("rm -rf /"));
    }

    #[cfg(unix)]
    #[test]
    fn commands_run_with_exec() {
        let vars = Vars::new();
        let mut r = VarsResolver::new(&vars).exec(true);
        let got = r
            .resolve(&Lookup::Command {
                text: "printf 'hi\\n\\n'",
            })
            .expect("resolve");
        assert_eq!(got, Resolution::replaced("hi"));

        let err = r
            .resolve(&Lookup::Command { text: "exit 3" })
            .unwrap_err();
        assert!(matches!(err, ResolveError::Status { .. }));
        assert_ne!(err, ResolveError::Message("exit 3".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn missing_shell() {
        let vars = Vars::new();
        let err = VarsResolver::new(&vars)
            .exec(true)
            .shell("/nonexistent/shell", "-c")
            .resolve(&Lookup::Command { text: "true" })
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Spawn { ref command, kind: std::io::ErrorKind::NotFound, .. }
            if command == "true"
        ));
        assert_eq!(err.clone(), err);
    }
}
