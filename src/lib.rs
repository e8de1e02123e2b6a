//! Statement-line tokenizer with psql-style variable substitution.
//!
//! Splits one line of interactive input into whitespace-separated tokens.
//! Quoted spans are unquoted, and `:name`, `:'name'`, `:"name"`,
//! `:{?name}` and `` `command` `` are handed to a [`Resolver`] for
//! replacement text. References the resolver does not recognize are kept as
//! written.
//!
//! # Quick start
//!
//! ```
//! use stmt_params::{Params, Vars, VarsResolver};
//!
//! let mut vars = Vars::new();
//! vars.set("foo", "bar");
//! let mut resolver = VarsResolver::new(&vars);
//!
//! let tokens = Params::new(r#"\echo :foo :'foo' :"foo" :nope :{?foo}"#)
//!     .all(&mut resolver)
//!     .unwrap();
//! assert_eq!(tokens, [r"\echo", "bar", "'bar'", "\"bar\"", ":nope", "TRUE"]);
//! ```
//!
//! ## Split a line in one step
//!
//! [`split`] is shorthand for `Params::new(line).all(resolver)`.
//!
//! ```
//! use stmt_params::{Literal, split};
//!
//! let tokens = split("select 'a b' :undefined", &mut Literal).unwrap();
//! assert_eq!(tokens, ["select", "a b", ":undefined"]);
//! ```
//!
//! ## Custom resolvers
//!
//! ```
//! use stmt_params::{Lookup, Params, Resolution, ResolveError};
//!
//! let mut upper = |lookup: &Lookup<'_>| -> Result<Resolution, ResolveError> {
//!     Ok(lookup.name().map(str::to_uppercase).into())
//! };
//! let tokens = Params::new("select :x").all(&mut upper).unwrap();
//! assert_eq!(tokens, ["select", "X"]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

mod cursor;
pub mod ident;
pub mod params;
pub mod quote;
pub mod resolve;
pub mod var;
pub mod vars;

pub use params::{Params, Tokens};
pub use quote::QuoteKind;
pub use resolve::{EXISTS_MARKER, Literal, Lookup, Resolution, ResolveError, Resolver};
pub use var::VarStyle;
pub use vars::{Vars, VarsResolver};

/// Failure while splitting a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A quoted span or quoted variable reference has no closing quote.
    #[error("unterminated quoted string")]
    UnterminatedQuotedString,
    /// A double-quoted span contains a backslash.
    #[error("invalid quoted string")]
    InvalidQuotedString,
    /// The resolver failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Split `line` in one step.
pub fn split<R>(line: &str, resolver: &mut R) -> Result<Vec<String>, Error>
where
    R: Resolver + ?Sized,
{
    Params::new(line).all(resolver)
}
