use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::Error;
use crate::cursor::Cursor;
use crate::quote::{QuoteKind, Quoted, read_quoted};
use crate::resolve::{Lookup, Resolution, Resolver};
use crate::var::{VarRef, recognize};

/// One piece of a token, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Quoted(Quoted),
    Variable(VarRef),
}

impl Segment {
    /// The request this segment makes of the resolver, if any.
    fn lookup(&self) -> Option<Lookup<'_>> {
        match self {
            Self::Literal(_) => None,
            Self::Quoted(q) => match q.kind {
                QuoteKind::Backtick => Some(Lookup::Command { text: &q.raw }),
                QuoteKind::Single | QuoteKind::Double => None,
            },
            Self::Variable(v) if v.exists => Some(Lookup::Exists { name: &v.name }),
            Self::Variable(v) => Some(Lookup::Value {
                name: &v.name,
                style: v.style,
            }),
        }
    }

    /// Text this segment contributes when nothing resolves it.
    fn literal_text(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Quoted(q) => match q.kind {
                QuoteKind::Backtick => format!("`{}`", q.raw),
                QuoteKind::Single | QuoteKind::Double => q.text.clone(),
            },
            Self::Variable(v) => v.raw.clone(),
        }
    }
}

/// A single line of user input, split into whitespace-separated tokens with
/// quotes removed and variable references substituted.
///
/// Each instance scans its line once, through repeated [`Params::next`] calls or
/// one [`Params::all`] call.
#[derive(Debug, Clone)]
pub struct Params {
    raw: String,
    cur: Cursor,
    done: bool,
}

impl Params {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let cur = Cursor::new(&raw);
        Self {
            raw,
            cur,
            done: false,
        }
    }

    /// The line exactly as given to [`Params::new`].
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Reads the next token.
    ///
    /// Returns `Ok(None)` once the line is exhausted. After an error the line is
    /// abandoned and later calls return `Ok(None)`.
    pub fn next<R>(&mut self, resolver: &mut R) -> Result<Option<String>, Error>
    where
        R: Resolver + ?Sized,
    {
        if self.done {
            return Ok(None);
        }
        match self.read_token(resolver) {
            Ok(Some(token)) => {
                trace!(%token, "token");
                Ok(Some(token))
            }
            Ok(None) => {
                self.done = true;
                Ok(None)
            }
            Err(err) => {
                debug!(error = %err, unread = self.cur.remaining().len(), "abandoning line");
                self.done = true;
                Err(err)
            }
        }
    }

    /// Reads every remaining token. On error, tokens already read in this call
    /// are discarded.
    pub fn all<R>(&mut self, resolver: &mut R) -> Result<Vec<String>, Error>
    where
        R: Resolver + ?Sized,
    {
        let mut tokens = Vec::new();
        while let Some(token) = self.next(resolver)? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Iterator over the remaining tokens. Ends after the first error.
    #[must_use]
    pub fn tokens<'p, R>(&'p mut self, resolver: &'p mut R) -> Tokens<'p, R>
    where
        R: Resolver + ?Sized,
    {
        Tokens {
            params: self,
            resolver,
        }
    }

    fn read_token<R>(&mut self, resolver: &mut R) -> Result<Option<String>, Error>
    where
        R: Resolver + ?Sized,
    {
        self.cur.skip_whitespace();
        if self.cur.is_eof() {
            return Ok(None);
        }

        let mut token = String::new();
        while let Some(segment) = self.read_segment()? {
            let Some(lookup) = segment.lookup() else {
                token.push_str(&segment.literal_text());
                continue;
            };
            match resolver.resolve(&lookup)? {
                Resolution::Replaced(text) => token.push_str(&text),
                Resolution::Unhandled => {
                    debug!(%lookup, "unresolved, keeping literal text");
                    token.push_str(&segment.literal_text());
                }
            }
        }
        Ok(Some(token))
    }

    /// Reads one segment, or `None` at whitespace or end of input.
    fn read_segment(&mut self) -> Result<Option<Segment>, Error> {
        let Some(ch) = self.cur.peek() else {
            return Ok(None);
        };
        if ch.is_whitespace() {
            return Ok(None);
        }
        if let Some(kind) = QuoteKind::from_char(ch) {
            return read_quoted(&mut self.cur, kind).map(|q| Some(Segment::Quoted(q)));
        }
        if ch == ':' {
            if let Some(var) = recognize(&mut self.cur) {
                return Ok(Some(Segment::Variable(var)));
            }
        }
        Ok(Some(Segment::Literal(self.read_literal())))
    }

    fn read_literal(&mut self) -> String {
        let start = self.cur.pos();
        // the first rune is literal even when it is an unmatched colon
        self.cur.advance();
        while let Some(ch) = self.cur.peek() {
            if ch.is_whitespace() || ch == ':' || QuoteKind::from_char(ch).is_some() {
                break;
            }
            self.cur.advance();
        }
        self.cur.slice(start, self.cur.pos())
    }
}

/// Iterator returned by [`Params::tokens`].
#[derive(Debug)]
pub struct Tokens<'p, R: ?Sized> {
    params: &'p mut Params,
    resolver: &'p mut R,
}

impl<R> Iterator for Tokens<'_, R>
where
    R: Resolver + ?Sized,
{
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.params.next(&mut *self.resolver).transpose()
    }
}

impl<R> FusedIterator for Tokens<'_, R> where R: Resolver + ?Sized {}
