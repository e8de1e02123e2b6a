use crate::Error;
use crate::cursor::Cursor;

/// The three quote characters recognized on a statement line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    /// `'...'`: literal text; `''` and `\'` both stand for one `'`.
    Single,
    /// `"..."`: literal text; `""` stands for one `"`, backslashes are rejected.
    Double,
    /// `` `...` ``: opaque command text, no escapes.
    Backtick,
}

impl QuoteKind {
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            '`' => Some(Self::Backtick),
            _ => None,
        }
    }

    #[must_use]
    pub const fn delimiter(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Backtick => '`',
        }
    }
}

/// A scanned quoted span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Quoted {
    pub kind: QuoteKind,
    /// Inner content exactly as written, without the delimiters.
    pub raw: String,
    /// Inner content after the kind's escape rules. Equal to `raw` for backticks.
    pub text: String,
}

/// Scans a quoted span. The cursor must sit on the opening delimiter; on success
/// it is left just past the closing one.
pub(crate) fn read_quoted(cur: &mut Cursor, kind: QuoteKind) -> Result<Quoted, Error> {
    let delim = kind.delimiter();
    cur.advance(); // skip opening quote
    let start = cur.pos();

    let mut text = String::new();
    loop {
        let Some(ch) = cur.advance() else {
            return Err(Error::UnterminatedQuotedString);
        };
        match ch {
            c if c == delim => {
                if kind != QuoteKind::Backtick && cur.peek() == Some(delim) {
                    cur.advance();
                    text.push(delim);
                } else {
                    break;
                }
            }
            '\\' if kind == QuoteKind::Double => {
                return Err(Error::InvalidQuotedString);
            }
            '\\' if kind == QuoteKind::Single && cur.peek() == Some('\'') => {
                cur.advance();
                text.push('\'');
            }
            c => text.push(c),
        }
    }

    // closing delimiter already consumed
    let raw = cur.slice(start, cur.pos() - 1);
    let text = if kind == QuoteKind::Backtick {
        raw.clone()
    } else {
        text
    };
    Ok(Quoted { kind, raw, text })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Quoted, Error> {
        let mut cur = Cursor::new(input);
        let kind = cur
            .peek()
            .and_then(QuoteKind::from_char)
            .expect("input starts with a quote");
        read_quoted(&mut cur, kind)
    }

    #[test]
    fn single_plain() {
        let q = read("'hello'").expect("quoted");
        assert_eq!(q.kind, QuoteKind::Single);
        assert_eq!(q.text, "hello");
        assert_eq!(q.raw, "hello");
    }

    #[test]
    fn single_doubling() {
        let q = read("'hello''yes'").expect("quoted");
        assert_eq!(q.text, "hello'yes");
        assert_eq!(q.raw, "hello''yes");
    }

    #[test]
    fn single_backslash_quote() {
        let q = read(r"'hello\'...\'yes'").expect("quoted");
        assert_eq!(q.text, "hello'...'yes");
    }

    #[test]
    fn single_lone_backslash_kept() {
        let q = read(r"'a\b'").expect("quoted");
        assert_eq!(q.text, r"a\b");
    }

    #[test]
    fn single_empty() {
        let q = read("''").expect("quoted");
        assert_eq!(q.text, "");
    }

    #[test]
    fn double_doubling() {
        let q = read(r#""say ""hi""""#).expect("quoted");
        assert_eq!(q.text, r#"say "hi""#);
    }

    #[test]
    fn double_rejects_backslash() {
        assert_eq!(read(r#""a\b""#), Err(Error::InvalidQuotedString));
        assert_eq!(read(r#""a\"b""#), Err(Error::InvalidQuotedString));
        // rejected before the missing terminator is noticed
        assert_eq!(read(r#""a\"#), Err(Error::InvalidQuotedString));
    }

    #[test]
    fn backtick_is_verbatim() {
        let q = read(r"`echo 'x'\n`").expect("quoted");
        assert_eq!(q.kind, QuoteKind::Backtick);
        assert_eq!(q.text, r"echo 'x'\n");
        assert_eq!(q.raw, q.text);
    }

    #[test]
    fn unterminated() {
        for input in ["'hello", "\"hello", "`foo", r"'ends with\'"] {
            assert_eq!(read(input), Err(Error::UnterminatedQuotedString), "{input}");
        }
    }

    #[test]
    fn stops_after_closing_quote() {
        let mut cur = Cursor::new("'a'b");
        read_quoted(&mut cur, QuoteKind::Single).expect("quoted");
        assert_eq!(cur.peek(), Some('b'));
    }
}
