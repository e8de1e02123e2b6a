use crate::cursor::Cursor;
use crate::ident::{is_ident_continue, is_ident_start};

/// How a variable reference was written after its colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarStyle {
    /// `:name`
    Bare,
    /// `:'name'`
    SingleQuoted,
    /// `:"name"`
    DoubleQuoted,
}

impl VarStyle {
    #[must_use]
    pub const fn quote(self) -> Option<char> {
        match self {
            Self::Bare => None,
            Self::SingleQuoted => Some('\''),
            Self::DoubleQuoted => Some('"'),
        }
    }
}

/// A recognized variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VarRef {
    pub name: String,
    pub style: VarStyle,
    /// `:{?name}` form.
    pub exists: bool,
    /// The reference as written, colon and delimiters included.
    pub raw: String,
}

/// Number of identifier runes starting `offset` runes past the cursor.
fn ident_len(cur: &Cursor, offset: usize) -> usize {
    match cur.peek_at(offset) {
        Some(ch) if is_ident_start(ch) => {}
        _ => return 0,
    }
    let mut len = 1;
    while cur.peek_at(offset + len).is_some_and(is_ident_continue) {
        len += 1;
    }
    len
}

/// Tries to match a variable reference at the colon under the cursor.
///
/// On a match the cursor is moved past the reference. On a mismatch nothing is
/// consumed and the caller treats the colon as literal text.
pub(crate) fn recognize(cur: &mut Cursor) -> Option<VarRef> {
    if cur.peek() != Some(':') {
        return None;
    }
    let start = cur.pos();

    // (name offset, style, exists, closing rune)
    let (offset, style, exists, close) = match cur.peek_at(1)? {
        '{' if cur.peek_at(2) == Some('?') => (3, VarStyle::Bare, true, Some('}')),
        '\'' => (2, VarStyle::SingleQuoted, false, Some('\'')),
        '"' => (2, VarStyle::DoubleQuoted, false, Some('"')),
        _ => (1, VarStyle::Bare, false, None),
    };

    let len = ident_len(cur, offset);
    if len == 0 {
        return None;
    }
    let mut end = offset + len;
    if let Some(close) = close {
        if cur.peek_at(end) != Some(close) {
            return None;
        }
        end += 1;
    }

    let name = cur.slice(start + offset, start + offset + len);
    let raw = cur.slice(start, start + end);
    cur.advance_by(end);
    Some(VarRef {
        name,
        style,
        exists,
        raw,
    })
}
