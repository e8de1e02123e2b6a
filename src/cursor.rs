/// Positional reader over a line of input, one Unicode scalar value at a time.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    runes: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            runes: input.chars().collect(),
            pos: 0,
        }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.runes.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Looks `offset` runes past the current position without moving.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<char> {
        self.runes.get(self.pos + offset).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Moves forward `count` runes, clamped to the end of input.
    pub(crate) fn advance_by(&mut self, count: usize) {
        self.pos = self.pos.saturating_add(count).min(self.runes.len());
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Text of the runes in `start..end`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.runes.len());
        self.runes.get(start..end).unwrap_or_default().iter().collect()
    }

    /// Runes not yet consumed.
    pub(crate) fn remaining(&self) -> &[char] {
        self.runes.get(self.pos..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let mut cur = Cursor::new("");
        assert!(cur.is_eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.advance(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn walks_runes_not_bytes() {
        let mut cur = Cursor::new("型示:x");
        assert_eq!(cur.advance(), Some('型'));
        assert_eq!(cur.peek(), Some('示'));
        assert_eq!(cur.peek_at(1), Some(':'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.remaining(), ['示', ':', 'x']);
    }

    #[test]
    fn advance_by_clamps() {
        let mut cur = Cursor::new("ab");
        cur.advance_by(10);
        assert!(cur.is_eof());
        assert_eq!(cur.pos(), 2);
        assert!(cur.remaining().is_empty());
    }

    #[test]
    fn skip_whitespace_stops_at_text() {
        let mut cur = Cursor::new(" \t\n x ");
        cur.skip_whitespace();
        assert_eq!(cur.peek(), Some('x'));
    }

    #[test]
    fn slice_out_of_range_is_empty() {
        let cur = Cursor::new("abc");
        assert_eq!(cur.slice(1, 99), "bc");
        assert_eq!(cur.slice(5, 9), "");
    }
}
