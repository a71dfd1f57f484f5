//! Codeset layer: logical-character widths, forward/backward iteration,
//! pad and boundary characters.
//!
//! Matching and bound logic operate on logical characters (1..=4 bytes in
//! UTF-8, always 1 byte in ISO-8859-1), never on raw bytes.

use std::fmt;

use crate::ByteOffset;

/// Maximum Unicode scalar value, used as the UTF-8 upper boundary character.
const UTF8_MAX_CHAR: &[u8] = "\u{10FFFF}".as_bytes();

/// A character encoding governing the byte width of logical characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Codeset {
    /// Variable-width UTF-8 (1..=4 bytes per character).
    Utf8,
    /// Single-byte ISO-8859-1 (Latin-1).
    Iso88591,
}

impl Codeset {
    /// Byte width of the logical character starting at `offset`.
    ///
    /// A truncated multi-byte sequence at the end of the buffer is clamped
    /// to the remaining length so iteration always terminates.
    pub fn char_size(self, bytes: &[u8], offset: usize) -> usize {
        debug_assert!(offset < bytes.len());
        let width = match self {
            Self::Iso88591 => 1,
            Self::Utf8 => match bytes[offset] {
                b if b < 0x80 => 1,
                b if b < 0xE0 => 2,
                b if b < 0xF0 => 3,
                _ => 4,
            },
        };
        width.min(bytes.len() - offset)
    }

    /// Start offset and width of the logical character ending at `end`.
    ///
    /// `end` must be a character boundary greater than zero.
    pub fn prev_char(self, bytes: &[u8], end: usize) -> (usize, usize) {
        debug_assert!(end > 0 && end <= bytes.len());
        match self {
            Self::Iso88591 => (end - 1, 1),
            Self::Utf8 => {
                let mut start = end - 1;
                while start > 0 && bytes[start] & 0xC0 == 0x80 {
                    start -= 1;
                }
                (start, end - start)
            }
        }
    }

    /// The codeset's logical pad/space character.
    ///
    /// Trailing pads are insignificant when the pattern is exhausted,
    /// mirroring fixed-length CHAR comparison semantics.
    pub const fn pad_char(self) -> &'static [u8] {
        b" "
    }

    /// The minimum sortable character of this codeset.
    pub const fn min_bound_char(self) -> &'static [u8] {
        b"\x00"
    }

    /// The maximum sortable character of this codeset.
    pub const fn max_bound_char(self) -> &'static [u8] {
        match self {
            Self::Iso88591 => b"\xFF",
            Self::Utf8 => UTF8_MAX_CHAR,
        }
    }

    /// Whether `ch` is the codeset's minimum or maximum boundary character.
    ///
    /// Boundary characters cannot anchor a range bound: the maximum has no
    /// successor and the minimum collapses the lower bound.
    pub fn is_bound_char(self, ch: &[u8]) -> bool {
        ch == self.min_bound_char() || ch == self.max_bound_char()
    }

    /// Whether the buffer tail starting at `offset` is entirely pad
    /// characters.
    pub fn rest_is_pad(self, bytes: &[u8], mut offset: usize) -> bool {
        let pad = self.pad_char();
        while offset < bytes.len() {
            let width = self.char_size(bytes, offset);
            if &bytes[offset..offset + width] != pad {
                return false;
            }
            offset += width;
        }
        true
    }

    /// Codeset name for error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso88591 => "ISO-8859-1",
        }
    }
}

impl fmt::Display for Codeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Forward/backward cursor over the logical characters of a byte buffer.
#[derive(Debug, Clone)]
pub struct CharCursor<'a> {
    bytes: &'a [u8],
    codeset: Codeset,
    pos: usize,
}

impl<'a> CharCursor<'a> {
    /// Create a cursor positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8], codeset: Codeset) -> Self {
        Self {
            bytes,
            codeset,
            pos: 0,
        }
    }

    /// Current byte position.
    pub const fn pos(&self) -> ByteOffset {
        ByteOffset(self.pos)
    }

    /// Reposition the cursor. `pos` must be a character boundary.
    pub fn seek(&mut self, pos: ByteOffset) {
        debug_assert!(pos.0 <= self.bytes.len());
        self.pos = pos.0;
    }

    /// Whether every logical character has been consumed.
    pub const fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The bytes of the current character without advancing.
    pub fn peek(&self) -> Option<&'a [u8]> {
        if self.is_exhausted() {
            return None;
        }
        let width = self.codeset.char_size(self.bytes, self.pos);
        Some(&self.bytes[self.pos..self.pos + width])
    }

    /// Advance past the current character, returning its bytes.
    pub fn advance(&mut self) -> Option<&'a [u8]> {
        let ch = self.peek()?;
        self.pos += ch.len();
        Some(ch)
    }

    /// Step back one logical character, returning its bytes.
    pub fn retreat(&mut self) -> Option<&'a [u8]> {
        if self.pos == 0 {
            return None;
        }
        let (start, width) = self.codeset.prev_char(self.bytes, self.pos);
        self.pos = start;
        Some(&self.bytes[start..start + width])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_size_utf8() {
        let s = "a\u{E9}\u{4E2D}\u{1F600}".as_bytes(); // 1 + 2 + 3 + 4 bytes
        assert_eq!(Codeset::Utf8.char_size(s, 0), 1);
        assert_eq!(Codeset::Utf8.char_size(s, 1), 2);
        assert_eq!(Codeset::Utf8.char_size(s, 3), 3);
        assert_eq!(Codeset::Utf8.char_size(s, 6), 4);
    }

    #[test]
    fn test_char_size_iso() {
        let s: &[u8] = &[0x61, 0xE9, 0xFF];
        for i in 0..s.len() {
            assert_eq!(Codeset::Iso88591.char_size(s, i), 1);
        }
    }

    #[test]
    fn test_char_size_truncated_sequence_clamped() {
        // Lone lead byte of a 4-byte sequence at the end of the buffer.
        let s: &[u8] = &[b'a', 0xF0];
        assert_eq!(Codeset::Utf8.char_size(s, 1), 1);
    }

    #[test]
    fn test_prev_char() {
        let s = "a\u{E9}b".as_bytes();
        assert_eq!(Codeset::Utf8.prev_char(s, s.len()), (3, 1));
        assert_eq!(Codeset::Utf8.prev_char(s, 3), (1, 2));
        assert_eq!(Codeset::Utf8.prev_char(s, 1), (0, 1));
    }

    #[test]
    fn test_rest_is_pad() {
        assert!(Codeset::Utf8.rest_is_pad(b"abc   ", 3));
        assert!(Codeset::Utf8.rest_is_pad(b"abc", 3));
        assert!(!Codeset::Utf8.rest_is_pad(b"abc  x", 3));
    }

    #[test]
    fn test_bound_chars() {
        assert!(Codeset::Utf8.is_bound_char(b"\x00"));
        assert!(Codeset::Utf8.is_bound_char("\u{10FFFF}".as_bytes()));
        assert!(!Codeset::Utf8.is_bound_char(b"a"));
        assert!(Codeset::Iso88591.is_bound_char(b"\xFF"));
        assert!(!Codeset::Iso88591.is_bound_char(b"\xFE"));
    }

    #[test]
    fn test_cursor_round_trip() {
        let s = "x\u{E9}y".as_bytes();
        let mut cur = CharCursor::new(s, Codeset::Utf8);
        assert_eq!(cur.advance(), Some(&b"x"[..]));
        assert_eq!(cur.advance(), Some("\u{E9}".as_bytes()));
        assert_eq!(cur.pos(), ByteOffset(3));
        assert_eq!(cur.retreat(), Some("\u{E9}".as_bytes()));
        assert_eq!(cur.pos(), ByteOffset(1));
        assert_eq!(cur.advance(), Some("\u{E9}".as_bytes()));
        assert_eq!(cur.advance(), Some(&b"y"[..]));
        assert!(cur.is_exhausted());
        assert_eq!(cur.advance(), None);
    }
}
