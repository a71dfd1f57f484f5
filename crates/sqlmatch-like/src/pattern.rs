//! Escape-aware pattern iteration.
//!
//! The engine, the compressor, the analyzer, and the bound synthesizer all
//! need the same walk: "next logical pattern character, noting whether it
//! was escaped". [`PatternChars`] is that one shared walk; it is lazy,
//! cloneable, and restartable via [`PatternChars::seek`].

use sqlmatch_types::{ByteOffset, Codeset};

/// The MATCH_ONE wildcard marker (`_`): any exactly one logical character.
pub const MATCH_ONE: u8 = b'_';

/// The MATCH_MANY wildcard marker (`%`): any sequence of zero or more
/// logical characters.
pub const MATCH_MANY: u8 = b'%';

/// Escape character selected by `ESCAPE NULL` (SQL convention).
pub const DEFAULT_ESCAPE: &[u8] = b"\\";

/// One logical pattern character after escape resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternChar<'a> {
    /// The character bytes, with any escape marker stripped.
    pub bytes: &'a [u8],
    /// Offset of the unit start in the pattern (the escape byte when
    /// `escaped` is set).
    pub offset: ByteOffset,
    /// Whether an escape character preceded this character.
    pub escaped: bool,
}

impl PatternChar<'_> {
    /// An unescaped MATCH_MANY wildcard.
    pub fn is_match_many(&self) -> bool {
        !self.escaped && self.bytes == [MATCH_MANY]
    }

    /// An unescaped MATCH_ONE wildcard.
    pub fn is_match_one(&self) -> bool {
        !self.escaped && self.bytes == [MATCH_ONE]
    }

    /// Any unescaped wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.is_match_many() || self.is_match_one()
    }
}

/// Iterator over the logical characters of a LIKE pattern.
///
/// The escape character, when configured, must be exactly one logical
/// character (validated by the facade before any iteration starts). An
/// escape character in the final position of the pattern introduces
/// nothing and is yielded as a literal.
#[derive(Debug, Clone)]
pub struct PatternChars<'a> {
    pattern: &'a [u8],
    codeset: Codeset,
    escape: Option<&'a [u8]>,
    pos: usize,
}

impl<'a> PatternChars<'a> {
    /// Create an iterator over `pattern` with an optional escape character.
    #[must_use]
    pub fn new(pattern: &'a [u8], codeset: Codeset, escape: Option<&'a [u8]>) -> Self {
        debug_assert!(escape.map_or(true, |e| {
            !e.is_empty() && codeset.char_size(e, 0) == e.len()
        }));
        Self {
            pattern,
            codeset,
            escape,
            pos: 0,
        }
    }

    /// Current byte position (start of the next unit to be yielded).
    pub const fn byte_pos(&self) -> ByteOffset {
        ByteOffset(self.pos)
    }

    /// Reposition the iterator. `pos` must be a unit boundary previously
    /// obtained from [`PatternChars::byte_pos`].
    pub fn seek(&mut self, pos: ByteOffset) {
        debug_assert!(pos.0 <= self.pattern.len());
        self.pos = pos.0;
    }

    /// Whether the whole pattern has been consumed.
    pub const fn is_exhausted(&self) -> bool {
        self.pos >= self.pattern.len()
    }
}

impl<'a> Iterator for PatternChars<'a> {
    type Item = PatternChar<'a>;

    fn next(&mut self) -> Option<PatternChar<'a>> {
        if self.pos >= self.pattern.len() {
            return None;
        }
        let start = self.pos;
        let width = self.codeset.char_size(self.pattern, start);
        let ch = &self.pattern[start..start + width];
        if let Some(esc) = self.escape {
            // A trailing lone escape falls through and is yielded literal.
            if ch == esc && start + width < self.pattern.len() {
                let lit_start = start + width;
                let lit_width = self.codeset.char_size(self.pattern, lit_start);
                self.pos = lit_start + lit_width;
                return Some(PatternChar {
                    bytes: &self.pattern[lit_start..lit_start + lit_width],
                    offset: ByteOffset(start),
                    escaped: true,
                });
            }
        }
        self.pos = start + width;
        Some(PatternChar {
            bytes: ch,
            offset: ByteOffset(start),
            escaped: false,
        })
    }
}
