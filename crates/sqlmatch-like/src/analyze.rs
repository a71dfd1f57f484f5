//! LIKE pattern analysis for index optimization.
//!
//! A single left-to-right walk over a **compressed** pattern collects the
//! wildcard census and the last logical position usable as the end of a
//! literal prefix for range-bound synthesis.

use sqlmatch_types::{CharIndex, Codeset};

use crate::pattern::PatternChars;

/// Result of [`analyze_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeOptInfo {
    /// Count of logical characters (escape markers not counted, escaped
    /// characters counted once).
    pub num_logical_chars: usize,
    /// Count of unescaped MATCH_MANY wildcards.
    pub num_match_many: usize,
    /// Count of unescaped MATCH_ONE wildcards.
    pub num_match_one: usize,
    /// Logical index of the last character that can safely end the literal
    /// prefix used for bound computation, or `None` when no safe prefix
    /// exists (e.g. the pattern starts with MATCH_MANY).
    pub last_safe_logical_pos: Option<CharIndex>,
}

impl LikeOptInfo {
    /// Whether the pattern contains any unescaped wildcard.
    pub const fn has_wildcards(&self) -> bool {
        self.num_match_many > 0 || self.num_match_one > 0
    }
}

/// Analyze a compressed pattern in one pass.
///
/// A character extends the safe prefix only while no MATCH_MANY has been
/// seen (everything after a `%` is unconstrained for bound purposes), and
/// only if it is neither an unescaped wildcard nor the codeset's
/// minimum/maximum boundary character (the maximum has no successor to
/// build a strict upper bound from, and the minimum degenerates the lower
/// bound).
#[must_use]
pub fn analyze_pattern(pattern: &[u8], codeset: Codeset, escape: Option<&[u8]>) -> LikeOptInfo {
    let mut info = LikeOptInfo::default();
    for (idx, pc) in PatternChars::new(pattern, codeset, escape).enumerate() {
        info.num_logical_chars += 1;
        if pc.is_match_many() {
            info.num_match_many += 1;
        } else if pc.is_match_one() {
            info.num_match_one += 1;
        } else if info.num_match_many == 0 && !codeset.is_bound_char(pc.bytes) {
            info.last_safe_logical_pos = Some(CharIndex(idx));
        }
    }
    info
}
