//! Runtime value container and LIKE-specific result types.

use std::fmt;

use crate::codeset::Codeset;
use crate::collation::{CollationId, COLL_BINARY};

/// A character string with its codeset and collation.
///
/// The bytes are owned; the engine treats them as an immutable sequence of
/// logical characters in `codeset`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextString {
    /// Raw character bytes.
    pub bytes: Vec<u8>,
    /// Encoding of `bytes`.
    pub codeset: Codeset,
    /// Collation the string compares under.
    pub collation: CollationId,
}

impl TextString {
    /// Create a UTF-8 string under the BINARY collation.
    #[must_use]
    pub fn utf8(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
            codeset: Codeset::Utf8,
            collation: COLL_BINARY,
        }
    }

    /// Create a string from raw bytes in an explicit codeset/collation.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, codeset: Codeset, collation: CollationId) -> Self {
        Self {
            bytes,
            codeset,
            collation,
        }
    }

    /// Override the collation, keeping bytes and codeset.
    #[must_use]
    pub fn with_collation(mut self, collation: CollationId) -> Self {
        self.collation = collation;
        self
    }

    /// Borrow the bytes as `&str` when the codeset is UTF-8 and the bytes
    /// are well-formed.
    pub fn as_str(&self) -> Option<&str> {
        match self.codeset {
            Codeset::Utf8 => std::str::from_utf8(&self.bytes).ok(),
            Codeset::Iso88591 => None,
        }
    }

    /// Whether the string has zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A dynamically-typed runtime value, as handed over by the query
/// evaluator.
///
/// Only the variants the LIKE subsystem can receive are modeled; a
/// non-character variant exists so type validation has something to
/// reject.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Datum {
    /// SQL NULL.
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A character string.
    Text(TextString),
}

impl Datum {
    /// Create a UTF-8 text datum under the BINARY collation.
    #[must_use]
    pub fn text(s: &str) -> Self {
        Self::Text(TextString::utf8(s))
    }

    /// Returns true if this is a NULL value.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to borrow the character-string payload.
    pub const fn as_text(&self) -> Option<&TextString> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Type name for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Integer(_) => "INTEGER",
            Self::Text(_) => "CHARACTER",
        }
    }
}

/// Three-valued result of a LIKE evaluation.
///
/// `Unknown` carries SQL NULL propagation; engine failures travel on the
/// `Err` side of `Result`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MatchResult {
    /// The target matches the pattern.
    True,
    /// The target does not match the pattern.
    False,
    /// NULL input; the comparison is undecided.
    Unknown,
}

impl MatchResult {
    /// SQL three-valued AND.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    /// SQL three-valued OR.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::True, _) | (_, Self::True) => Self::True,
            (Self::False, Self::False) => Self::False,
            _ => Self::Unknown,
        }
    }

    /// SQL three-valued NOT.
    #[must_use]
    pub const fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Whether the row passes a WHERE predicate (only TRUE does).
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for MatchResult {
    fn from(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Which side of the range rewrite a bound request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// Inclusive lower bound (`col >= bound`).
    Lower,
    /// Exclusive upper bound (`col < bound`).
    Upper,
}

/// A range-scan bound derived from a LIKE pattern.
///
/// The degenerate variants stand for the domain's minimum/maximum
/// representable string; the optimizer maps them to an unbounded scan
/// side.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LikeBound {
    /// The domain minimum (conceptually negative infinity).
    DomainMin,
    /// The domain maximum (conceptually positive infinity).
    DomainMax,
    /// A literal bound usable in a `>=` / `<` predicate.
    Literal(TextString),
}

impl LikeBound {
    /// Borrow the literal payload, if any.
    pub const fn as_literal(&self) -> Option<&TextString> {
        match self {
            Self::Literal(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datum_accessors() {
        assert!(Datum::Null.is_null());
        assert!(!Datum::text("x").is_null());
        assert_eq!(Datum::Integer(3).type_name(), "INTEGER");
        assert_eq!(Datum::text("x").type_name(), "CHARACTER");
        assert!(Datum::Integer(3).as_text().is_none());
        assert_eq!(
            Datum::text("abc").as_text().unwrap().as_str(),
            Some("abc")
        );
    }

    #[test]
    fn test_trilean_and_or_not() {
        use MatchResult::{False, True, Unknown};
        assert_eq!(True.and(Unknown), Unknown);
        assert_eq!(False.and(Unknown), False);
        assert_eq!(True.or(Unknown), True);
        assert_eq!(False.or(Unknown), Unknown);
        assert_eq!(Unknown.not(), Unknown);
        assert_eq!(True.not(), False);
        assert!(True.is_true());
        assert!(!Unknown.is_true());
    }

    #[test]
    fn test_match_result_display() {
        assert_eq!(MatchResult::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_bound_literal_accessor() {
        let b = LikeBound::Literal(TextString::utf8("SMITH"));
        assert_eq!(b.as_literal().unwrap().as_str(), Some("SMITH"));
        assert!(LikeBound::DomainMin.as_literal().is_none());
    }
}
