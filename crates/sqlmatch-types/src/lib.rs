//! Value, codeset, and collation types shared by the LIKE engine and the
//! bound-derivation pass.
//!
//! Two index newtypes keep byte arithmetic and logical-character arithmetic
//! apart: [`ByteOffset`] is a position inside a byte buffer, [`CharIndex`]
//! counts logical characters. They deliberately do not convert into each
//! other; mixing the two units is the classic LIKE-engine bug.

pub mod codeset;
pub mod collation;
pub mod value;

pub use codeset::{CharCursor, Codeset};
pub use collation::{
    BinaryCollation, Collation, CollationId, CollationRegistry, NoCaseCollation, COLL_BINARY,
    COLL_NOCASE,
};
pub use value::{BoundKind, Datum, LikeBound, MatchResult, TextString};

/// A 0-based byte position inside a target or pattern buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteOffset(pub usize);

/// A 0-based logical-character index (post-escape-resolution) in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CharIndex(pub usize);
