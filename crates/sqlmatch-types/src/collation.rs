//! Collation trait, built-in collations, and the id-keyed registry.
//!
//! Collations are pure comparators plus two LIKE-specific services: a
//! leading-unit matcher and a successor ("next alphabetic character")
//! used by upper-bound synthesis. They are open extension points.
//!
//! # Contract
//!
//! Implementations **must** be:
//! - **Deterministic**: same inputs always produce the same output.
//! - **Consistent**: `match_leading(t, f)` succeeds iff the consumed
//!   target prefix compares `Equal` to the consumed fragment prefix
//!   under `compare`.
//! - **Progressing**: a successful `match_leading` consumes at least one
//!   fragment character.
//! - **Ordered successors**: `successor(c)` sorts strictly after `c`, with
//!   no representable unit between them.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use sqlmatch_error::{MatchError, Result};

use crate::codeset::Codeset;

/// Identifier of a registered collation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub struct CollationId(pub u32);

/// Well-known id of the built-in BINARY collation.
pub const COLL_BINARY: CollationId = CollationId(0);

/// Well-known id of the built-in NOCASE collation.
pub const COLL_NOCASE: CollationId = CollationId(1);

/// Ordering, equivalence, and successor rules layered atop a codeset.
///
/// `match_leading` is the primitive the LIKE engine matches literal runs
/// with. A collation may treat a sequence of logical characters as a
/// single comparable unit (a contraction), on either side: one fragment
/// character may consume several target characters, and several fragment
/// characters may collapse into one target character.
pub trait Collation: Send + Sync {
    /// Collation name (for `COLLATE name` and error messages).
    fn name(&self) -> &str;

    /// Compare two byte strings under this collation.
    fn compare(&self, left: &[u8], right: &[u8], codeset: Codeset) -> Ordering;

    /// Match the leading sortable unit(s) of `target` against the leading
    /// unit(s) of `fragment`, a full escape-resolved literal run between
    /// wildcards.
    ///
    /// Returns `(fragment_bytes, target_bytes)` consumed on a match —
    /// at least one fragment character — or `None` on a mismatch or when
    /// the target is too short. The two counts may differ when a
    /// contraction spans characters on either side.
    fn match_leading(
        &self,
        target: &[u8],
        fragment: &[u8],
        codeset: Codeset,
    ) -> Option<(usize, usize)>;

    /// The next distinct character that sorts immediately after `ch`.
    ///
    /// Returns `None` when `ch` is the maximum representable unit.
    fn successor(&self, ch: &[u8], codeset: Codeset) -> Option<Vec<u8>>;
}

impl std::fmt::Debug for dyn Collation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collation").field("name", &self.name()).finish()
    }
}

// ── Built-in collations ──────────────────────────────────────────────────

/// Encode the scalar value immediately after `ch` in `codeset`.
///
/// The surrogate gap is skipped for UTF-8. Returns `None` at the codeset
/// maximum.
fn codepoint_successor(ch: &[u8], codeset: Codeset) -> Option<Vec<u8>> {
    match codeset {
        Codeset::Iso88591 => {
            let b = *ch.first()?;
            if b == 0xFF {
                None
            } else {
                Some(vec![b + 1])
            }
        }
        Codeset::Utf8 => {
            let c = std::str::from_utf8(ch).ok()?.chars().next()?;
            let mut next = u32::from(c) + 1;
            if (0xD800..=0xDFFF).contains(&next) {
                next = 0xE000;
            }
            let c = char::from_u32(next)?;
            let mut buf = [0_u8; 4];
            Some(c.encode_utf8(&mut buf).as_bytes().to_vec())
        }
    }
}

/// BINARY collation: raw byte comparison, one logical character per unit.
pub struct BinaryCollation;

impl Collation for BinaryCollation {
    fn name(&self) -> &str {
        "BINARY"
    }

    fn compare(&self, left: &[u8], right: &[u8], _codeset: Codeset) -> Ordering {
        left.cmp(right)
    }

    fn match_leading(
        &self,
        target: &[u8],
        fragment: &[u8],
        _codeset: Codeset,
    ) -> Option<(usize, usize)> {
        if !fragment.is_empty() && target.starts_with(fragment) {
            Some((fragment.len(), fragment.len()))
        } else {
            None
        }
    }

    fn successor(&self, ch: &[u8], codeset: Codeset) -> Option<Vec<u8>> {
        codepoint_successor(ch, codeset)
    }
}

/// NOCASE collation: ASCII case-insensitive comparison.
///
/// Only folds ASCII letters (`A-Z` → `a-z`); non-ASCII units compare
/// as-is, so unit widths never change under folding.
pub struct NoCaseCollation;

impl Collation for NoCaseCollation {
    fn name(&self) -> &str {
        "NOCASE"
    }

    fn compare(&self, left: &[u8], right: &[u8], _codeset: Codeset) -> Ordering {
        let l = left.iter().map(u8::to_ascii_lowercase);
        let r = right.iter().map(u8::to_ascii_lowercase);
        l.cmp(r)
    }

    fn match_leading(
        &self,
        target: &[u8],
        fragment: &[u8],
        _codeset: Codeset,
    ) -> Option<(usize, usize)> {
        if !fragment.is_empty()
            && target.len() >= fragment.len()
            && target[..fragment.len()].eq_ignore_ascii_case(fragment)
        {
            Some((fragment.len(), fragment.len()))
        } else {
            None
        }
    }

    fn successor(&self, ch: &[u8], codeset: Codeset) -> Option<Vec<u8>> {
        codepoint_successor(ch, codeset)
    }
}

// ── Registry ─────────────────────────────────────────────────────────────

/// Registry of collations keyed by [`CollationId`], with case-insensitive
/// lookup by name for `COLLATE name` resolution.
pub struct CollationRegistry {
    by_id: HashMap<CollationId, Arc<dyn Collation>>,
    by_name: HashMap<String, CollationId>,
}

fn canonical_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl CollationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry pre-populated with [`BinaryCollation`] and
    /// [`NoCaseCollation`] under their well-known ids.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(COLL_BINARY, Arc::new(BinaryCollation));
        reg.register(COLL_NOCASE, Arc::new(NoCaseCollation));
        reg
    }

    /// Register a collation, replacing any existing one under `id` and
    /// claiming its canonicalized name.
    pub fn register(
        &mut self,
        id: CollationId,
        collation: Arc<dyn Collation>,
    ) -> Option<Arc<dyn Collation>> {
        self.by_name.insert(canonical_name(collation.name()), id);
        self.by_id.insert(id, collation)
    }

    /// Resolve a collation id.
    pub fn resolve(&self, id: CollationId) -> Result<Arc<dyn Collation>> {
        self.by_id
            .get(&id)
            .cloned()
            .ok_or(MatchError::UnknownCollation { id: id.0 })
    }

    /// Resolve a collation by name, case-insensitively.
    pub fn resolve_name(&self, name: &str) -> Result<Arc<dyn Collation>> {
        let id = self
            .by_name
            .get(&canonical_name(name))
            .copied()
            .ok_or_else(|| MatchError::UnknownCollationName {
                name: name.to_owned(),
            })?;
        self.resolve(id)
    }

    /// Resolve the common collation of two operands.
    ///
    /// There is no implicit coercion between distinct collations.
    pub fn common(&self, left: CollationId, right: CollationId) -> Result<CollationId> {
        if left == right {
            Ok(left)
        } else {
            Err(MatchError::IncompatibleCollations {
                left: left.0,
                right: right.0,
            })
        }
    }
}

impl Default for CollationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
