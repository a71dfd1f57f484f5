//! Range-bound synthesis from an analyzed LIKE pattern.
//!
//! `col LIKE 'prefix%'` rewrites to `col >= lower AND col < upper`, where
//! `lower` is the literal prefix and `upper` is the prefix with its final
//! character replaced by its collation successor. The bounds must never
//! exclude a string the pattern could match (soundness); tightness is best
//! effort.

use sqlmatch_types::{BoundKind, Codeset, Collation};

use crate::analyze::LikeOptInfo;
use crate::pattern::PatternChars;

/// Build one bound literal from a compressed pattern and its analysis.
///
/// Returns `None` for the degenerate case: no safe prefix exists (the
/// caller substitutes the domain minimum/maximum string), or the collation
/// reports no successor for the boundary character when a strict upper
/// bound was requested.
#[must_use]
pub fn synthesize_bound(
    pattern: &[u8],
    codeset: Codeset,
    escape: Option<&[u8]>,
    info: &LikeOptInfo,
    kind: BoundKind,
    collation: &dyn Collation,
) -> Option<Vec<u8>> {
    let last_safe = info.last_safe_logical_pos?;
    // Room for the prefix plus a successor that may be wider than the
    // character it replaces.
    let mut out = Vec::with_capacity(pattern.len() + 4);
    for (idx, pc) in PatternChars::new(pattern, codeset, escape).enumerate() {
        if idx > last_safe.0 {
            break;
        }
        let at_boundary = idx == last_safe.0;
        if pc.is_match_one() {
            // Strictly before the boundary (the analyzer never marks a
            // wildcard safe): MATCH_ONE admits any character, so the
            // tightest bound substitutes the codeset extreme.
            out.extend_from_slice(match kind {
                BoundKind::Lower => codeset.min_bound_char(),
                BoundKind::Upper => codeset.max_bound_char(),
            });
        } else if at_boundary && kind == BoundKind::Upper {
            // Strict exclusive limit: every string with this literal
            // prefix sorts below prefix[..-1] + successor(last).
            out.extend_from_slice(&collation.successor(pc.bytes, codeset)?);
        } else {
            out.extend_from_slice(pc.bytes);
        }
    }
    Some(out)
}
