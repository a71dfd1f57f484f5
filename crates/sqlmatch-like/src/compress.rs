//! LIKE pattern compression.
//!
//! `%%` is logically equivalent to `%`, so runs of two or more consecutive
//! unescaped MATCH_MANY markers collapse to a single occurrence. Escaped
//! wildcards are ordinary characters and pass through untouched.

use sqlmatch_types::Codeset;

use crate::pattern::{PatternChars, MATCH_MANY};

/// Produce a semantically equivalent pattern with MATCH_MANY runs
/// collapsed.
///
/// Compression is idempotent and never changes match semantics. The output
/// buffer is sized for the worst case up front (the output can never be
/// wider than the input) and trimmed to its actual size.
#[must_use]
pub fn compress_pattern(pattern: &[u8], codeset: Codeset, escape: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::with_capacity(pattern.len());
    let mut in_many_run = false;
    for pc in PatternChars::new(pattern, codeset, escape) {
        if pc.is_match_many() {
            if !in_many_run {
                out.push(MATCH_MANY);
                in_many_run = true;
            }
            continue;
        }
        in_many_run = false;
        if pc.escaped {
            // Escape resolution already validated the escape as a single
            // logical character.
            out.extend_from_slice(escape.unwrap_or_default());
        }
        out.extend_from_slice(pc.bytes);
    }
    out.shrink_to_fit();
    out
}
