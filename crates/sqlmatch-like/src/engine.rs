//! The LIKE backtracking matcher.
//!
//! A two-state automaton (CHECK / PERCENT) over byte positions, with an
//! explicit stack of saved `(target, pattern)` checkpoint pairs instead of
//! recursion. The stack is hard-capped at [`BACKTRACK_LIMIT`] entries;
//! exceeding the cap is a recoverable error, which keeps worst-case space
//! constant for any input.
//!
//! Literal runs are delegated to the collation one sortable unit at a
//! time; a unit may span several characters on either side (contractions
//! / multi-weight sequences), so the collation reports both the fragment
//! bytes and the target bytes it consumed.

use std::borrow::Cow;

use sqlmatch_error::{MatchError, Result};
use sqlmatch_types::{ByteOffset, CharCursor, Codeset, Collation};

use crate::pattern::{PatternChar, PatternChars};

/// Maximum number of live backtrack checkpoints.
pub const BACKTRACK_LIMIT: usize = 100;

/// A saved resume point: target position paired with the pattern position
/// to replay from.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    target: ByteOffset,
    pattern: ByteOffset,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Check,
    Percent,
}

fn push_checkpoint(stack: &mut Vec<Checkpoint>, target: ByteOffset, pattern: ByteOffset) -> Result<()> {
    if stack.len() >= BACKTRACK_LIMIT {
        return Err(MatchError::BacktrackLimitExceeded {
            limit: BACKTRACK_LIMIT,
        });
    }
    stack.push(Checkpoint { target, pattern });
    Ok(())
}

/// Consume the literal run starting at `first`, leaving `pat` positioned
/// at the next unescaped wildcard (or the end of the pattern).
///
/// A run without escaped characters borrows straight from the pattern;
/// escape markers force an owned copy of the resolved bytes.
fn take_literal_run<'a>(
    pat: &mut PatternChars<'a>,
    first: PatternChar<'a>,
    pattern: &'a [u8],
) -> Cow<'a, [u8]> {
    let start = first.offset.0;
    let mut end = pat.byte_pos().0;
    let mut owned = if first.escaped {
        Some(first.bytes.to_vec())
    } else {
        None
    };
    loop {
        let save = pat.byte_pos();
        let Some(pc) = pat.next() else {
            break;
        };
        if pc.is_wildcard() {
            pat.seek(save);
            break;
        }
        if let Some(buf) = owned.as_mut() {
            buf.extend_from_slice(pc.bytes);
        } else if pc.escaped {
            let mut buf = pattern[start..end].to_vec();
            buf.extend_from_slice(pc.bytes);
            owned = Some(buf);
        }
        end = pat.byte_pos().0;
    }
    match owned {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(&pattern[start..end]),
    }
}

/// Match a resolved literal run against the target at the cursor.
///
/// Every collation call sees the whole unmatched remainder of the run, so
/// one sortable unit may span several pattern characters. Consumption
/// reports are clamped to the remaining target so an out-of-contract
/// collation cannot push the cursor past the end.
fn match_run(
    run: &[u8],
    cursor: &mut CharCursor<'_>,
    target: &[u8],
    codeset: Codeset,
    collation: &dyn Collation,
) -> bool {
    let mut frag_pos = 0;
    while frag_pos < run.len() {
        let rest = &target[cursor.pos().0..];
        let Some((frag_used, target_used)) =
            collation.match_leading(rest, &run[frag_pos..], codeset)
        else {
            return false;
        };
        if frag_used == 0 {
            return false;
        }
        frag_pos += frag_used;
        let next = cursor.pos().0.saturating_add(target_used).min(target.len());
        cursor.seek(ByteOffset(next));
    }
    true
}

/// Pop/slide to the most recent viable checkpoint.
///
/// The top checkpoint's target position advances by one logical character;
/// a checkpoint whose target is exhausted is discarded. Returns `false`
/// when no saved positions remain (overall NO_MATCH).
fn resume_from_checkpoint(
    stack: &mut Vec<Checkpoint>,
    pat: &mut PatternChars<'_>,
    cursor: &mut CharCursor<'_>,
    target: &[u8],
    codeset: Codeset,
) -> bool {
    while let Some(cp) = stack.last_mut() {
        if cp.target.0 >= target.len() {
            stack.pop();
            continue;
        }
        cp.target.0 += codeset.char_size(target, cp.target.0);
        cursor.seek(cp.target);
        pat.seek(cp.pattern);
        return true;
    }
    false
}

/// Decide whether `target` matches `pattern` under `escape` and
/// `collation`.
///
/// `escape`, when present, is exactly one logical character in `codeset`
/// (validated by the caller). The only error is
/// [`MatchError::BacktrackLimitExceeded`] for patterns whose wildcard
/// structure outgrows the checkpoint stack.
pub fn eval_like(
    target: &[u8],
    pattern: &[u8],
    escape: Option<&[u8]>,
    codeset: Codeset,
    collation: &dyn Collation,
) -> Result<bool> {
    let mut pat = PatternChars::new(pattern, codeset, escape);
    let mut cursor = CharCursor::new(target, codeset);
    let mut stack: Vec<Checkpoint> = Vec::new();
    let mut state = State::Check;

    loop {
        match state {
            State::Check => {
                let Some(pc) = pat.next() else {
                    // Pattern exhausted: trailing pad in the target is
                    // insignificant, as in fixed-length CHAR comparison.
                    if codeset.rest_is_pad(target, cursor.pos().0) {
                        return Ok(true);
                    }
                    if !resume_from_checkpoint(&mut stack, &mut pat, &mut cursor, target, codeset)
                    {
                        return Ok(false);
                    }
                    continue;
                };
                if pc.is_match_many() {
                    state = State::Percent;
                    continue;
                }
                if pc.is_match_one() {
                    if cursor.advance().is_some() {
                        continue;
                    }
                } else {
                    let run = take_literal_run(&mut pat, pc, pattern);
                    if match_run(&run, &mut cursor, target, codeset, collation) {
                        continue;
                    }
                }
                if !resume_from_checkpoint(&mut stack, &mut pat, &mut cursor, target, codeset) {
                    return Ok(false);
                }
            }
            State::Percent => {
                // Collapse the MATCH_MANY run, consume any immediately
                // following MATCH_ONE markers (each gets its own bounded
                // checkpoint), then anchor a checkpoint at the start of
                // the next literal run.
                let mut failed = false;
                loop {
                    let seg = pat.byte_pos();
                    let Some(pc) = pat.next() else {
                        // Only MATCH_MANY/MATCH_ONE remained: the run
                        // absorbs whatever is left of the target.
                        return Ok(true);
                    };
                    if pc.is_match_many() {
                        continue;
                    }
                    if pc.is_match_one() {
                        push_checkpoint(&mut stack, cursor.pos(), seg)?;
                        if cursor.advance().is_none() {
                            failed = true;
                            break;
                        }
                        continue;
                    }
                    pat.seek(seg);
                    push_checkpoint(&mut stack, cursor.pos(), seg)?;
                    break;
                }
                if failed
                    && !resume_from_checkpoint(&mut stack, &mut pat, &mut cursor, target, codeset)
                {
                    return Ok(false);
                }
                state = State::Check;
            }
        }
    }
}
