//! Evaluator-facing entry points.
//!
//! [`like_match`] is the execution-time full evaluation;
//! [`like_bound`] is the plan-time range-bound derivation. Both validate
//! their inputs completely before any matching work starts, and both honor
//! the same pattern-escape contract.

use tracing::debug;

use sqlmatch_error::{MatchError, Result};
use sqlmatch_types::{
    BoundKind, Codeset, CollationRegistry, Datum, LikeBound, MatchResult, TextString,
};

use crate::analyze::analyze_pattern;
use crate::bounds::synthesize_bound;
use crate::compress::compress_pattern;
use crate::engine::eval_like;
use crate::pattern::DEFAULT_ESCAPE;

/// Behavior switches the host engine reads from its system parameters.
///
/// Threaded explicitly into every call so the engine stays a pure function
/// of its declared inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalConfig {
    /// Oracle-style empty string: a zero-length string behaves as NULL.
    pub oracle_style_empty_string: bool,
    /// Convert maskable function errors into an UNKNOWN result instead of
    /// failing the statement.
    pub null_on_function_errors: bool,
}

/// Resolve the escape operand against the pattern's codeset.
///
/// `None` means no escape clause; a NULL datum selects the default escape
/// `\` (the `ESCAPE NULL` SQL convention); a text datum must be exactly
/// one logical character in the pattern's codeset.
fn resolve_escape<'a>(
    escape: Option<&'a Datum>,
    pattern_codeset: Codeset,
) -> Result<Option<&'a [u8]>> {
    let datum = match escape {
        None => return Ok(None),
        Some(d) => d,
    };
    if datum.is_null() {
        return Ok(Some(DEFAULT_ESCAPE));
    }
    let text = datum
        .as_text()
        .ok_or_else(|| MatchError::invalid_data_type("CHARACTER", datum.type_name()))?;
    if text.codeset != pattern_codeset {
        return Err(MatchError::incompatible_codesets(
            pattern_codeset.name(),
            text.codeset.name(),
        ));
    }
    if text.bytes.is_empty() {
        return Err(MatchError::invalid_escape("escape string is empty"));
    }
    let width = text.codeset.char_size(&text.bytes, 0);
    if width != text.bytes.len() {
        return Err(MatchError::invalid_escape(
            "escape string is longer than one character",
        ));
    }
    Ok(Some(&text.bytes))
}

fn require_text(datum: &Datum) -> Result<&TextString> {
    datum
        .as_text()
        .ok_or_else(|| MatchError::invalid_data_type("CHARACTER", datum.type_name()))
}

/// Evaluate `target LIKE pattern [ESCAPE escape]`.
///
/// NULL operands yield `Unknown`; validation failures and
/// backtrack-limit overflow surface as typed errors unless
/// `config.null_on_function_errors` masks them.
pub fn like_match(
    target: &Datum,
    pattern: &Datum,
    escape: Option<&Datum>,
    registry: &CollationRegistry,
    config: &EvalConfig,
) -> Result<MatchResult> {
    match like_match_checked(target, pattern, escape, registry, config) {
        Err(err) if config.null_on_function_errors && err.is_maskable() => {
            debug!(error = %err, "masking LIKE error as UNKNOWN per configuration");
            Ok(MatchResult::Unknown)
        }
        other => other,
    }
}

fn like_match_checked(
    target: &Datum,
    pattern: &Datum,
    escape: Option<&Datum>,
    registry: &CollationRegistry,
    config: &EvalConfig,
) -> Result<MatchResult> {
    if target.is_null() || pattern.is_null() {
        return Ok(MatchResult::Unknown);
    }
    let target = require_text(target)?;
    let pattern = require_text(pattern)?;
    if config.oracle_style_empty_string && (target.is_empty() || pattern.is_empty()) {
        return Ok(MatchResult::Unknown);
    }
    if target.codeset != pattern.codeset {
        return Err(MatchError::incompatible_codesets(
            target.codeset.name(),
            pattern.codeset.name(),
        ));
    }
    let collation = registry.resolve(registry.common(target.collation, pattern.collation)?)?;
    let escape = resolve_escape(escape, pattern.codeset)?;
    let matched = eval_like(
        &target.bytes,
        &pattern.bytes,
        escape,
        pattern.codeset,
        collation.as_ref(),
    )?;
    Ok(matched.into())
}

/// Derive one side of the index range rewrite for a LIKE pattern.
///
/// Orchestrates compression, analysis, and bound synthesis. Degenerate
/// results (`DomainMin`/`DomainMax`) mean the pattern constrains nothing
/// on the requested side; the optimizer leaves that scan side open.
pub fn like_bound(
    pattern: &Datum,
    escape: Option<&Datum>,
    kind: BoundKind,
    registry: &CollationRegistry,
    config: &EvalConfig,
) -> Result<LikeBound> {
    match like_bound_checked(pattern, escape, kind, registry) {
        Err(err) if config.null_on_function_errors && err.is_maskable() => {
            debug!(error = %err, "masking LIKE bound error as a degenerate bound per configuration");
            Ok(degenerate(kind))
        }
        other => other,
    }
}

const fn degenerate(kind: BoundKind) -> LikeBound {
    match kind {
        BoundKind::Lower => LikeBound::DomainMin,
        BoundKind::Upper => LikeBound::DomainMax,
    }
}

fn like_bound_checked(
    pattern: &Datum,
    escape: Option<&Datum>,
    kind: BoundKind,
    registry: &CollationRegistry,
) -> Result<LikeBound> {
    if pattern.is_null() {
        // LIKE NULL matches nothing; an unbounded scan side is still sound.
        debug!("NULL LIKE pattern; returning degenerate bound");
        return Ok(degenerate(kind));
    }
    let pattern = require_text(pattern)?;
    let collation = registry.resolve(pattern.collation)?;
    let escape = resolve_escape(escape, pattern.codeset)?;

    let compressed = compress_pattern(&pattern.bytes, pattern.codeset, escape);
    let info = analyze_pattern(&compressed, pattern.codeset, escape);
    match synthesize_bound(
        &compressed,
        pattern.codeset,
        escape,
        &info,
        kind,
        collation.as_ref(),
    ) {
        Some(bytes) => Ok(LikeBound::Literal(TextString::from_bytes(
            bytes,
            pattern.codeset,
            pattern.collation,
        ))),
        None => {
            debug!(
                num_match_many = info.num_match_many,
                "no safe literal prefix; returning degenerate bound"
            );
            Ok(degenerate(kind))
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlmatch_types::{CollationId, COLL_NOCASE};

    use super::*;

    fn registry() -> CollationRegistry {
        CollationRegistry::with_builtins()
    }

    fn matches(target: &str, pattern: &str) -> MatchResult {
        like_match(
            &Datum::text(target),
            &Datum::text(pattern),
            None,
            &registry(),
            &EvalConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(matches("abcabcX", "%abc%"), MatchResult::True);
        assert_eq!(matches("ABCDEF", "_B__EF"), MatchResult::True);
        assert_eq!(matches("abc", "abd"), MatchResult::False);
    }

    #[test]
    fn test_null_propagation() {
        let reg = registry();
        let cfg = EvalConfig::default();
        assert_eq!(
            like_match(&Datum::Null, &Datum::text("%"), None, &reg, &cfg).unwrap(),
            MatchResult::Unknown
        );
        assert_eq!(
            like_match(&Datum::text("x"), &Datum::Null, None, &reg, &cfg).unwrap(),
            MatchResult::Unknown
        );
    }

    #[test]
    fn test_escape_operand_handling() {
        let reg = registry();
        let cfg = EvalConfig::default();
        // Explicit escape character.
        assert_eq!(
            like_match(
                &Datum::text("100%"),
                &Datum::text("100\\%"),
                Some(&Datum::text("\\")),
                &reg,
                &cfg
            )
            .unwrap(),
            MatchResult::True
        );
        // ESCAPE NULL selects the default backslash.
        assert_eq!(
            like_match(
                &Datum::text("100%"),
                &Datum::text("100\\%"),
                Some(&Datum::Null),
                &reg,
                &cfg
            )
            .unwrap(),
            MatchResult::True
        );
    }

    #[test]
    fn test_invalid_escape_rejected() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let err = like_match(
            &Datum::text("x"),
            &Datum::text("x"),
            Some(&Datum::text("ab")),
            &reg,
            &cfg,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidEscapeCharacter { .. }));

        let err = like_match(
            &Datum::text("x"),
            &Datum::text("x"),
            Some(&Datum::text("")),
            &reg,
            &cfg,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidEscapeCharacter { .. }));
    }

    #[test]
    fn test_type_validation() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let err =
            like_match(&Datum::Integer(1), &Datum::text("%"), None, &reg, &cfg).unwrap_err();
        assert!(matches!(err, MatchError::InvalidDataType { .. }));
    }

    #[test]
    fn test_collation_mismatch() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let target = Datum::Text(
            sqlmatch_types::TextString::utf8("abc").with_collation(COLL_NOCASE),
        );
        let err = like_match(&target, &Datum::text("abc"), None, &reg, &cfg).unwrap_err();
        assert!(matches!(err, MatchError::IncompatibleCollations { .. }));
    }

    #[test]
    fn test_unknown_collation() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let target =
            Datum::Text(sqlmatch_types::TextString::utf8("abc").with_collation(CollationId(7)));
        let pattern =
            Datum::Text(sqlmatch_types::TextString::utf8("abc").with_collation(CollationId(7)));
        let err = like_match(&target, &pattern, None, &reg, &cfg).unwrap_err();
        assert!(matches!(err, MatchError::UnknownCollation { id: 7 }));
    }

    #[test]
    fn test_nocase_collation_matching() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let target =
            Datum::Text(sqlmatch_types::TextString::utf8("Smith").with_collation(COLL_NOCASE));
        let pattern =
            Datum::Text(sqlmatch_types::TextString::utf8("smi%").with_collation(COLL_NOCASE));
        assert_eq!(
            like_match(&target, &pattern, None, &reg, &cfg).unwrap(),
            MatchResult::True
        );
    }

    #[test]
    fn test_null_on_function_errors_masks() {
        let reg = registry();
        let cfg = EvalConfig {
            null_on_function_errors: true,
            ..EvalConfig::default()
        };
        assert_eq!(
            like_match(&Datum::Integer(1), &Datum::text("%"), None, &reg, &cfg).unwrap(),
            MatchResult::Unknown
        );
        // Backtrack overflow is maskable too.
        let pattern = Datum::text(&"%a".repeat(200));
        let target = Datum::text(&"a".repeat(200));
        assert_eq!(
            like_match(&target, &pattern, None, &reg, &cfg).unwrap(),
            MatchResult::Unknown
        );
    }

    #[test]
    fn test_oracle_style_empty_string() {
        let reg = registry();
        let cfg = EvalConfig {
            oracle_style_empty_string: true,
            ..EvalConfig::default()
        };
        assert_eq!(
            like_match(&Datum::text(""), &Datum::text("%"), None, &reg, &cfg).unwrap(),
            MatchResult::Unknown
        );
        // Off by default: empty string is a real value.
        assert_eq!(matches("", "%"), MatchResult::True);
    }

    #[test]
    fn test_bound_facade_prefix() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let pattern = Datum::text("SMITH%");
        let lower = like_bound(&pattern, None, BoundKind::Lower, &reg, &cfg).unwrap();
        assert_eq!(lower.as_literal().unwrap().as_str(), Some("SMITH"));
        let upper = like_bound(&pattern, None, BoundKind::Upper, &reg, &cfg).unwrap();
        assert_eq!(upper.as_literal().unwrap().as_str(), Some("SMITI"));
    }

    #[test]
    fn test_bound_facade_degenerate() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let pattern = Datum::text("%SMITH");
        assert_eq!(
            like_bound(&pattern, None, BoundKind::Lower, &reg, &cfg).unwrap(),
            LikeBound::DomainMin
        );
        assert_eq!(
            like_bound(&pattern, None, BoundKind::Upper, &reg, &cfg).unwrap(),
            LikeBound::DomainMax
        );
    }

    #[test]
    fn test_bound_facade_compresses_first() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let pattern = Datum::text("AB%%%%");
        let lower = like_bound(&pattern, None, BoundKind::Lower, &reg, &cfg).unwrap();
        assert_eq!(lower.as_literal().unwrap().as_str(), Some("AB"));
    }

    #[test]
    fn test_bound_facade_null_pattern() {
        let reg = registry();
        let cfg = EvalConfig::default();
        assert_eq!(
            like_bound(&Datum::Null, None, BoundKind::Lower, &reg, &cfg).unwrap(),
            LikeBound::DomainMin
        );
    }

    #[test]
    fn test_bound_facade_rejects_bad_escape() {
        let reg = registry();
        let cfg = EvalConfig::default();
        let err = like_bound(
            &Datum::text("a%"),
            Some(&Datum::text("xy")),
            BoundKind::Lower,
            &reg,
            &cfg,
        )
        .unwrap_err();
        assert!(matches!(err, MatchError::InvalidEscapeCharacter { .. }));
    }
}
