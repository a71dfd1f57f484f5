//! SQL LIKE pattern matching and index-bound derivation.
//!
//! Two evaluator-facing surfaces:
//! - [`like_match`] — full execution-time evaluation of
//!   `target LIKE pattern [ESCAPE escape]`, a bounded-backtracking
//!   automaton over collated logical characters.
//! - [`like_bound`] — plan-time derivation of one side of the range
//!   rewrite `col >= lower AND col < upper` from a pattern's literal
//!   prefix, so the optimizer can replace a linear LIKE scan with an
//!   index range scan plus residual filter.
//!
//! The supporting passes ([`compress_pattern`], [`analyze_pattern`],
//! [`synthesize_bound`]) are public for planner diagnostics and tests.
//! All of them share one escape-aware pattern walk,
//! [`pattern::PatternChars`].

pub mod analyze;
pub mod bounds;
pub mod compress;
pub mod engine;
pub mod eval;
pub mod pattern;

pub use analyze::{analyze_pattern, LikeOptInfo};
pub use bounds::synthesize_bound;
pub use compress::compress_pattern;
pub use engine::{eval_like, BACKTRACK_LIMIT};
pub use eval::{like_bound, like_match, EvalConfig};
pub use pattern::{PatternChar, PatternChars, DEFAULT_ESCAPE, MATCH_MANY, MATCH_ONE};
