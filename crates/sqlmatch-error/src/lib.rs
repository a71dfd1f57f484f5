use thiserror::Error;

/// Primary error type for LIKE evaluation and bound derivation.
///
/// Validation errors (type, codeset, collation, escape) are raised before
/// any matching work begins; the only matching-time error is
/// [`MatchError::BacktrackLimitExceeded`].
#[derive(Error, Debug)]
pub enum MatchError {
    /// A non-character argument was supplied where a character string was
    /// required.
    #[error("invalid data type: expected {expected}, got {actual}")]
    InvalidDataType { expected: String, actual: String },

    /// Target and pattern (or escape) do not share a codeset.
    #[error("incompatible codesets: {left} vs {right}")]
    IncompatibleCodesets { left: String, right: String },

    /// The operand collations have no common resolution.
    #[error("incompatible collations: {left} vs {right}")]
    IncompatibleCollations { left: u32, right: u32 },

    /// The supplied escape argument is not exactly one logical character.
    #[error("invalid escape character: {detail}")]
    InvalidEscapeCharacter { detail: String },

    /// The pattern required more saved backtrack positions than the engine
    /// allows. Pathological patterns produce this error instead of
    /// unbounded memory growth.
    #[error("LIKE pattern too complex: backtrack limit of {limit} exceeded")]
    BacktrackLimitExceeded { limit: usize },

    /// No collation is registered under the given id.
    #[error("unknown collation id: {id}")]
    UnknownCollation { id: u32 },

    /// No collation is registered under the given name.
    #[error("unknown collation: {name}")]
    UnknownCollationName { name: String },

    /// Allocation failure for a scratch or result buffer.
    #[error("out of memory")]
    OutOfMemory,
}

/// Numeric result codes for host-engine compatibility.
///
/// The query evaluator that embeds this library reports failures through a
/// shared error-state mechanism keyed by code; these values mirror the
/// host's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Successful result.
    Ok = 0,
    /// Generic evaluation error.
    Error = 1,
    /// Out of memory.
    NoMem = 7,
    /// Data type mismatch.
    Mismatch = 20,
    /// Library used incorrectly (bad escape, unknown collation).
    Misuse = 21,
}

impl MatchError {
    /// Map this error to a host result code.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidDataType { .. }
            | Self::IncompatibleCodesets { .. }
            | Self::IncompatibleCollations { .. } => ErrorCode::Mismatch,
            Self::InvalidEscapeCharacter { .. }
            | Self::UnknownCollation { .. }
            | Self::UnknownCollationName { .. } => ErrorCode::Misuse,
            Self::BacktrackLimitExceeded { .. } => ErrorCode::Error,
            Self::OutOfMemory => ErrorCode::NoMem,
        }
    }

    /// Whether the user can likely fix this without code changes.
    ///
    /// Everything except allocation failure is a property of the query
    /// text (operand types, escape clause, pattern shape).
    pub const fn is_user_recoverable(&self) -> bool {
        !matches!(self, Self::OutOfMemory)
    }

    /// Whether the system-wide "return NULL on function errors" policy may
    /// convert this error into an UNKNOWN result.
    ///
    /// Allocation failure is never maskable.
    pub const fn is_maskable(&self) -> bool {
        !matches!(self, Self::OutOfMemory)
    }

    /// Create an invalid-data-type error.
    pub fn invalid_data_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidDataType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid-escape-character error.
    pub fn invalid_escape(detail: impl Into<String>) -> Self {
        Self::InvalidEscapeCharacter {
            detail: detail.into(),
        }
    }

    /// Create an incompatible-codesets error.
    pub fn incompatible_codesets(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::IncompatibleCodesets {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Result type alias using [`MatchError`].
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatchError::invalid_escape("two characters");
        assert_eq!(
            err.to_string(),
            "invalid escape character: two characters"
        );

        let err = MatchError::BacktrackLimitExceeded { limit: 100 };
        assert_eq!(
            err.to_string(),
            "LIKE pattern too complex: backtrack limit of 100 exceeded"
        );
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(
            MatchError::invalid_data_type("CHAR", "INTEGER").error_code(),
            ErrorCode::Mismatch
        );
        assert_eq!(
            MatchError::incompatible_codesets("UTF-8", "ISO-8859-1").error_code(),
            ErrorCode::Mismatch
        );
        assert_eq!(
            MatchError::invalid_escape("empty").error_code(),
            ErrorCode::Misuse
        );
        assert_eq!(
            MatchError::UnknownCollationName {
                name: "klingon".to_owned()
            }
            .error_code(),
            ErrorCode::Misuse
        );
        assert_eq!(
            MatchError::BacktrackLimitExceeded { limit: 100 }.error_code(),
            ErrorCode::Error
        );
        assert_eq!(MatchError::OutOfMemory.error_code(), ErrorCode::NoMem);
    }

    #[test]
    fn user_recoverable() {
        assert!(MatchError::invalid_escape("x").is_user_recoverable());
        assert!(MatchError::BacktrackLimitExceeded { limit: 100 }.is_user_recoverable());
        assert!(!MatchError::OutOfMemory.is_user_recoverable());
    }

    #[test]
    fn maskable_by_null_policy() {
        assert!(MatchError::invalid_data_type("CHAR", "BIT").is_maskable());
        assert!(!MatchError::OutOfMemory.is_maskable());
    }

    #[test]
    fn error_code_values() {
        assert_eq!(ErrorCode::Ok as i32, 0);
        assert_eq!(ErrorCode::Error as i32, 1);
        assert_eq!(ErrorCode::NoMem as i32, 7);
        assert_eq!(ErrorCode::Mismatch as i32, 20);
        assert_eq!(ErrorCode::Misuse as i32, 21);
    }
}
