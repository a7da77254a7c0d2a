//! Analysis error types

use thiserror::Error;

/// Failures of the notation pipeline. The engine turns every variant into an
/// error record; none of them reach the caller as an `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("Empty PGN string")]
    EmptyInput,

    #[error("No moves found in PGN")]
    NoMovesFound,

    /// Only raised in strict mode.
    #[error("Malformed move token '{token}': {reason}")]
    MalformedMove { token: String, reason: String },

    #[error("{0}")]
    Internal(String),
}

impl PgnError {
    /// Title used for the error record.
    pub fn title(&self) -> &'static str {
        match self {
            PgnError::Internal(_) => "Analysis Error",
            _ => "Invalid PGN",
        }
    }
}
