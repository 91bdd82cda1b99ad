use thiserror::Error;

/// Error type for token operations.
///
/// The validation variants stay distinct for logging and tests; callers at a
/// trust boundary collapse them into a single unauthorized outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token lifetime puts expiry out of range")]
    InvalidTtl,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    Expired,

    #[error("Missing required claim: {0}")]
    MissingClaims(String),
}
