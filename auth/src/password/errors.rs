use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password or a malformed stored hash is not an error; both verify
/// as `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
