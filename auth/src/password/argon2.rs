use std::sync::Arc;

use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::Argon2;

use super::errors::PasswordError;
use super::salt::OsSaltSource;
use super::salt::SaltSource;

/// Well-formed Argon2id hash with default cost parameters that no password
/// matches.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZGVjb3ktc2FsdC12YWx1ZQ$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Password hashing implementation.
///
/// Produces Argon2id hashes in PHC string format, so every stored hash carries
/// its algorithm, parameters and salt.
#[derive(Clone)]
pub struct PasswordHasher {
    salt_source: Arc<dyn SaltSource>,
}

impl PasswordHasher {
    /// Create a hasher salting from the operating system CSPRNG.
    pub fn new() -> Self {
        Self::with_salt_source(OsSaltSource)
    }

    /// Create a hasher drawing salts from the given source.
    pub fn with_salt_source(salt_source: impl SaltSource) -> Self {
        Self {
            salt_source: Arc::new(salt_source),
        }
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (`$argon2id$v=19$...`)
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = self.salt_source.generate();

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if the password matches. False on mismatch and on any hash string
    /// that cannot be parsed or names an unsupported algorithm.
    ///
    /// # Errors
    /// * `VerificationFailed` - Internal cryptographic failure
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash is malformed");
                return Ok(false);
            }
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Crypto) => Err(PasswordError::VerificationFailed(
                HashError::Crypto.to_string(),
            )),
            Err(HashError::Password) => Ok(false),
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash is not verifiable");
                Ok(false)
            }
        }
    }

    /// Spend the same work as `verify` when there is no stored hash to check,
    /// so a missing account takes as long to reject as a wrong password.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, DECOY_HASH);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
