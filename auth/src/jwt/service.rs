use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IssuedClaims;
use super::claims::PresentedClaims;
use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues and validates signed, time-limited bearer tokens.
///
/// Tokens are HS256 JWTs carrying `{sub, id, exp}`. The secret, the clock and
/// the default lifetime are fixed at construction.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenService {
    pub const DEFAULT_TTL_MINUTES: i64 = 15;

    /// Create a token service with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// TokenService using HS256, the system clock and a 15 minute lifetime
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock: Arc::new(SystemClock),
            ttl: Duration::minutes(Self::DEFAULT_TTL_MINUTES),
        }
    }

    /// Replace the clock used for issuance and expiry checks.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the default token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token with the default lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, username: &str, user_id: i64) -> Result<String, TokenError> {
        self.issue_with_ttl(username, user_id, self.ttl)
    }

    /// Issue a token expiring `ttl` after the current clock reading.
    ///
    /// # Arguments
    /// * `username` - Written to the `sub` claim
    /// * `user_id` - Written to the `id` claim
    /// * `ttl` - Lifetime; a negative value yields an already expired token
    ///
    /// # Errors
    /// * `InvalidTtl` - Expiry falls outside the representable time range
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_with_ttl(
        &self,
        username: &str,
        user_id: i64,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidTtl)?;
        let claims = IssuedClaims {
            sub: username,
            id: user_id,
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and extract its identity claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, bad signature or unexpected algorithm
    /// * `MissingClaims` - `sub`, `id` or `exp` absent or null
    /// * `Expired` - `exp` lies before the current clock reading
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Presence and expiry are checked below against the injected clock.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<PresentedClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaims(claim.clone()),
                _ => TokenError::InvalidToken(e.to_string()),
            })?;

        let claims = TokenClaims::try_from(token_data.claims)?;

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
