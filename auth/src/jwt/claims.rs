use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Payload written into issued tokens.
#[derive(Debug, Serialize)]
pub(crate) struct IssuedClaims<'a> {
    /// Subject (username)
    pub sub: &'a str,

    /// Numeric user identifier
    pub id: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Payload as read back from a presented token.
///
/// Every field is optional so that absent and `null` claims surface as
/// `MissingClaims` instead of a generic decoding failure.
#[derive(Debug, Deserialize)]
pub(crate) struct PresentedClaims {
    pub sub: Option<String>,
    pub id: Option<i64>,
    pub exp: Option<i64>,
}

/// Identity claims carried by a validated token.
///
/// Only produced by `TokenService::validate`; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Username the token was issued to.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check whether the expiry lies strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

impl TryFrom<PresentedClaims> for TokenClaims {
    type Error = TokenError;

    fn try_from(claims: PresentedClaims) -> Result<Self, Self::Error> {
        let subject = claims
            .sub
            .ok_or_else(|| TokenError::MissingClaims("sub".to_string()))?;
        let user_id = claims
            .id
            .ok_or_else(|| TokenError::MissingClaims("id".to_string()))?;
        let exp = claims
            .exp
            .ok_or_else(|| TokenError::MissingClaims("exp".to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| TokenError::InvalidToken(format!("exp out of range: {}", exp)))?;

        Ok(Self {
            subject,
            user_id,
            expires_at,
        })
    }
}
