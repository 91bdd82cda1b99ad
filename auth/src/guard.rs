use std::sync::Arc;

use thiserror::Error;

use crate::jwt::TokenClaims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;

/// Authenticated caller of a single request.
///
/// Can only be obtained from `AuthorizationGuard::authorize`, so holding one
/// proves the presented token was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    username: String,
    user_id: i64,
}

impl CallerIdentity {
    fn from_claims(claims: TokenClaims) -> Self {
        Self {
            username: claims.subject().to_string(),
            user_id: claims.user_id(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnauthorizedReason {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Rejection produced by the guard.
///
/// Displays the same message whatever the reason; the reason itself is kept
/// for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unauthorized")]
pub struct Unauthorized {
    reason: UnauthorizedReason,
}

impl Unauthorized {
    pub fn reason(&self) -> &UnauthorizedReason {
        &self.reason
    }
}

impl From<UnauthorizedReason> for Unauthorized {
    fn from(reason: UnauthorizedReason) -> Self {
        Self { reason }
    }
}

/// Gate in front of protected operations.
///
/// Turns the raw `Authorization` header value of a request into a
/// `CallerIdentity`, or refuses it.
#[derive(Clone)]
pub struct AuthorizationGuard {
    tokens: Arc<TokenService>,
}

impl AuthorizationGuard {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value (`Bearer <token>`), if present
    ///
    /// # Returns
    /// Identity of the caller, valid for the current request only
    ///
    /// # Errors
    /// * `Unauthorized` - Header missing, not a bearer credential, or token
    ///   rejected by `TokenService::validate`
    pub fn authorize(&self, authorization: Option<&str>) -> Result<CallerIdentity, Unauthorized> {
        let token = bearer_token(authorization)?;

        let claims = self.tokens.validate(token).map_err(UnauthorizedReason::Token)?;

        Ok(CallerIdentity::from_claims(claims))
    }
}

fn bearer_token(authorization: Option<&str>) -> Result<&str, UnauthorizedReason> {
    let value = authorization.ok_or(UnauthorizedReason::MissingHeader)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(UnauthorizedReason::MalformedHeader)?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(UnauthorizedReason::MalformedHeader);
    }

    Ok(token)
}
