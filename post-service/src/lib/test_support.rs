use std::sync::Arc;

use auth::AuthorizationGuard;
use auth::CallerIdentity;
use auth::TokenService;

const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Obtain a caller identity the only way one can be had: by presenting a
/// freshly issued token to the guard.
pub fn caller(username: &str, user_id: i64) -> CallerIdentity {
    let tokens = Arc::new(TokenService::new(SECRET));
    let token = tokens.issue(username, user_id).unwrap();

    AuthorizationGuard::new(tokens)
        .authorize(Some(&format!("Bearer {}", token)))
        .unwrap()
}
