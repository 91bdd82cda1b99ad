use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a username and password for a bearer token.
///
/// Answers with the bare OAuth2 token shape rather than the envelope.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await
        .map_err(|e| {
            tracing::info!(username = %form.username, error = %e, "Login rejected");
            ApiError::from(e)
        })?;

    let access_token = state.tokens.issue(user.username.as_str(), user.id.0)?;
    tracing::info!(user_id = %user.id, "Token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

/// OAuth2 password-flow form fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
