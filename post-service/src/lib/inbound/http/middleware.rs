use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that admits only requests carrying a valid bearer token, and
/// hands the handler the caller's identity through request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let caller = state.guard.authorize(header).map_err(|e| {
        tracing::warn!(
            method = %req.method(),
            uri = %req.uri(),
            reason = %e.reason(),
            "Request rejected"
        );
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
