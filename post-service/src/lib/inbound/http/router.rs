use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGuard;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::create_user::create_user;
use super::handlers::current_user::current_user;
use super::handlers::delete_post::delete_post;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::root::root;
use super::middleware::authenticate;
use crate::domain::post::service::PostService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::SqlitePostRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<SqliteUserRepository>>,
    pub post_service: Arc<PostService<SqlitePostRepository>>,
    pub tokens: Arc<TokenService>,
    pub guard: AuthorizationGuard,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService<SqliteUserRepository>>,
        post_service: Arc<PostService<SqlitePostRepository>>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let guard = AuthorizationGuard::new(Arc::clone(&tokens));
        Self {
            user_service,
            post_service,
            tokens,
            guard,
        }
    }
}

pub fn create_router(
    user_service: Arc<UserService<SqliteUserRepository>>,
    post_service: Arc<PostService<SqlitePostRepository>>,
    tokens: Arc<TokenService>,
) -> Router {
    let state = AppState::new(user_service, post_service, tokens);

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/users", post(create_user))
        .route("/token", post(login))
        .route("/posts/all", get(list_posts));

    let protected_routes = Router::new()
        .route("/users/me", get(current_user))
        .route("/posts", post(create_post))
        .route("/posts/:post_id", delete(delete_post))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
