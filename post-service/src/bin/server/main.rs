use std::sync::Arc;

use auth::TokenService;
use post_service::config::Config;
use post_service::domain::post::service::PostService;
use post_service::domain::user::service::UserService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::database;
use post_service::outbound::repositories::SqlitePostRepository;
use post_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "post-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let pool = database::connect(&config.database.url, MAX_CONNECTIONS).await?;
    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        database = "sqlite",
        "Database connection pool created"
    );

    database::run_migrations(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let tokens = Arc::new(
        TokenService::new(config.jwt.secret.as_bytes())
            .with_ttl(config.jwt.ttl()?),
    );
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let post_repository = Arc::new(SqlitePostRepository::new(pool));

    let user_service = Arc::new(UserService::new(user_repository));
    let post_service = Arc::new(PostService::new(post_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, post_service, tokens);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
