use std::sync::Arc;

use auth::TokenService;
use post_service::domain::post::service::PostService;
use post_service::domain::user::service::UserService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::database;
use post_service::outbound::repositories::SqlitePostRepository;
use post_service::outbound::repositories::SqliteUserRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over a private in-memory
/// database.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        database::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_service = Arc::new(UserService::new(Arc::new(SqliteUserRepository::new(
            pool.clone(),
        ))));
        let post_service = Arc::new(PostService::new(Arc::new(SqlitePostRepository::new(pool))));
        let tokens = Arc::new(TokenService::new(TEST_SECRET));

        let router = create_router(user_service, post_service, Arc::clone(&tokens));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and panic unless it succeeds.
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .post("/users")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in through `/token` and return the access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Create a post as the holder of `token` and return its id.
    pub async fn create_post(&self, token: &str, caption: &str) -> i64 {
        let response = self
            .post_authenticated("/posts", token)
            .json(&json!({
                "image_url": "https://www.wikihow.com/images/Version-6.jpg",
                "image_url_type": "absolute",
                "caption": caption
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["post_id"].as_i64().expect("post_id missing")
    }
}
