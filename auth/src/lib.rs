//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id) with an injectable salt source
//! - Stateless bearer tokens (HS256 JWT) with an injectable clock
//! - An authorization guard turning bearer headers into caller identities
//!
//! Nothing here knows about users or posts; services adapt these pieces to
//! their own storage and error types.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthorizationGuard, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(b"secret_key_at_least_32_bytes_long!"));
//! let token = tokens.issue("alice", 42).unwrap();
//!
//! let guard = AuthorizationGuard::new(Arc::clone(&tokens));
//! let caller = guard.authorize(Some(&format!("Bearer {}", token))).unwrap();
//! assert_eq!(caller.username(), "alice");
//! assert_eq!(caller.user_id(), 42);
//! ```

pub mod clock;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use guard::AuthorizationGuard;
pub use guard::CallerIdentity;
pub use guard::Unauthorized;
pub use guard::UnauthorizedReason;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::OsSaltSource;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::SaltSource;
