pub mod argon2;
pub mod errors;
pub mod salt;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use salt::OsSaltSource;
pub use salt::SaltSource;
