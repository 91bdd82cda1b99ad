use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::AuthenticationError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Owns registration and the username/password authentication flow.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service hashing with OS-random salts.
    pub fn new(repository: Arc<UR>) -> Self {
        Self::with_password_hasher(repository, auth::PasswordHasher::new())
    }

    /// Create a new user service with an explicit password hasher.
    pub fn with_password_hasher(repository: Arc<UR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, AuthenticationError> {
        // A name that could never have been registered cannot exist in storage
        let Ok(username) = Username::new(username.to_string()) else {
            self.password_hasher.verify_decoy(password);
            return Err(AuthenticationError::UserNotFound(username.to_string()));
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            self.password_hasher.verify_decoy(password);
            return Err(AuthenticationError::UserNotFound(username.to_string()));
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AuthenticationError::PasswordMismatch);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn stored_user(username: &str, password: &str) -> User {
        User {
            id: UserId(1),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "bob"
                    && user.email.as_str() == "bob@example.com"
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    username: user.username,
                    email: user.email,
                    password_hash: user.password_hash,
                })
            });

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand::new(
            Username::new("bob".to_string()).unwrap(),
            EmailAddress::new("bob@example.com".to_string()).unwrap(),
            "pw123".to_string(),
        );

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.id, UserId(1));
        assert_ne!(user.password_hash, "pw123");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand::new(
            Username::new("bob".to_string()).unwrap(),
            EmailAddress::new("bob@example.com".to_string()).unwrap(),
            "pw123".to_string(),
        );

        assert!(matches!(
            service.create_user(command).await,
            Err(UserError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("alice", "correct");

        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository));

        let authenticated = service.authenticate("alice", "correct").await.unwrap();
        assert_eq!(authenticated.username.as_str(), "alice");
        assert_eq!(authenticated.id, UserId(1));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("alice", "correct");

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository));

        assert!(matches!(
            service.authenticate("alice", "wrong").await,
            Err(AuthenticationError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        assert!(matches!(
            service.authenticate("ghost", "x").await,
            Err(AuthenticationError::UserNotFound(name)) if name == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_costs_a_password_check() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("alice", "correct");

        repository
            .expect_find_by_username()
            .returning(move |name| {
                Ok((name.as_str() == "alice").then(|| user.clone()))
            });

        let service = UserService::new(Arc::new(repository));

        let started = Instant::now();
        let _ = service.authenticate("alice", "wrong").await;
        let known = started.elapsed();

        let started = Instant::now();
        let _ = service.authenticate("ghost", "wrong").await;
        let unknown = started.elapsed();

        let started = Instant::now();
        let _ = service.authenticate("x", "wrong").await;
        let unregistrable = started.elapsed();

        assert!(unknown * 4 >= known, "unknown {:?} vs known {:?}", unknown, known);
        assert!(
            unregistrable * 4 >= known,
            "unregistrable {:?} vs known {:?}",
            unregistrable,
            known
        );
    }

    #[tokio::test]
    async fn test_authenticate_unregistrable_name_skips_storage() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_username().times(0);

        let service = UserService::new(Arc::new(repository));

        assert!(matches!(
            service.authenticate("x", "pw").await,
            Err(AuthenticationError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_corrupt_stored_hash_is_mismatch() {
        let mut repository = MockTestUserRepository::new();
        let mut user = stored_user("alice", "correct");
        user.password_hash = "not-a-phc-string".to_string();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository));

        assert!(matches!(
            service.authenticate("alice", "correct").await,
            Err(AuthenticationError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_storage_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection lost".to_string())));

        let service = UserService::new(Arc::new(repository));

        assert!(matches!(
            service.authenticate("alice", "correct").await,
            Err(AuthenticationError::Storage(UserError::DatabaseError(_)))
        ));
    }
}
