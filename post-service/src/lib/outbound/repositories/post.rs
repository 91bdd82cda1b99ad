use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithOwner;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    post_id: i64,
    user_id: i64,
    image_url: String,
    image_url_type: String,
    caption: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.post_id),
            user_id: UserId(row.user_id),
            image_url: row.image_url,
            image_url_type: row.image_url_type.parse()?,
            caption: row.caption,
            timestamp: row.timestamp,
        })
    }
}

#[derive(FromRow)]
struct PostWithOwnerRow {
    #[sqlx(flatten)]
    post: PostRow,
    username: String,
}

impl TryFrom<PostWithOwnerRow> for PostWithOwner {
    type Error = PostError;

    fn try_from(row: PostWithOwnerRow) -> Result<Self, Self::Error> {
        let owner = Username::new(row.username)
            .map_err(|e| PostError::DatabaseError(format!("Stored username is invalid: {}", e)))?;

        Ok(PostWithOwner {
            post: Post::try_from(row.post)?,
            owner,
        })
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (user_id, image_url, image_url_type, caption, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.user_id.0)
        .bind(&post.image_url)
        .bind(post.image_url_type.as_str())
        .bind(&post.caption)
        .bind(post.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(Post {
            id: PostId(result.last_insert_rowid()),
            user_id: post.user_id,
            image_url: post.image_url,
            image_url_type: post.image_url_type,
            caption: post.caption,
            timestamp: post.timestamp,
        })
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, user_id, image_url, image_url_type, caption, timestamp
            FROM posts
            WHERE post_id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.map(Post::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<PostWithOwner>, PostError> {
        let rows = sqlx::query_as::<_, PostWithOwnerRow>(
            r#"
            SELECT p.post_id, p.user_id, p.image_url, p.image_url_type, p.caption, p.timestamp,
                   u.username
            FROM posts p
            JOIN users u ON u.user_id = p.user_id
            ORDER BY p.post_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(PostWithOwner::try_from).collect()
    }

    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE post_id = ?
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::models::ImageUrlType;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::ports::UserRepository;
    use crate::outbound::database;
    use crate::outbound::repositories::SqliteUserRepository;

    async fn setup() -> (SqlitePostRepository, UserId) {
        let pool = database::connect_in_memory().await.unwrap();
        database::run_migrations(&pool).await.unwrap();

        let owner = SqliteUserRepository::new(pool.clone())
            .create(NewUser {
                username: Username::new("bob".to_string()).unwrap(),
                email: EmailAddress::new("bob@example.com".to_string()).unwrap(),
                password_hash: "$argon2id$stub".to_string(),
            })
            .await
            .unwrap();

        (SqlitePostRepository::new(pool), owner.id)
    }

    fn new_post(user_id: UserId) -> NewPost {
        NewPost {
            user_id,
            image_url: "https://www.wikihow.com/images/Version-6.jpg".to_string(),
            image_url_type: ImageUrlType::Absolute,
            caption: "Your Caption".to_string(),
            timestamp: DateTime::from_timestamp(1_664_055_611, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (repository, owner) = setup().await;

        let created = repository.create(new_post(owner)).await.unwrap();
        let found = repository
            .find_by_id(created.id)
            .await
            .unwrap()
            .expect("post should exist");

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_missing_post() {
        let (repository, _) = setup().await;
        assert!(repository.find_by_id(PostId(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_includes_owner() {
        let (repository, owner) = setup().await;
        repository.create(new_post(owner)).await.unwrap();
        repository.create(new_post(owner)).await.unwrap();

        let posts = repository.list_all().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.owner.as_str() == "bob"));
        assert!(posts[0].post.id.0 < posts[1].post.id.0);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repository, owner) = setup().await;
        let created = repository.create(new_post(owner)).await.unwrap();

        repository.delete(created.id).await.unwrap();

        assert!(repository.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(created.id).await,
            Err(PostError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_for_unknown_owner_fails() {
        let (repository, _) = setup().await;
        let result = repository.create(new_post(UserId(999))).await;
        assert!(matches!(result, Err(PostError::DatabaseError(_))));
    }
}
