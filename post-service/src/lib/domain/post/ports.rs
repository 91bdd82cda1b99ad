use async_trait::async_trait;
use auth::CallerIdentity;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithOwner;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by the caller, timestamped now.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        caller: &CallerIdentity,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;

    /// Delete a post after the ownership check passes.
    ///
    /// # Errors
    /// * `NotFound` - No post with this id
    /// * `NotOwner` - Post belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, caller: &CallerIdentity, post_id: PostId) -> Result<(), PostError>;

    /// List every post with its owner. Requires no identity.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<PostWithOwner>, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Returns
    /// Created post with its assigned identifier
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve all posts joined with their owners, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<PostWithOwner>, PostError>;

    /// Remove post from storage.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: PostId) -> Result<(), PostError>;
}
