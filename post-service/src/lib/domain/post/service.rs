use std::sync::Arc;

use async_trait::async_trait;
use auth::CallerIdentity;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostWithOwner;
use crate::domain::post::policy::PostOwnershipPolicy;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        caller: &CallerIdentity,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = NewPost {
            user_id: UserId(caller.user_id()),
            image_url: command.image_url,
            image_url_type: command.image_url_type,
            caption: command.caption,
            timestamp: Utc::now(),
        };

        let created_post = self.repository.create(post).await?;
        tracing::info!(
            post_id = %created_post.id,
            user_id = %created_post.user_id,
            "Post created"
        );

        Ok(created_post)
    }

    async fn delete_post(&self, caller: &CallerIdentity, post_id: PostId) -> Result<(), PostError> {
        let post = self.repository.find_by_id(post_id).await?;

        if let Err(e) = PostOwnershipPolicy::authorize_delete(caller, post_id, post.as_ref()) {
            tracing::warn!(
                post_id = %post_id,
                caller = caller.username(),
                error = %e,
                "Post deletion denied"
            );
            return Err(e);
        }

        self.repository.delete(post_id).await?;
        tracing::info!(post_id = %post_id, caller = caller.username(), "Post deleted");

        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<PostWithOwner>, PostError> {
        self.repository.list_all().await
    }
}
