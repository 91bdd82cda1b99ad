use auth::CallerIdentity;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;

/// Decides whether a caller may delete a post.
pub struct PostOwnershipPolicy;

impl PostOwnershipPolicy {
    /// Check a delete request against the stored post.
    ///
    /// Existence is checked before ownership. Has no side effects and must run
    /// before the delete is applied.
    ///
    /// # Arguments
    /// * `caller` - Identity of the requesting user
    /// * `post_id` - Identifier the caller asked to delete
    /// * `post` - Stored post, if one exists under `post_id`
    ///
    /// # Errors
    /// * `NotFound` - No post under `post_id`
    /// * `NotOwner` - Post belongs to another user
    pub fn authorize_delete(
        caller: &CallerIdentity,
        post_id: PostId,
        post: Option<&Post>,
    ) -> Result<(), PostError> {
        let post = post.ok_or(PostError::NotFound(post_id))?;

        if post.user_id.0 != caller.user_id() {
            return Err(PostError::NotOwner(post_id));
        }

        Ok(())
    }
}
