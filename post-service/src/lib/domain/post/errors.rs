use thiserror::Error;

use crate::domain::post::models::PostId;

/// Error for ImageUrlType parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImageUrlTypeError {
    #[error("'{0}' is not a valid image_url_type (expected 'absolute' or 'relative')")]
    Unknown(String),
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid image url type: {0}")]
    InvalidImageUrlType(#[from] ImageUrlTypeError),

    #[error("No post found with id: {0}")]
    NotFound(PostId),

    #[error("Post {0} was not created by this user")]
    NotOwner(PostId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
