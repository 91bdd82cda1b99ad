use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::errors::ImageUrlTypeError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Post unique identifier value object, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a post's image URL is to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageUrlType {
    Relative,
    Absolute,
}

impl ImageUrlType {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageUrlType::Relative => "relative",
            ImageUrlType::Absolute => "absolute",
        }
    }
}

impl FromStr for ImageUrlType {
    type Err = ImageUrlTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relative" => Ok(ImageUrlType::Relative),
            "absolute" => Ok(ImageUrlType::Absolute),
            other => Err(ImageUrlTypeError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ImageUrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image post entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// Owner
    pub user_id: UserId,
    pub image_url: String,
    pub image_url_type: ImageUrlType,
    pub caption: String,
    /// Set by the service at creation
    pub timestamp: DateTime<Utc>,
}

/// Post joined with its owner's username, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithOwner {
    pub post: Post,
    pub owner: Username,
}

/// Command to create a post. Carries no owner and no timestamp; both come
/// from the service.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub image_url: String,
    pub image_url_type: ImageUrlType,
    pub caption: String,
}

impl CreatePostCommand {
    /// Build a command from raw request fields.
    ///
    /// # Errors
    /// * `Unknown` - `image_url_type` is neither "absolute" nor "relative"
    pub fn new(
        image_url: String,
        image_url_type: &str,
        caption: String,
    ) -> Result<Self, ImageUrlTypeError> {
        Ok(Self {
            image_url,
            image_url_type: image_url_type.parse()?,
            caption,
        })
    }
}

/// Post record ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub image_url: String,
    pub image_url_type: ImageUrlType,
    pub caption: String,
    pub timestamp: DateTime<Utc>,
}
