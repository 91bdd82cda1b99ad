use auth::CallerIdentity;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostWithOwner;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = CreatePostCommand::new(body.image_url, &body.image_url_type, body.caption)
        .map_err(PostError::from)?;

    let post = state.post_service.create_post(&caller, command).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        PostData::new(&post, caller.username()),
    ))
}

/// HTTP request body for a new post. Any owner field a client sends is
/// ignored; the owner is always the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    image_url: String,
    image_url_type: String,
    caption: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostOwnerData {
    pub username: String,
}

/// Post as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub post_id: i64,
    pub user_id: i64,
    pub image_url: String,
    pub image_url_type: String,
    pub caption: String,
    pub timestamp: DateTime<Utc>,
    pub user: PostOwnerData,
}

impl PostData {
    pub fn new(post: &Post, owner: &str) -> Self {
        Self {
            post_id: post.id.0,
            user_id: post.user_id.0,
            image_url: post.image_url.clone(),
            image_url_type: post.image_url_type.to_string(),
            caption: post.caption.clone(),
            timestamp: post.timestamp,
            user: PostOwnerData {
                username: owner.to_string(),
            },
        }
    }
}

impl From<&PostWithOwner> for PostData {
    fn from(entry: &PostWithOwner) -> Self {
        PostData::new(&entry.post, entry.owner.as_str())
    }
}
