//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /draft/upsert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDraftRequest {
    pub draft_id: String,
    pub user_id: String,
    /// The block document, as JSON.
    pub post_data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaglineRequest {
    pub draft_id: String,
    pub user_id: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestsRequest {
    pub draft_id: String,
    pub user_id: String,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewImageRequest {
    pub draft_id: String,
    pub user_id: String,
    pub preview_image_url: String,
}

/// Query string of `GET /draft` and `DELETE /draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuery {
    #[serde(default)]
    pub draft_id: Option<String>,
}

/// Body of `POST /draft/list`. `start_value` is the row offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDraftsRequest {
    pub user_id: String,
    #[serde(default)]
    pub start_value: u64,
    #[serde(default = "default_page_size")]
    pub limit: u64,
}

fn default_page_size() -> u64 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub draft_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequest {
    pub interest: String,
}

/// A draft as returned by `GET /draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResponse {
    pub draft_id: String,
    pub author_id: String,
    /// The stored document; a JSON string when it does not parse.
    pub body: serde_json::Value,
    pub tagline: Option<String>,
    pub preview_image_url: Option<String>,
    pub interests: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of `POST /draft/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSummaryResponse {
    pub draft_id: String,
    pub title: String,
    pub tagline: Option<String>,
    pub preview_image_url: Option<String>,
    pub interests: Vec<String>,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post_id: String,
    pub author_id: String,
    pub body: serde_json::Value,
    pub title: String,
    pub tagline: Option<String>,
    pub preview_image_url: Option<String>,
    pub interests: Vec<String>,
    pub read_time_seconds: u32,
    pub like_count: u64,
    pub comment_count: u64,
    pub view_count: u64,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub status: String,
    pub post_id: String,
}

impl PublishResponse {
    pub fn published(post_id: impl Into<String>) -> Self {
        Self {
            status: "published".to_string(),
            post_id: post_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountResponse {
    pub like_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub comment_id: Uuid,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestStateResponse {
    pub name: String,
    pub followed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
    pub interests: Vec<InterestStateResponse>,
}
