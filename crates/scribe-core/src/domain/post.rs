use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - the published snapshot of a draft plus engagement counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Same value as the draft it was published from.
    pub post_id: String,
    pub author_id: String,
    pub body: String,
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

/// Comment entity - append-only reader feedback on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: Uuid,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment with generated ID and timestamp.
    pub fn new(post_id: impl Into<String>, author_id: impl Into<String>, text: String) -> Self {
        Self {
            comment_id: Uuid::new_v4(),
            post_id: post_id.into(),
            author_id: author_id.into(),
            text,
            created_at: Utc::now(),
        }
    }
}
