//! The draft-to-post transition.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Draft, Post};
use crate::error::{PublishError, RepoError, ValidationError};
use crate::ports::{DraftRepository, PostRepository};
use crate::validation::{MetaData, Validator};

/// Loads a draft, validates it, and atomically turns it into a post.
///
/// Validation failures never write. Storage failures never leave a post
/// without its draft marked published, or the reverse.
#[derive(Clone)]
pub struct PublishCoordinator {
    drafts: Arc<dyn DraftRepository>,
    posts: Arc<dyn PostRepository>,
    validator: Validator,
}

impl PublishCoordinator {
    pub fn new(
        drafts: Arc<dyn DraftRepository>,
        posts: Arc<dyn PostRepository>,
        validator: Validator,
    ) -> Self {
        Self {
            drafts,
            posts,
            validator,
        }
    }

    /// Publish a draft. The new post's id equals `draft_id`.
    pub async fn publish(&self, draft_id: &str, author_id: &str) -> Result<Post, PublishError> {
        let draft = match self.drafts.get(draft_id, author_id).await {
            Ok(draft) => draft,
            Err(RepoError::NotFound) => {
                return Err(PublishError::DraftNotFound {
                    draft_id: draft_id.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(draft_id, error = %e, "Failed to load draft for publish");
                return Err(PublishError::Internal("failed to load draft".to_string()));
            }
        };

        if draft.is_published {
            return Err(PublishError::AlreadyPublished {
                draft_id: draft.draft_id,
            });
        }

        let metadata = self.validator.validate(&draft).await.map_err(|e| {
            match &e {
                ValidationError::Rejected { reason, detail } => {
                    tracing::info!(draft_id, reason = %reason, detail = %detail, "Draft rejected");
                }
                ValidationError::Catalog(cause) => {
                    tracing::error!(draft_id, error = %cause, "Interest catalog lookup failed");
                }
            }
            PublishError::from(e)
        })?;

        let post = build_post(draft, metadata);

        match self.posts.publish(post.clone()).await {
            Ok(()) => {
                tracing::info!(
                    post_id = %post.post_id,
                    read_time_seconds = post.read_time_seconds,
                    "Draft published"
                );
                Ok(post)
            }
            Err(RepoError::Constraint(msg)) => {
                tracing::warn!(draft_id, reason = %msg, "Publish lost to a concurrent publish");
                Err(PublishError::Conflict { post_id: post.post_id })
            }
            Err(e) => {
                tracing::error!(draft_id, error = %e, "Publish transaction failed");
                Err(PublishError::Internal("failed to publish draft".to_string()))
            }
        }
    }
}

/// Snapshot a draft as a post. Non-empty sidecar fields win over the
/// values extracted from the body; the title is always extracted.
fn build_post(draft: Draft, metadata: MetaData) -> Post {
    Post {
        post_id: draft.draft_id,
        author_id: draft.author_id,
        body: draft.body,
        title: metadata.title,
        tagline: prefer_sidecar(draft.tagline, metadata.tagline),
        preview_image_url: prefer_sidecar(draft.preview_image_url, metadata.preview_image_url),
        interests: draft.interests,
        read_time_seconds: metadata.read_time_seconds,
        like_count: 0,
        comment_count: 0,
        view_count: 0,
        published_at: Utc::now(),
    }
}

fn prefer_sidecar(sidecar: Option<String>, extracted: String) -> Option<String> {
    sidecar
        .filter(|value| !value.is_empty())
        .or_else(|| (!extracted.is_empty()).then_some(extracted))
}
