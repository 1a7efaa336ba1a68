//! Likes and comments on published posts.

use std::sync::Arc;

use crate::domain::{Comment, Post};
use crate::error::DomainError;
use crate::ports::PostRepository;

#[derive(Clone)]
pub struct EngagementService {
    posts: Arc<dyn PostRepository>,
}

impl EngagementService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn post(&self, post_id: &str) -> Result<Post, DomainError> {
        self.posts
            .get_post(post_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))
    }

    /// Like a post on behalf of `user_id`; returns the like count.
    pub async fn like(&self, post_id: &str, user_id: &str) -> Result<u64, DomainError> {
        let count = self
            .posts
            .like(post_id, user_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))?;
        tracing::debug!(post_id, like_count = count, "Post liked");
        Ok(count)
    }

    /// Withdraw a like; returns the like count.
    pub async fn unlike(&self, post_id: &str, user_id: &str) -> Result<u64, DomainError> {
        let count = self
            .posts
            .unlike(post_id, user_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))?;
        tracing::debug!(post_id, like_count = count, "Post unliked");
        Ok(count)
    }

    pub async fn likes_count(&self, post_id: &str) -> Result<u64, DomainError> {
        self.posts
            .likes_count(post_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))
    }

    pub async fn comment(
        &self,
        post_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation(
                "comment text must not be empty".to_string(),
            ));
        }

        self.posts
            .comment(Comment::new(post_id, user_id, text.to_string()))
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))
    }

    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>, DomainError> {
        self.posts
            .list_comments(post_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Post", post_id))
    }
}
