use async_trait::async_trait;

use crate::domain::{Comment, Draft, DraftChange, DraftSummary, Post};
use crate::error::RepoError;

/// Draft persistence, keyed by `(draft_id, author_id)`.
///
/// Writes to a draft owned by another author report `RepoError::NotFound`;
/// writes to a published draft report `RepoError::Constraint`.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Create the draft if absent, then apply `change` to it.
    async fn upsert(
        &self,
        draft_id: &str,
        author_id: &str,
        change: DraftChange,
    ) -> Result<(), RepoError>;

    /// Fetch a draft owned by `author_id`.
    async fn get(&self, draft_id: &str, author_id: &str) -> Result<Draft, RepoError>;

    /// Drafts of one author, most recently updated first.
    /// Returns `RepoError::NotFound` when the page is empty.
    async fn list_by_author(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<DraftSummary>, RepoError>;

    /// Delete a draft. Deleting a missing draft succeeds.
    async fn delete(&self, draft_id: &str, author_id: &str) -> Result<(), RepoError>;

    async fn upsert_document(
        &self,
        draft_id: &str,
        author_id: &str,
        body: String,
    ) -> Result<(), RepoError> {
        self.upsert(draft_id, author_id, DraftChange::Body(body)).await
    }

    async fn upsert_tagline(
        &self,
        draft_id: &str,
        author_id: &str,
        tagline: Option<String>,
    ) -> Result<(), RepoError> {
        self.upsert(draft_id, author_id, DraftChange::Tagline(tagline)).await
    }

    async fn upsert_interests(
        &self,
        draft_id: &str,
        author_id: &str,
        interests: Vec<String>,
    ) -> Result<(), RepoError> {
        self.upsert(draft_id, author_id, DraftChange::Interests(interests)).await
    }

    async fn upsert_preview_image(
        &self,
        draft_id: &str,
        author_id: &str,
        url: Option<String>,
    ) -> Result<(), RepoError> {
        self.upsert(draft_id, author_id, DraftChange::PreviewImage(url)).await
    }
}

/// Published posts and their engagement.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. A second post with the same id is a `RepoError::Constraint`.
    async fn create_post(&self, post: Post) -> Result<(), RepoError>;

    /// Flag a draft as published.
    async fn mark_draft_published(&self, draft_id: &str, author_id: &str)
    -> Result<(), RepoError>;

    /// `create_post` and `mark_draft_published` in one transaction.
    /// Either both apply or neither does.
    async fn publish(&self, post: Post) -> Result<(), RepoError>;

    async fn get_post(&self, post_id: &str) -> Result<Post, RepoError>;

    /// Record a like; returns the like count afterwards. Idempotent.
    async fn like(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError>;

    /// Remove a like; returns the like count afterwards. Idempotent.
    async fn unlike(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError>;

    async fn likes_count(&self, post_id: &str) -> Result<u64, RepoError>;

    /// Append a comment and bump the post's comment counter.
    async fn comment(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments on a post, oldest first.
    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, RepoError>;
}
