//! Draft editing operations.

use std::sync::Arc;

use crate::domain::{Draft, DraftChange, DraftSummary};
use crate::error::DomainError;
use crate::ports::DraftRepository;

/// Largest page `list` will return.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Normalises editor input and forwards it to the draft store.
#[derive(Clone)]
pub struct DraftService {
    drafts: Arc<dyn DraftRepository>,
}

impl DraftService {
    pub fn new(drafts: Arc<dyn DraftRepository>) -> Self {
        Self { drafts }
    }

    pub async fn save_document(
        &self,
        draft_id: &str,
        author_id: &str,
        body: String,
    ) -> Result<(), DomainError> {
        self.save(draft_id, author_id, DraftChange::body(body)?).await
    }

    pub async fn save_tagline(
        &self,
        draft_id: &str,
        author_id: &str,
        tagline: &str,
    ) -> Result<(), DomainError> {
        self.save(draft_id, author_id, DraftChange::tagline(tagline)?).await
    }

    pub async fn save_interests(
        &self,
        draft_id: &str,
        author_id: &str,
        interests: Vec<String>,
    ) -> Result<(), DomainError> {
        self.save(draft_id, author_id, DraftChange::interests(interests)?).await
    }

    pub async fn save_preview_image(
        &self,
        draft_id: &str,
        author_id: &str,
        url: &str,
    ) -> Result<(), DomainError> {
        self.save(draft_id, author_id, DraftChange::preview_image(url)?).await
    }

    pub async fn get(&self, draft_id: &str, author_id: &str) -> Result<Draft, DomainError> {
        require_id("draft_id", draft_id)?;
        self.drafts
            .get(draft_id, author_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Draft", draft_id))
    }

    pub async fn list(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<DraftSummary>, DomainError> {
        require_id("user_id", author_id)?;
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(DomainError::Validation(format!(
                "limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        self.drafts
            .list_by_author(author_id, offset, limit)
            .await
            .map_err(|e| DomainError::from_repo(e, "Drafts of author", author_id))
    }

    pub async fn delete(&self, draft_id: &str, author_id: &str) -> Result<(), DomainError> {
        require_id("draft_id", draft_id)?;
        self.drafts
            .delete(draft_id, author_id)
            .await
            .map_err(|e| DomainError::from_repo(e, "Draft", draft_id))?;
        tracing::info!(draft_id, "Draft deleted");
        Ok(())
    }

    async fn save(
        &self,
        draft_id: &str,
        author_id: &str,
        change: DraftChange,
    ) -> Result<(), DomainError> {
        require_id("draft_id", draft_id)?;
        require_id("user_id", author_id)?;

        let field = change.field();
        match self.drafts.upsert(draft_id, author_id, change).await {
            Ok(()) => {
                tracing::debug!(draft_id, field, "Draft saved");
                Ok(())
            }
            Err(e) => Err(DomainError::from_repo(e, "Draft", draft_id)),
        }
    }
}

fn require_id(name: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{name} is required")));
    }
    Ok(())
}
