//! In-memory draft and post store - used when no database is configured.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::{Comment, Draft, DraftChange, DraftSummary, Post};
use scribe_core::error::RepoError;
use scribe_core::ports::{DraftRepository, PostRepository};

#[derive(Default)]
struct StoreState {
    drafts: HashMap<String, Draft>,
    posts: HashMap<String, Post>,
    likes: HashSet<(String, String)>,
    comments: Vec<Comment>,
}

impl StoreState {
    fn owned_draft_mut(&mut self, draft_id: &str, author_id: &str) -> Option<&mut Draft> {
        self.drafts
            .get_mut(draft_id)
            .filter(|draft| draft.author_id == author_id)
    }

    fn insert_post(&mut self, mut post: Post) -> Result<(), RepoError> {
        if self.posts.contains_key(&post.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} already exists",
                post.post_id
            )));
        }
        post.like_count = 0;
        post.comment_count = 0;
        post.view_count = 0;
        self.posts.insert(post.post_id.clone(), post);
        Ok(())
    }

    fn check_publishable(&self, draft_id: &str, author_id: &str) -> Result<(), RepoError> {
        match self.drafts.get(draft_id) {
            Some(draft) if draft.author_id == author_id => {
                if draft.is_published {
                    Err(RepoError::Constraint(format!(
                        "draft {draft_id} is already published"
                    )))
                } else {
                    Ok(())
                }
            }
            _ => Err(RepoError::NotFound),
        }
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut Post, RepoError> {
        self.posts.get_mut(post_id).ok_or(RepoError::NotFound)
    }
}

/// Draft and post store held in a single lock, so that publish is atomic.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Number of stored posts.
    pub async fn post_count(&self) -> usize {
        self.state.read().await.posts.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftRepository for InMemoryStore {
    async fn upsert(
        &self,
        draft_id: &str,
        author_id: &str,
        change: DraftChange,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;

        match state.drafts.get_mut(draft_id) {
            Some(draft) if draft.author_id != author_id => Err(RepoError::NotFound),
            Some(draft) if draft.is_published => Err(RepoError::Constraint(format!(
                "draft {draft_id} is already published"
            ))),
            Some(draft) => {
                draft.apply(change);
                Ok(())
            }
            None => {
                let mut draft = Draft::new(draft_id, author_id);
                draft.apply(change);
                state.drafts.insert(draft_id.to_string(), draft);
                Ok(())
            }
        }
    }

    async fn get(&self, draft_id: &str, author_id: &str) -> Result<Draft, RepoError> {
        let state = self.state.read().await;
        state
            .drafts
            .get(draft_id)
            .filter(|draft| draft.author_id == author_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_by_author(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<DraftSummary>, RepoError> {
        let state = self.state.read().await;

        let mut drafts: Vec<&Draft> = state
            .drafts
            .values()
            .filter(|draft| draft.author_id == author_id)
            .collect();
        drafts.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.draft_id.cmp(&b.draft_id))
        });

        let page: Vec<DraftSummary> = drafts
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(DraftSummary::from)
            .collect();

        if page.is_empty() {
            return Err(RepoError::NotFound);
        }
        Ok(page)
    }

    async fn delete(&self, draft_id: &str, author_id: &str) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        if state.owned_draft_mut(draft_id, author_id).is_some() {
            state.drafts.remove(draft_id);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(&self, post: Post) -> Result<(), RepoError> {
        self.state.write().await.insert_post(post)
    }

    async fn mark_draft_published(
        &self,
        draft_id: &str,
        author_id: &str,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.check_publishable(draft_id, author_id)?;
        if let Some(draft) = state.owned_draft_mut(draft_id, author_id) {
            draft.is_published = true;
            draft.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn publish(&self, post: Post) -> Result<(), RepoError> {
        let mut state = self.state.write().await;

        // Check both halves before touching anything.
        if state.posts.contains_key(&post.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} already exists",
                post.post_id
            )));
        }
        state.check_publishable(&post.post_id, &post.author_id)?;

        let (draft_id, author_id) = (post.post_id.clone(), post.author_id.clone());
        state.insert_post(post)?;
        if let Some(draft) = state.owned_draft_mut(&draft_id, &author_id) {
            draft.is_published = true;
            draft.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, RepoError> {
        let state = self.state.read().await;
        state.posts.get(post_id).cloned().ok_or(RepoError::NotFound)
    }

    async fn like(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError> {
        let mut state = self.state.write().await;
        state.post_mut(post_id)?;

        let inserted = state
            .likes
            .insert((post_id.to_string(), user_id.to_string()));
        let post = state.post_mut(post_id)?;
        if inserted {
            post.like_count += 1;
        }
        Ok(post.like_count)
    }

    async fn unlike(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError> {
        let mut state = self.state.write().await;
        state.post_mut(post_id)?;

        let removed = state
            .likes
            .remove(&(post_id.to_string(), user_id.to_string()));
        let post = state.post_mut(post_id)?;
        if removed {
            post.like_count = post.like_count.saturating_sub(1);
        }
        Ok(post.like_count)
    }

    async fn likes_count(&self, post_id: &str) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        state
            .posts
            .get(post_id)
            .map(|post| post.like_count)
            .ok_or(RepoError::NotFound)
    }

    async fn comment(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut state = self.state.write().await;
        state.post_mut(&comment.post_id)?.comment_count += 1;
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, RepoError> {
        let state = self.state.read().await;
        if !state.posts.contains_key(post_id) {
            return Err(RepoError::NotFound);
        }
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }
}
