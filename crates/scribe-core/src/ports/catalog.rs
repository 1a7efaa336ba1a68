//! Interest catalog port.

use async_trait::async_trait;

use crate::domain::{CategoryInterests, InterestRequirement};
use crate::error::RepoError;

/// Read access to the interest catalog, plus the per-user follow relation.
///
/// Interest and category entities are never changed through this trait.
#[async_trait]
pub trait InterestCatalog: Send + Sync {
    /// Whether `interest` exists, and its minimum read time if one is configured.
    async fn minimum_read_time(&self, interest: &str) -> Result<InterestRequirement, RepoError>;

    /// Read-time floor applied to every post, in seconds.
    fn global_minimum_read_time(&self) -> u32;

    /// All categories with their interests and the user's follow state.
    async fn list_categories_with_interests(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryInterests>, RepoError>;

    /// Follow an interest. Following twice is a no-op.
    async fn follow(&self, user_id: &str, interest: &str) -> Result<(), RepoError>;

    /// Stop following an interest. Unfollowing twice is a no-op.
    async fn unfollow(&self, user_id: &str, interest: &str) -> Result<(), RepoError>;
}
