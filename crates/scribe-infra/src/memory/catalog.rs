//! In-memory interest catalog.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::domain::{
    CategoryInterests, InterestFollowState, InterestRequirement, ReadTimePolicy,
};
use scribe_core::error::RepoError;
use scribe_core::ports::InterestCatalog;

/// Catalog built from a category → interests table.
///
/// Interests named in the read-time policy are known even when no category
/// lists them. Follow state lives in memory only.
pub struct InMemoryInterestCatalog {
    categories: BTreeMap<String, Vec<String>>,
    policy: ReadTimePolicy,
    follows: RwLock<HashSet<(String, String)>>,
}

impl InMemoryInterestCatalog {
    pub fn new(categories: BTreeMap<String, Vec<String>>, policy: ReadTimePolicy) -> Self {
        Self {
            categories,
            policy,
            follows: RwLock::new(HashSet::new()),
        }
    }

    fn is_known(&self, interest: &str) -> bool {
        self.policy.interest_minimums.contains_key(interest)
            || self
                .categories
                .values()
                .any(|names| names.iter().any(|name| name == interest))
    }
}

#[async_trait]
impl InterestCatalog for InMemoryInterestCatalog {
    async fn minimum_read_time(&self, interest: &str) -> Result<InterestRequirement, RepoError> {
        if !self.is_known(interest) {
            return Ok(InterestRequirement::Unknown);
        }
        Ok(InterestRequirement::Known {
            minimum_read_time: self.policy.minimum_for(interest),
        })
    }

    fn global_minimum_read_time(&self) -> u32 {
        self.policy.global_minimum
    }

    async fn list_categories_with_interests(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryInterests>, RepoError> {
        let follows = self.follows.read().await;

        Ok(self
            .categories
            .iter()
            .map(|(category, names)| CategoryInterests {
                category: category.clone(),
                interests: names
                    .iter()
                    .map(|name| InterestFollowState {
                        name: name.clone(),
                        followed: follows.contains(&(user_id.to_string(), name.clone())),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn follow(&self, user_id: &str, interest: &str) -> Result<(), RepoError> {
        if !self.is_known(interest) {
            return Err(RepoError::NotFound);
        }
        self.follows
            .write()
            .await
            .insert((user_id.to_string(), interest.to_string()));
        Ok(())
    }

    async fn unfollow(&self, user_id: &str, interest: &str) -> Result<(), RepoError> {
        if !self.is_known(interest) {
            return Err(RepoError::NotFound);
        }
        self.follows
            .write()
            .await
            .remove(&(user_id.to_string(), interest.to_string()));
        Ok(())
    }
}
