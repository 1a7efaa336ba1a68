//! PostgreSQL-backed interest catalog.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set};

use scribe_core::domain::{
    CategoryInterests, InterestFollowState, InterestRequirement, ReadTimePolicy,
};
use scribe_core::error::RepoError;
use scribe_core::ports::InterestCatalog;

use super::entity::category::Entity as CategoryEntity;
use super::entity::interest::{self, Entity as InterestEntity};
use super::entity::interest_follow::{self, Entity as FollowEntity};
use super::postgres_base::{query_err, write_err};

/// Known interests and categories come from the database; read-time minimums
/// from configuration.
pub struct PostgresInterestCatalog {
    db: DbConn,
    policy: ReadTimePolicy,
}

impl PostgresInterestCatalog {
    pub fn new(db: DbConn, policy: ReadTimePolicy) -> Self {
        Self { db, policy }
    }

    async fn find_interest(&self, name: &str) -> Result<Option<interest::Model>, RepoError> {
        InterestEntity::find()
            .filter(interest::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(query_err)
    }
}

#[async_trait]
impl InterestCatalog for PostgresInterestCatalog {
    async fn minimum_read_time(&self, interest: &str) -> Result<InterestRequirement, RepoError> {
        if let Some(minimum) = self.policy.minimum_for(interest) {
            return Ok(InterestRequirement::Known {
                minimum_read_time: Some(minimum),
            });
        }

        Ok(match self.find_interest(interest).await? {
            Some(_) => InterestRequirement::Known {
                minimum_read_time: None,
            },
            None => InterestRequirement::Unknown,
        })
    }

    fn global_minimum_read_time(&self) -> u32 {
        self.policy.global_minimum
    }

    async fn list_categories_with_interests(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryInterests>, RepoError> {
        let categories = CategoryEntity::find()
            .order_by_asc(super::entity::category::Column::Name)
            .find_with_related(InterestEntity)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        let followed: HashSet<i32> = FollowEntity::find()
            .filter(interest_follow::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(query_err)?
            .into_iter()
            .map(|follow| follow.interest_id)
            .collect();

        Ok(categories
            .into_iter()
            .map(|(category, interests)| CategoryInterests {
                category: category.name,
                interests: interests
                    .into_iter()
                    .map(|interest| InterestFollowState {
                        followed: followed.contains(&interest.id),
                        name: interest.name,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn follow(&self, user_id: &str, interest: &str) -> Result<(), RepoError> {
        let interest = self.find_interest(interest).await?.ok_or(RepoError::NotFound)?;

        FollowEntity::insert(interest_follow::ActiveModel {
            user_id: Set(user_id.to_string()),
            interest_id: Set(interest.id),
            created_at: Set(Utc::now().into()),
        })
        .on_conflict(
            OnConflict::columns([
                interest_follow::Column::UserId,
                interest_follow::Column::InterestId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(write_err)?;
        Ok(())
    }

    async fn unfollow(&self, user_id: &str, interest: &str) -> Result<(), RepoError> {
        let interest = self.find_interest(interest).await?.ok_or(RepoError::NotFound)?;

        FollowEntity::delete_many()
            .filter(interest_follow::Column::UserId.eq(user_id))
            .filter(interest_follow::Column::InterestId.eq(interest.id))
            .exec(&self.db)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}
