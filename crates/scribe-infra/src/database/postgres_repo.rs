//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use scribe_core::domain::{Comment, Draft, DraftChange, DraftSummary, Post};
use scribe_core::error::RepoError;
use scribe_core::ports::{DraftRepository, PostRepository};

use super::entity::draft::{self, Entity as DraftEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_comment::{self, Entity as CommentEntity};
use super::entity::post_like::{self, Entity as LikeEntity};
use super::postgres_base::{PostgresBaseRepository, query_err, write_err};

/// PostgreSQL draft repository.
pub type PostgresDraftRepository = PostgresBaseRepository<DraftEntity>;

/// PostgreSQL post repository. Owns likes and comments as well.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl DraftRepository for PostgresDraftRepository {
    async fn upsert(
        &self,
        draft_id: &str,
        author_id: &str,
        change: DraftChange,
    ) -> Result<(), RepoError> {
        tracing::debug!(draft_id, field = change.field(), "Upserting draft");

        let txn = self.db.begin().await.map_err(query_err)?;

        // Make sure a row exists, then take it under lock.
        DraftEntity::insert(draft::ActiveModel::from(Draft::new(draft_id, author_id)))
            .on_conflict(
                OnConflict::column(draft::Column::DraftId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(write_err)?;

        let model = DraftEntity::find_by_id(draft_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        if model.author_id != author_id {
            return Err(RepoError::NotFound);
        }
        if model.is_published {
            return Err(RepoError::Constraint(format!(
                "draft {draft_id} is already published"
            )));
        }

        let mut draft = Draft::try_from(model)?;
        draft.apply(change);
        DraftEntity::update_many()
            .set(draft::ActiveModel::from(draft))
            .filter(draft::Column::DraftId.eq(draft_id))
            .exec(&txn)
            .await
            .map_err(write_err)?;

        txn.commit().await.map_err(query_err)
    }

    async fn get(&self, draft_id: &str, author_id: &str) -> Result<Draft, RepoError> {
        let model = DraftEntity::find_by_id(draft_id)
            .filter(draft::Column::AuthorId.eq(author_id))
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;

        Draft::try_from(model)
    }

    async fn list_by_author(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<DraftSummary>, RepoError> {
        let models = DraftEntity::find()
            .filter(draft::Column::AuthorId.eq(author_id))
            .order_by_desc(draft::Column::UpdatedAt)
            .order_by_asc(draft::Column::DraftId)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        if models.is_empty() {
            return Err(RepoError::NotFound);
        }

        models
            .into_iter()
            .map(|model| Draft::try_from(model).map(|draft| DraftSummary::from(&draft)))
            .collect()
    }

    async fn delete(&self, draft_id: &str, author_id: &str) -> Result<(), RepoError> {
        DraftEntity::delete_many()
            .filter(draft::Column::DraftId.eq(draft_id))
            .filter(draft::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .map_err(write_err)?;
        Ok(())
    }
}

async fn insert_post<C: ConnectionTrait>(conn: &C, post: Post) -> Result<(), RepoError> {
    PostEntity::insert(post::ActiveModel::from(post))
        .exec_without_returning(conn)
        .await
        .map_err(write_err)?;
    Ok(())
}

/// Flip `is_published`, guarded so that only one writer can win.
async fn mark_published<C: ConnectionTrait>(
    conn: &C,
    draft_id: &str,
    author_id: &str,
) -> Result<(), RepoError> {
    let result = DraftEntity::update_many()
        .col_expr(draft::Column::IsPublished, Expr::value(true))
        .col_expr(
            draft::Column::UpdatedAt,
            Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
        )
        .filter(draft::Column::DraftId.eq(draft_id))
        .filter(draft::Column::AuthorId.eq(author_id))
        .filter(draft::Column::IsPublished.eq(false))
        .exec(conn)
        .await
        .map_err(write_err)?;

    if result.rows_affected > 0 {
        return Ok(());
    }

    let existing = DraftEntity::find_by_id(draft_id)
        .filter(draft::Column::AuthorId.eq(author_id))
        .one(conn)
        .await
        .map_err(query_err)?;
    match existing {
        Some(_) => Err(RepoError::Constraint(format!(
            "draft {draft_id} is already published"
        ))),
        None => Err(RepoError::NotFound),
    }
}

/// Lock a post row for a counter update.
async fn lock_post<C: ConnectionTrait>(conn: &C, post_id: &str) -> Result<post::Model, RepoError> {
    PostEntity::find_by_id(post_id)
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(query_err)?
        .ok_or(RepoError::NotFound)
}

async fn bump_counter<C: ConnectionTrait>(
    conn: &C,
    post_id: &str,
    column: post::Column,
    delta: i64,
) -> Result<(), RepoError> {
    PostEntity::update_many()
        .col_expr(column, Expr::col(column).add(delta))
        .filter(post::Column::PostId.eq(post_id))
        .exec(conn)
        .await
        .map_err(write_err)?;
    Ok(())
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, post: Post) -> Result<(), RepoError> {
        insert_post(&self.db, post).await
    }

    async fn mark_draft_published(
        &self,
        draft_id: &str,
        author_id: &str,
    ) -> Result<(), RepoError> {
        mark_published(&self.db, draft_id, author_id).await
    }

    async fn publish(&self, post: Post) -> Result<(), RepoError> {
        let (draft_id, author_id) = (post.post_id.clone(), post.author_id.clone());

        // Dropping `txn` before commit rolls both writes back.
        let txn = self.db.begin().await.map_err(query_err)?;
        insert_post(&txn, post).await?;
        mark_published(&txn, &draft_id, &author_id).await?;
        txn.commit().await.map_err(query_err)
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, RepoError> {
        PostEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)
            .and_then(Post::try_from)
    }

    async fn like(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let current = lock_post(&txn, post_id).await?;

        let inserted = LikeEntity::insert(post_like::ActiveModel {
            post_id: Set(post_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().into()),
        })
        .on_conflict(
            OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(write_err)?;

        if inserted > 0 {
            bump_counter(&txn, post_id, post::Column::LikeCount, 1).await?;
        }
        txn.commit().await.map_err(query_err)?;

        Ok(count(current.like_count) + inserted)
    }

    async fn unlike(&self, post_id: &str, user_id: &str) -> Result<u64, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        let current = lock_post(&txn, post_id).await?;

        let removed = LikeEntity::delete_many()
            .filter(post_like::Column::PostId.eq(post_id))
            .filter(post_like::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(write_err)?
            .rows_affected;

        if removed > 0 {
            bump_counter(&txn, post_id, post::Column::LikeCount, -1).await?;
        }
        txn.commit().await.map_err(query_err)?;

        Ok(count(current.like_count).saturating_sub(removed))
    }

    async fn likes_count(&self, post_id: &str) -> Result<u64, RepoError> {
        let model = PostEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .ok_or(RepoError::NotFound)?;
        Ok(count(model.like_count))
    }

    async fn comment(&self, comment: Comment) -> Result<Comment, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;
        lock_post(&txn, &comment.post_id).await?;

        CommentEntity::insert(post_comment::ActiveModel::from(comment.clone()))
            .exec_without_returning(&txn)
            .await
            .map_err(write_err)?;
        bump_counter(&txn, &comment.post_id, post::Column::CommentCount, 1).await?;

        txn.commit().await.map_err(query_err)?;
        Ok(comment)
    }

    async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, RepoError> {
        let exists = PostEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(query_err)?
            .is_some();
        if !exists {
            return Err(RepoError::NotFound);
        }

        let comments = CommentEntity::find()
            .filter(post_comment::Column::PostId.eq(post_id))
            .order_by_asc(post_comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(comments.into_iter().map(Into::into).collect())
    }
}
