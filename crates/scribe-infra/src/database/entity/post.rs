//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::Post;
use scribe_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: String,
    pub author_id: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub title: String,
    pub tagline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preview_image_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub interests: Json,
    pub read_time_seconds: i32,
    pub like_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub published_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_like::Entity")]
    Likes,
    #[sea_orm(has_many = "super::post_comment::Entity")]
    Comments,
}

impl Related<super::post_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::post_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let interests = serde_json::from_value(model.interests)
            .map_err(|e| RepoError::Query(format!("corrupt interests column: {e}")))?;

        Ok(Self {
            post_id: model.post_id,
            author_id: model.author_id,
            body: model.body,
            title: model.title,
            tagline: model.tagline,
            preview_image_url: model.preview_image_url,
            interests,
            read_time_seconds: u32::try_from(model.read_time_seconds).unwrap_or(0),
            like_count: counter(model.like_count),
            comment_count: counter(model.comment_count),
            view_count: counter(model.view_count),
            published_at: model.published_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel. Counters start at zero.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            post_id: Set(post.post_id),
            author_id: Set(post.author_id),
            body: Set(post.body),
            title: Set(post.title),
            tagline: Set(post.tagline),
            preview_image_url: Set(post.preview_image_url),
            interests: Set(Json::from(post.interests)),
            read_time_seconds: Set(i32::try_from(post.read_time_seconds).unwrap_or(i32::MAX)),
            like_count: Set(0),
            comment_count: Set(0),
            view_count: Set(0),
            published_at: Set(post.published_at.into()),
        }
    }
}
