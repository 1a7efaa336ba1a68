//! Draft entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::Draft;
use scribe_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drafts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub draft_id: String,
    pub author_id: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub tagline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preview_image_url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub interests: Json,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Draft.
impl TryFrom<Model> for Draft {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let interests = serde_json::from_value(model.interests)
            .map_err(|e| RepoError::Query(format!("corrupt interests column: {e}")))?;

        Ok(Self {
            draft_id: model.draft_id,
            author_id: model.author_id,
            body: model.body,
            tagline: model.tagline,
            preview_image_url: model.preview_image_url,
            interests,
            is_published: model.is_published,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain Draft to SeaORM ActiveModel.
impl From<Draft> for ActiveModel {
    fn from(draft: Draft) -> Self {
        Self {
            draft_id: Set(draft.draft_id),
            author_id: Set(draft.author_id),
            body: Set(draft.body),
            tagline: Set(draft.tagline),
            preview_image_url: Set(draft.preview_image_url),
            interests: Set(Json::from(draft.interests)),
            is_published: Set(draft.is_published),
            created_at: Set(draft.created_at.into()),
            updated_at: Set(draft.updated_at.into()),
        }
    }
}
