//! Category entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::interest::Entity> for Entity {
    fn to() -> RelationDef {
        super::interest_category::Relation::Interest.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::interest_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
