//! Interest entity. Minimum read times come from configuration, not this table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "interests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::interest_follow::Entity")]
    Follows,
}

impl Related<super::interest_follow::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Follows.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::interest_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::interest_category::Relation::Interest.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
