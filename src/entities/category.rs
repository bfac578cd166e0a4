use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub category_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        super::film_category::Relation::Film.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::film_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
