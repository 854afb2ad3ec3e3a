//! `SeaORM` Entity for division table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "division")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub com2_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company2::Entity",
        from = "Column::Com2Id",
        to = "super::company2::Column::Id"
    )]
    Company2,
    #[sea_orm(has_many = "super::capex_list::Entity")]
    CapexList,
}

impl Related<super::company2::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company2.def()
    }
}

impl Related<super::capex_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CapexList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
