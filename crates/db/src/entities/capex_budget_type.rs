//! `SeaORM` Entity for capex_budget_type table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "capex_budget_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::capex_list::Entity")]
    CapexList,
}

impl Related<super::capex_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CapexList.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
