//! `SeaORM` Entity for capex_list table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "capex_list")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub capex_id: i64,
    pub div_id: Option<i64>,
    pub budget_type_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub qty: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub unit_cost: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::division::Entity",
        from = "Column::DivId",
        to = "super::division::Column::Id"
    )]
    Division,
    #[sea_orm(
        belongs_to = "super::capex_budget_type::Entity",
        from = "Column::BudgetTypeId",
        to = "super::capex_budget_type::Column::Id"
    )]
    CapexBudgetType,
}

impl Related<super::division::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Division.def()
    }
}

impl Related<super::capex_budget_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CapexBudgetType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
