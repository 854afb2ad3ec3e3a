//! `SeaORM` Entity for po_order_detail table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "po_order_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub po_id: Option<i64>,
    /// The capex item this line spends against.
    pub expense_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub qty: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((18, 4)))", nullable)]
    pub unit_price: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::po_order::Entity",
        from = "Column::PoId",
        to = "super::po_order::Column::PoId"
    )]
    PoOrder,
}

impl Related<super::po_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
