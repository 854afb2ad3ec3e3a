//! `SeaORM` Entity for po_order table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "po_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub po_id: i64,
    pub po_no: Option<String>,
    pub po_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::po_order_detail::Entity")]
    PoOrderDetail,
}

impl Related<super::po_order_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoOrderDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
