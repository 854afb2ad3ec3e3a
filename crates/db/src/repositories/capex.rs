//! Capex source repository.
//!
//! Reads the six report relations in full. The report joins in memory, so
//! no filtering happens here.

use async_trait::async_trait;
use capexview_core::capex::{
    CapexBudgetType, CapexItem, CapexSource, Company, Division, PoLineItem, PurchaseOrder,
    SourceError, SourceTables,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use tracing::{debug, error};

use crate::entities::{
    capex_budget_type, capex_list, company2, division, po_order, po_order_detail,
};

/// Repository over the intranet purchasing schema.
#[derive(Debug, Clone)]
pub struct CapexRepository {
    db: DatabaseConnection,
}

impl CapexRepository {
    /// Creates a new capex repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every source table, in a fixed order.
    ///
    /// # Errors
    ///
    /// Returns the first failing query, tagged with its table.
    pub async fn load_tables(&self) -> Result<SourceTables, SourceError> {
        let capex_items = capex_list::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("capex_list", e))?;
        let purchase_orders = po_order::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("po_order", e))?;
        let po_lines = po_order_detail::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("po_order_detail", e))?;
        let divisions = division::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("division", e))?;
        let budget_types = capex_budget_type::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("capex_budget_type", e))?;
        let companies = company2::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| source_error("company2", e))?;

        debug!(
            capex_items = capex_items.len(),
            purchase_orders = purchase_orders.len(),
            po_lines = po_lines.len(),
            "Loaded capex source tables"
        );

        Ok(SourceTables {
            capex_items: capex_items.into_iter().map(Into::into).collect(),
            purchase_orders: purchase_orders.into_iter().map(Into::into).collect(),
            po_lines: po_lines.into_iter().map(Into::into).collect(),
            divisions: divisions.into_iter().map(Into::into).collect(),
            budget_types: budget_types.into_iter().map(Into::into).collect(),
            companies: companies.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl CapexSource for CapexRepository {
    async fn fetch_tables(&self) -> Result<SourceTables, SourceError> {
        self.load_tables().await
    }
}

fn source_error(table: &'static str, err: DbErr) -> SourceError {
    error!(table, error = %err, "Capex source query failed");
    match err {
        DbErr::Conn(e) => SourceError::Unavailable(e.to_string()),
        DbErr::ConnectionAcquire(e) => SourceError::Unavailable(e.to_string()),
        other => SourceError::Query {
            table,
            message: other.to_string(),
        },
    }
}

impl From<capex_list::Model> for CapexItem {
    fn from(m: capex_list::Model) -> Self {
        Self {
            capex_id: m.capex_id,
            division_id: m.div_id,
            budget_type_id: m.budget_type_id,
            quantity: m.qty,
            unit_cost: m.unit_cost,
        }
    }
}

impl From<po_order::Model> for PurchaseOrder {
    fn from(m: po_order::Model) -> Self {
        Self {
            po_id: m.po_id,
            po_no: m.po_no,
            po_date: m.po_date,
        }
    }
}

impl From<po_order_detail::Model> for PoLineItem {
    fn from(m: po_order_detail::Model) -> Self {
        Self {
            id: m.id,
            po_id: m.po_id,
            expense_id: m.expense_id,
            quantity: m.qty,
            unit_price: m.unit_price,
        }
    }
}

impl From<division::Model> for Division {
    fn from(m: division::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            company_id: m.com2_id,
        }
    }
}

impl From<capex_budget_type::Model> for CapexBudgetType {
    fn from(m: capex_budget_type::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<company2::Model> for Company {
    fn from(m: company2::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
