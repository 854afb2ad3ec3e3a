//! CAPEX report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback label for rows whose division has no company.
pub const NO_COMPANY: &str = "No Company";

/// Fallback label for capex items without a division.
pub const NO_DIVISION: &str = "No Division";

/// Sentinel company filter value meaning "no company filter".
pub const ALL_COMPANIES: &str = "All Companies";

/// Sentinel division filter value meaning "no division filter".
pub const ALL_DIVISIONS: &str = "All Divisions";

/// A budgeted capital-expenditure line (`capex_list`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapexItem {
    /// Capex ID, referenced by PO lines as their expense.
    pub capex_id: i64,
    /// Owning division.
    pub division_id: Option<i64>,
    /// Budget type classification.
    pub budget_type_id: Option<i64>,
    /// Budgeted quantity.
    pub quantity: Option<Decimal>,
    /// Budgeted unit cost.
    pub unit_cost: Option<Decimal>,
}

impl CapexItem {
    /// Budgeted amount (quantity x unit cost); missing factors count as zero.
    #[must_use]
    pub fn budgeted_amount(&self) -> Decimal {
        self.quantity.unwrap_or_default() * self.unit_cost.unwrap_or_default()
    }
}

/// A purchase order header (`po_order`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// PO ID.
    pub po_id: i64,
    /// Human-facing PO number.
    pub po_no: Option<String>,
    /// PO date.
    pub po_date: Option<NaiveDate>,
}

/// A purchase order line (`po_order_detail`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoLineItem {
    /// Line ID.
    pub id: i64,
    /// Parent purchase order.
    pub po_id: Option<i64>,
    /// Capex item this line spends against.
    pub expense_id: Option<i64>,
    /// Ordered quantity.
    pub quantity: Option<Decimal>,
    /// Unit price.
    pub unit_price: Option<Decimal>,
}

impl PoLineItem {
    /// Line amount (quantity x unit price); missing factors count as zero.
    #[must_use]
    pub fn line_amount(&self) -> Decimal {
        self.quantity.unwrap_or_default() * self.unit_price.unwrap_or_default()
    }
}

/// A division (`division`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// Division ID.
    pub id: i64,
    /// Division name.
    pub name: Option<String>,
    /// Owning company.
    pub company_id: Option<i64>,
}

/// A capex budget type (`capex_budget_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapexBudgetType {
    /// Budget type ID.
    pub id: i64,
    /// Budget type name.
    pub name: Option<String>,
}

/// A company (`company2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: i64,
    /// Company name.
    pub name: Option<String>,
}

/// Raw rows of the six source relations, as fetched in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTables {
    /// Capex items.
    pub capex_items: Vec<CapexItem>,
    /// Purchase orders.
    pub purchase_orders: Vec<PurchaseOrder>,
    /// Purchase order lines.
    pub po_lines: Vec<PoLineItem>,
    /// Divisions.
    pub divisions: Vec<Division>,
    /// Budget types.
    pub budget_types: Vec<CapexBudgetType>,
    /// Companies.
    pub companies: Vec<Company>,
}

/// One reconciled row of capex budget against PO spend.
///
/// Invariant: `budget_balance == capex_amount - po_line_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRow {
    /// Company name, or [`NO_COMPANY`].
    pub company_name: String,
    /// Division name, or [`NO_DIVISION`].
    pub division: String,
    /// Budget type name.
    pub capex_type: Option<String>,
    /// Capex ID.
    pub capex_id: i64,
    /// PO number, empty when the item has no PO.
    pub po_no: String,
    /// PO date as `YYYY-MM-DD`, empty when absent.
    pub po_date: String,
    /// Budgeted amount.
    pub capex_amount: Decimal,
    /// Sum of PO line amounts.
    pub po_line_amount: Decimal,
    /// Budget left after PO spend.
    pub budget_balance: Decimal,
}
