//! `SeaORM` entities for the intranet purchasing schema.
//!
//! Only the columns the report reads are mapped.

pub mod prelude;

pub mod capex_budget_type;
pub mod capex_list;
pub mod company2;
pub mod division;
pub mod po_order;
pub mod po_order_detail;
