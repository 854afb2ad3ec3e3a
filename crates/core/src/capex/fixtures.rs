//! Row builders shared by the capex test modules.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{
    CapexBudgetType, CapexItem, Company, Division, PoLineItem, PurchaseOrder, SourceTables,
};

pub fn capex(
    capex_id: i64,
    division_id: Option<i64>,
    budget_type_id: Option<i64>,
    quantity: Decimal,
    unit_cost: Decimal,
) -> CapexItem {
    CapexItem {
        capex_id,
        division_id,
        budget_type_id,
        quantity: Some(quantity),
        unit_cost: Some(unit_cost),
    }
}

pub fn order(po_id: i64, po_no: &str, po_date: Option<(i32, u32, u32)>) -> PurchaseOrder {
    PurchaseOrder {
        po_id,
        po_no: Some(po_no.to_string()),
        po_date: po_date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
    }
}

pub fn line(
    id: i64,
    po_id: Option<i64>,
    expense_id: Option<i64>,
    quantity: Decimal,
    unit_price: Decimal,
) -> PoLineItem {
    PoLineItem {
        id,
        po_id,
        expense_id,
        quantity: Some(quantity),
        unit_price: Some(unit_price),
    }
}

pub fn division(id: i64, name: &str, company_id: Option<i64>) -> Division {
    Division {
        id,
        name: Some(name.to_string()),
        company_id,
    }
}

pub fn budget_type(id: i64, name: &str) -> CapexBudgetType {
    CapexBudgetType {
        id,
        name: Some(name.to_string()),
    }
}

pub fn company(id: i64, name: &str) -> Company {
    Company {
        id,
        name: Some(name.to_string()),
    }
}

/// Two companies, three divisions, one orphan item.
///
/// | capex | company | division    | budget | PO spend        |
/// |-------|---------|-------------|--------|-----------------|
/// | 1     | Acme    | Engineering | 1000   | PO-1: 250 + 150 |
/// | 2     | Acme    | Engineering | 500    | none            |
/// | 3     | Acme    | Finance     | 300    | PO-2: 320       |
/// | 4     | Globex  | Operations  | 800    | PO-1: 100       |
/// | 5     | -       | -           | 50     | none            |
pub fn standard_tables() -> SourceTables {
    SourceTables {
        capex_items: vec![
            capex(1, Some(10), Some(1), dec!(10), dec!(100)),
            capex(2, Some(10), Some(2), dec!(1), dec!(500)),
            capex(3, Some(20), Some(1), dec!(3), dec!(100)),
            capex(4, Some(30), Some(2), dec!(2), dec!(400)),
            capex(5, None, None, dec!(5), dec!(10)),
        ],
        purchase_orders: vec![
            order(100, "PO-1", Some((2025, 2, 3))),
            order(200, "PO-2", Some((2025, 4, 18))),
        ],
        po_lines: vec![
            line(1, Some(100), Some(1), dec!(5), dec!(50)),
            line(2, Some(100), Some(1), dec!(1), dec!(150)),
            line(3, Some(200), Some(3), dec!(4), dec!(80)),
            line(4, Some(100), Some(4), dec!(1), dec!(100)),
        ],
        divisions: vec![
            division(10, "Engineering", Some(1)),
            division(20, "Finance", Some(1)),
            division(30, "Operations", Some(2)),
        ],
        budget_types: vec![budget_type(1, "Machinery"), budget_type(2, "IT")],
        companies: vec![company(1, "Acme"), company(2, "Globex")],
    }
}
