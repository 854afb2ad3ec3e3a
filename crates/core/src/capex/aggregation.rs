//! Reconciliation of capex budget lines against purchase order lines.

use std::cmp::Ordering;
use std::collections::HashMap;

use capexview_shared::types::round_amount;
use rust_decimal::Decimal;

use super::types::{AggregatedRow, NO_COMPANY, NO_DIVISION, PoLineItem, SourceTables};

/// Grouping key of one output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    company_name: String,
    division: String,
    capex_type: Option<String>,
    capex_id: i64,
    po_no: String,
    po_date: String,
}

#[derive(Debug, Clone, Copy)]
struct GroupTotals {
    capex_amount: Decimal,
    po_line_amount: Decimal,
}

/// Aggregation engine joining the six source relations into report rows.
pub struct AggregationEngine;

impl AggregationEngine {
    /// Builds the reconciled report rows from raw source tables.
    ///
    /// Every capex item is left-joined to its budget type, PO lines, purchase
    /// orders, division and company, then grouped by
    /// (company, division, capex type, capex id, PO number, PO date):
    ///
    /// - `capex_amount` is the max of quantity x unit cost in the group. A capex
    ///   item fans out once per PO line, and the budget repeats on every copy,
    ///   so the max recovers it without double counting.
    /// - `po_line_amount` is the sum of the group's line amounts.
    /// - Both are rounded to 2 places; `budget_balance` is their difference.
    ///
    /// Items with no PO lines still produce exactly one row.
    #[must_use]
    pub fn aggregate(tables: &SourceTables) -> Vec<AggregatedRow> {
        let budget_types = index_by(&tables.budget_types, |t| t.id);
        let orders = index_by(&tables.purchase_orders, |o| o.po_id);
        let divisions = index_by(&tables.divisions, |d| d.id);
        let companies = index_by(&tables.companies, |c| c.id);

        let mut lines_by_expense: HashMap<i64, Vec<&PoLineItem>> = HashMap::new();
        for line in &tables.po_lines {
            if let Some(expense_id) = line.expense_id {
                lines_by_expense.entry(expense_id).or_default().push(line);
            }
        }

        let mut groups: HashMap<GroupKey, GroupTotals> = HashMap::new();

        for item in &tables.capex_items {
            let capex_type = item
                .budget_type_id
                .and_then(|id| budget_types.get(&id))
                .and_then(|t| t.name.clone());
            let division = item.division_id.and_then(|id| divisions.get(&id)).copied();
            let division_name = division
                .and_then(|d| d.name.clone())
                .unwrap_or_else(|| NO_DIVISION.to_string());
            let company_name = division
                .and_then(|d| d.company_id)
                .and_then(|id| companies.get(&id))
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| NO_COMPANY.to_string());
            let budgeted = item.budgeted_amount();

            let fan_out: Vec<Option<&PoLineItem>> = match lines_by_expense.get(&item.capex_id) {
                Some(lines) => lines.iter().copied().map(Some).collect(),
                None => vec![None],
            };

            for line in fan_out {
                let order = line
                    .and_then(|l| l.po_id)
                    .and_then(|id| orders.get(&id))
                    .copied();

                let key = GroupKey {
                    company_name: company_name.clone(),
                    division: division_name.clone(),
                    capex_type: capex_type.clone(),
                    capex_id: item.capex_id,
                    po_no: order.and_then(|o| o.po_no.clone()).unwrap_or_default(),
                    po_date: order
                        .and_then(|o| o.po_date)
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                };
                let spent = line.map_or(Decimal::ZERO, PoLineItem::line_amount);

                groups
                    .entry(key)
                    .and_modify(|totals| {
                        totals.capex_amount = totals.capex_amount.max(budgeted);
                        totals.po_line_amount += spent;
                    })
                    .or_insert(GroupTotals {
                        capex_amount: budgeted,
                        po_line_amount: spent,
                    });
            }
        }

        let mut rows: Vec<AggregatedRow> = groups
            .into_iter()
            .map(|(key, totals)| {
                let capex_amount = round_amount(totals.capex_amount);
                let po_line_amount = round_amount(totals.po_line_amount);
                AggregatedRow {
                    company_name: key.company_name,
                    division: key.division,
                    capex_type: key.capex_type,
                    capex_id: key.capex_id,
                    po_no: key.po_no,
                    po_date: key.po_date,
                    capex_amount,
                    po_line_amount,
                    budget_balance: capex_amount - po_line_amount,
                }
            })
            .collect();

        rows.sort_by(compare_rows);
        rows
    }
}

/// Indexes rows by primary key. The first row wins on duplicate keys.
fn index_by<T>(rows: &[T], key: impl Fn(&T) -> i64) -> HashMap<i64, &T> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(row)).or_insert(row);
    }
    index
}

/// Report order: company, division, capex type (missing last), capex id.
fn compare_rows(a: &AggregatedRow, b: &AggregatedRow) -> Ordering {
    a.company_name
        .cmp(&b.company_name)
        .then_with(|| a.division.cmp(&b.division))
        .then_with(|| nulls_last(a.capex_type.as_deref(), b.capex_type.as_deref()))
        .then_with(|| a.capex_id.cmp(&b.capex_id))
        .then_with(|| a.po_no.cmp(&b.po_no))
        .then_with(|| a.po_date.cmp(&b.po_date))
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
