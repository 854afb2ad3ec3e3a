//! Division roll-up, grand totals and the detail projection.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::AggregatedRow;

/// Column order of the exported detail table.
pub const EXPORT_COLUMNS: [&str; 8] = [
    "division",
    "capex_type",
    "capex_id",
    "po_no",
    "po_date",
    "capex_amount",
    "po_line_amount",
    "budget_balance",
];

/// Summed amounts over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Total capex amount.
    pub capex_amount: Decimal,
    /// Total PO line amount.
    pub po_line_amount: Decimal,
    /// Total budget balance.
    pub budget_balance: Decimal,
}

impl Totals {
    fn add(&mut self, row: &AggregatedRow) {
        self.capex_amount += row.capex_amount;
        self.po_line_amount += row.po_line_amount;
        self.budget_balance += row.budget_balance;
    }

    /// Sums the amounts of every row.
    #[must_use]
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a AggregatedRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut totals, row| {
            totals.add(row);
            totals
        })
    }
}

/// One row of the summary-by-division table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionSummary {
    /// Division name.
    pub division: String,
    /// Amounts summed over the division.
    pub totals: Totals,
}

/// Metric cards above the detail table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailMetrics {
    /// Number of distinct capex items.
    pub capex_items: usize,
    /// Amounts summed over the detail rows.
    pub totals: Totals,
}

/// One exported row, in [`EXPORT_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    /// Division name.
    pub division: String,
    /// Budget type name.
    pub capex_type: Option<String>,
    /// Capex ID.
    pub capex_id: i64,
    /// PO number.
    pub po_no: String,
    /// PO date.
    pub po_date: String,
    /// Budgeted amount.
    pub capex_amount: Decimal,
    /// PO line amount.
    pub po_line_amount: Decimal,
    /// Budget balance.
    pub budget_balance: Decimal,
}

impl ExportRow {
    /// Cell values in [`EXPORT_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.division.clone(),
            self.capex_type.clone().unwrap_or_default(),
            self.capex_id.to_string(),
            self.po_no.clone(),
            self.po_date.clone(),
            format!("{:.2}", self.capex_amount),
            format!("{:.2}", self.po_line_amount),
            format!("{:.2}", self.budget_balance),
        ]
    }
}

/// The detail table as handed to the export adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTable {
    /// Header row.
    pub columns: Vec<String>,
    /// Data rows.
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Header plus data rows as cell values.
    #[must_use]
    pub fn to_values(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.clone())
            .chain(self.rows.iter().map(ExportRow::cells))
            .collect()
    }
}

/// Roll-ups over aggregated rows.
pub struct SummaryRollup;

impl SummaryRollup {
    /// Keeps rows of one company; `None` keeps everything.
    #[must_use]
    pub fn filter_company(rows: &[AggregatedRow], company: Option<&str>) -> Vec<AggregatedRow> {
        match company {
            Some(name) => rows
                .iter()
                .filter(|r| r.company_name == name)
                .cloned()
                .collect(),
            None => rows.to_vec(),
        }
    }

    /// Sums the amounts per division, ordered by division name.
    #[must_use]
    pub fn by_division(rows: &[AggregatedRow]) -> Vec<DivisionSummary> {
        let mut divisions: BTreeMap<&str, Totals> = BTreeMap::new();
        for row in rows {
            divisions.entry(row.division.as_str()).or_default().add(row);
        }

        divisions
            .into_iter()
            .map(|(division, totals)| DivisionSummary {
                division: division.to_string(),
                totals,
            })
            .collect()
    }

    /// Totals over every row, for the top metric cards.
    #[must_use]
    pub fn grand_totals(rows: &[AggregatedRow]) -> Totals {
        Totals::of(rows)
    }

    /// Applies the division filter on top of already company-filtered rows.
    #[must_use]
    pub fn detail(rows: &[AggregatedRow], division: Option<&str>) -> Vec<AggregatedRow> {
        match division {
            Some(name) => rows
                .iter()
                .filter(|r| r.division == name)
                .cloned()
                .collect(),
            None => rows.to_vec(),
        }
    }

    /// Metric cards for the detail rows.
    #[must_use]
    pub fn detail_metrics(detail: &[AggregatedRow]) -> DetailMetrics {
        let capex_items = detail
            .iter()
            .map(|r| r.capex_id)
            .collect::<HashSet<_>>()
            .len();

        DetailMetrics {
            capex_items,
            totals: Totals::of(detail),
        }
    }

    /// Projects detail rows onto the export columns.
    #[must_use]
    pub fn export_projection(detail: &[AggregatedRow]) -> ExportTable {
        ExportTable {
            columns: EXPORT_COLUMNS.iter().map(ToString::to_string).collect(),
            rows: detail
                .iter()
                .map(|r| ExportRow {
                    division: r.division.clone(),
                    capex_type: r.capex_type.clone(),
                    capex_id: r.capex_id,
                    po_no: r.po_no.clone(),
                    po_date: r.po_date.clone(),
                    capex_amount: r.capex_amount,
                    po_line_amount: r.po_line_amount,
                    budget_balance: r.budget_balance,
                })
                .collect(),
        }
    }
}
