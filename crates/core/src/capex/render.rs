//! One render cycle: rows plus filter inputs in, view plus next inputs out.

use serde::{Deserialize, Serialize};

use super::filter::{FilterContext, FilterDimension, FilterResolution, FilterResolver};
use super::summary::{DetailMetrics, DivisionSummary, EXPORT_COLUMNS, SummaryRollup, Totals};
use super::types::AggregatedRow;

/// Grid column descriptor for the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailColumn {
    /// Row field name.
    pub field: String,
    /// Whether the grid offers a text filter on this column.
    pub filterable: bool,
    /// Whether the column holds amounts.
    pub numeric: bool,
    /// Decimal places shown for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl DetailColumn {
    /// Descriptors for every detail column, in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        EXPORT_COLUMNS
            .iter()
            .map(|field| {
                let numeric = matches!(
                    *field,
                    "capex_amount" | "po_line_amount" | "budget_balance"
                );
                Self {
                    field: (*field).to_string(),
                    filterable: matches!(*field, "division" | "capex_type" | "capex_id" | "po_no"),
                    numeric,
                    precision: numeric.then_some(2),
                }
            })
            .collect()
    }
}

/// Everything the presentation layer needs for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Resolved company filter.
    pub company: FilterResolution,
    /// Company dropdown options, sentinel first.
    pub company_options: Vec<String>,
    /// Resolved division filter.
    pub division: FilterResolution,
    /// Division dropdown options for the selected company, sentinel first.
    pub division_options: Vec<String>,
    /// Totals over the company-filtered rows.
    pub grand_totals: Totals,
    /// Summary by division.
    pub summary: Vec<DivisionSummary>,
    /// Metric cards over the detail rows.
    pub detail_metrics: DetailMetrics,
    /// Detail rows after both filters.
    pub detail: Vec<AggregatedRow>,
    /// Detail grid columns.
    pub columns: Vec<DetailColumn>,
}

/// Render pipeline over aggregated rows.
pub struct DashboardRenderer;

impl DashboardRenderer {
    /// Renders one cycle and returns the context for the next one.
    ///
    /// The company filter is resolved first because the division options
    /// depend on it. A row click refers to a row of the summary table built
    /// in this same cycle; an index past its end is ignored.
    #[must_use]
    pub fn render(rows: &[AggregatedRow], context: &FilterContext) -> (DashboardView, FilterContext) {
        let company_options = FilterResolver::options(
            FilterDimension::Company,
            rows.iter().map(|r| r.company_name.as_str()),
        );
        let company = FilterResolver::resolve_company(
            &company_options,
            context.company_dropdown.as_deref(),
            context.persisted.company.as_deref(),
        );

        let company_rows = SummaryRollup::filter_company(rows, company.filter_value());
        let summary = SummaryRollup::by_division(&company_rows);
        let grand_totals = SummaryRollup::grand_totals(&company_rows);

        let division_options = FilterResolver::options(
            FilterDimension::Division,
            company_rows.iter().map(|r| r.division.as_str()),
        );
        let clicked = context
            .row_click
            .and_then(|index| summary.get(index))
            .map(|s| s.division.as_str());
        let division = FilterResolver::resolve_division(
            &division_options,
            clicked,
            context.division_dropdown.as_deref(),
            context.persisted.division.as_deref(),
        );

        let detail = SummaryRollup::detail(&company_rows, division.filter_value());
        let detail_metrics = SummaryRollup::detail_metrics(&detail);
        let next = FilterContext::next(&company, &division);

        let view = DashboardView {
            company,
            company_options,
            division,
            division_options,
            grand_totals,
            summary,
            detail_metrics,
            detail,
            columns: DetailColumn::all(),
        };

        (view, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capex::aggregation::AggregationEngine;
    use crate::capex::filter::{FilterSource, PersistedFilters};
    use crate::capex::fixtures::standard_tables;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<AggregatedRow> {
        AggregationEngine::aggregate(&standard_tables())
    }

    #[test]
    fn test_default_render_shows_everything() {
        let (view, next) = DashboardRenderer::render(&rows(), &FilterContext::default());

        assert_eq!(
            view.company_options,
            vec!["All Companies", "Acme", "Globex", "No Company"]
        );
        assert_eq!(view.company.source, FilterSource::Default);
        assert_eq!(view.division.message, "Showing details for all divisions.");
        assert_eq!(view.detail.len(), 5);
        assert_eq!(view.grand_totals.capex_amount, dec!(2650));
        assert_eq!(view.grand_totals.budget_balance, dec!(1830));
        assert_eq!(next, FilterContext::default());
    }

    #[test]
    fn test_company_scopes_division_options() {
        let context = FilterContext::from_persisted(PersistedFilters {
            company: Some("Acme".to_string()),
            division: None,
        });

        let (view, next) = DashboardRenderer::render(&rows(), &context);

        assert_eq!(view.company.source, FilterSource::Persisted);
        assert_eq!(
            view.division_options,
            vec!["All Divisions", "Engineering", "Finance"]
        );
        assert_eq!(view.grand_totals.capex_amount, dec!(1800));
        assert_eq!(next.persisted.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_row_click_maps_to_summary_division() {
        let context = FilterContext {
            row_click: Some(1),
            company_dropdown: Some("Acme".to_string()),
            division_dropdown: Some("All Divisions".to_string()),
            persisted: PersistedFilters::default(),
        };

        let (view, next) = DashboardRenderer::render(&rows(), &context);

        assert_eq!(view.division.effective, "Finance");
        assert_eq!(view.division.source, FilterSource::RowClick);
        assert_eq!(view.detail.len(), 1);
        assert_eq!(view.detail_metrics.capex_items, 1);
        // Grand totals stay at company scope.
        assert_eq!(view.grand_totals.capex_amount, dec!(1800));

        assert_eq!(next.row_click, None);
        assert_eq!(next.persisted.division.as_deref(), Some("Finance"));

        let (again, _) = DashboardRenderer::render(&rows(), &next);
        assert_eq!(again.division.source, FilterSource::Persisted);
        assert_eq!(again.detail, view.detail);
    }

    #[test]
    fn test_out_of_range_row_click_ignored() {
        let context = FilterContext {
            row_click: Some(42),
            ..FilterContext::default()
        };

        let (view, _) = DashboardRenderer::render(&rows(), &context);

        assert_eq!(view.division.source, FilterSource::Default);
        assert_eq!(view.detail.len(), 5);
    }

    #[test]
    fn test_stale_division_after_company_change() {
        let context = FilterContext {
            company_dropdown: Some("Globex".to_string()),
            persisted: PersistedFilters {
                company: Some("Acme".to_string()),
                division: Some("Finance".to_string()),
            },
            ..FilterContext::default()
        };

        let (view, next) = DashboardRenderer::render(&rows(), &context);

        assert_eq!(view.company.effective, "Globex");
        assert_eq!(view.division.effective, "All Divisions");
        assert_eq!(next.persisted.division, None);
        assert_eq!(view.detail.len(), 1);
    }

    #[test]
    fn test_columns() {
        let columns = DetailColumn::all();

        assert_eq!(columns.len(), 8);
        assert!(columns[0].filterable && !columns[0].numeric);
        assert!(!columns[4].filterable);
        assert_eq!(columns[5].precision, Some(2));
        assert!(columns[7].numeric && !columns[7].filterable);
    }

    #[test]
    fn test_empty_rows() {
        let (view, _) = DashboardRenderer::render(&[], &FilterContext::default());

        assert_eq!(view.company_options, vec!["All Companies"]);
        assert_eq!(view.division_options, vec!["All Divisions"]);
        assert!(view.summary.is_empty());
        assert_eq!(view.grand_totals, Totals::default());
    }
}
