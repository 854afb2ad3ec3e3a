//! Capex report routes.
//!
//! The client owns the persisted filter parameters: every response carries
//! the `query_params` it must write back into its URL.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{AppState, error::ApiError};
use capexview_core::capex::{
    AggregatedRow, DetailColumn, ExportOutcome, FilterContext, FilterResolution, FilterSource,
    PersistedFilters, RenderedReport, Totals,
};
use capexview_shared::AppError;
use capexview_shared::types::{format_amount, format_count};

/// Creates the capex report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/capex/report", get(get_report))
        .route("/capex/export", post(export_report))
        .route("/capex/refresh", post(refresh_snapshot))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters shared by the report and export routes.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Persisted company filter.
    pub company: Option<String>,
    /// Persisted division filter.
    pub division: Option<String>,
    /// Company dropdown selection made this cycle.
    pub company_select: Option<String>,
    /// Division dropdown selection made this cycle.
    pub division_select: Option<String>,
    /// Summary table row click (row index). Empty means no click.
    pub row: Option<String>,
}

impl TryFrom<ReportQuery> for FilterContext {
    type Error = ApiError;

    fn try_from(q: ReportQuery) -> Result<Self, Self::Error> {
        let row_click = match q.row.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                AppError::Validation(format!("row must be a summary row index, got '{raw}'"))
            })?),
        };

        Ok(Self {
            row_click,
            company_dropdown: q.company_select,
            division_dropdown: q.division_select,
            persisted: PersistedFilters {
                company: q.company,
                division: q.division,
            },
        })
    }
}

/// Resolved filter as shown above the tables.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    /// Effective value, possibly "All ...".
    pub selected: String,
    /// Input that decided the value.
    pub source: FilterSource,
    /// Provenance message.
    pub message: String,
    /// Dropdown options.
    pub options: Vec<String>,
}

/// Amount cards, formatted for display.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Total capex amount.
    pub capex_amount: String,
    /// Total PO amount.
    pub po_line_amount: String,
    /// Total budget balance.
    pub budget_balance: String,
}

impl From<Totals> for TotalsResponse {
    fn from(t: Totals) -> Self {
        Self {
            capex_amount: format_amount(t.capex_amount),
            po_line_amount: format_amount(t.po_line_amount),
            budget_balance: format_amount(t.budget_balance),
        }
    }
}

/// Summary-by-division row.
#[derive(Debug, Serialize)]
pub struct SummaryRowResponse {
    /// Row index, sent back as `row` to drill into the division.
    pub row: usize,
    /// Division name.
    pub division: String,
    /// Division totals.
    #[serde(flatten)]
    pub totals: TotalsResponse,
}

/// Metric cards over the detail table.
#[derive(Debug, Serialize)]
pub struct DetailMetricsResponse {
    /// Distinct capex items.
    pub capex_items: String,
    /// Detail totals.
    #[serde(flatten)]
    pub totals: TotalsResponse,
}

/// Detail row with plain two-decimal amounts.
#[derive(Debug, Serialize)]
pub struct DetailRowResponse {
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
    pub capex_amount: String,
    /// PO line amount.
    pub po_line_amount: String,
    /// Budget balance.
    pub budget_balance: String,
}

impl From<AggregatedRow> for DetailRowResponse {
    fn from(r: AggregatedRow) -> Self {
        Self {
            division: r.division,
            capex_type: r.capex_type,
            capex_id: r.capex_id,
            po_no: r.po_no,
            po_date: r.po_date,
            capex_amount: plain_amount(r.capex_amount),
            po_line_amount: plain_amount(r.po_line_amount),
            budget_balance: plain_amount(r.budget_balance),
        }
    }
}

/// Snapshot provenance.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    /// When the source tables were fetched.
    pub fetched_at: DateTime<Utc>,
    /// Whether the snapshot came from the cache.
    pub cached: bool,
}

/// The rendered report page.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    /// Company filter.
    pub company: FilterResponse,
    /// Division filter.
    pub division: FilterResponse,
    /// Company-level metric cards.
    pub totals: TotalsResponse,
    /// Summary by division.
    pub summary: Vec<SummaryRowResponse>,
    /// Detail metric cards.
    pub detail_metrics: DetailMetricsResponse,
    /// Detail grid columns.
    pub columns: Vec<DetailColumn>,
    /// Detail rows.
    pub detail: Vec<DetailRowResponse>,
    /// Snapshot provenance.
    pub snapshot: SnapshotResponse,
}

/// Response for the report route.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// The rendered view.
    pub view: ViewResponse,
    /// Parameters the client persists for the next request.
    pub query_params: PersistedFilters,
}

/// Response for the export route.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Export outcome.
    pub export: ExportOutcome,
    /// The rendered view that was exported.
    pub view: ViewResponse,
    /// Parameters the client persists for the next request.
    pub query_params: PersistedFilters,
}

/// Response for the refresh route.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Always `"refreshed"`.
    pub status: &'static str,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Formats a Decimal as a plain string with 2 decimal places.
fn plain_amount(amount: Decimal) -> String {
    format!("{amount:.2}")
}

fn filter_response(resolution: FilterResolution, options: Vec<String>) -> FilterResponse {
    FilterResponse {
        selected: resolution.effective,
        source: resolution.source,
        message: resolution.message,
        options,
    }
}

fn into_response_parts(report: RenderedReport) -> (ViewResponse, PersistedFilters) {
    let RenderedReport {
        view,
        next,
        fetched_at,
        cached,
    } = report;

    let view = ViewResponse {
        company: filter_response(view.company, view.company_options),
        division: filter_response(view.division, view.division_options),
        totals: view.grand_totals.into(),
        summary: view
            .summary
            .into_iter()
            .enumerate()
            .map(|(row, s)| SummaryRowResponse {
                row,
                division: s.division,
                totals: s.totals.into(),
            })
            .collect(),
        detail_metrics: DetailMetricsResponse {
            capex_items: format_count(view.detail_metrics.capex_items),
            totals: view.detail_metrics.totals.into(),
        },
        columns: view.columns,
        detail: view.detail.into_iter().map(Into::into).collect(),
        snapshot: SnapshotResponse { fetched_at, cached },
    };

    (view, next.persisted)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /capex/report
async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, ApiError> {
    let context = FilterContext::try_from(query)?;
    let report = state.reports.render(&context).await?;

    debug!(
        company = %report.view.company.effective,
        division = %report.view.division.effective,
        rows = report.view.detail.len(),
        "Rendered capex report"
    );

    let (view, query_params) = into_response_parts(report);
    Ok(Json(ReportResponse { view, query_params }))
}

/// POST /capex/export
///
/// Export failures are reported in the body with status 200.
async fn export_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ExportResponse>, ApiError> {
    let context = FilterContext::try_from(query)?;
    let (report, export) = state
        .reports
        .export(&context, state.exporter.as_deref())
        .await?;

    let (view, query_params) = into_response_parts(report);
    Ok(Json(ExportResponse {
        export,
        view,
        query_params,
    }))
}

/// POST /capex/refresh
async fn refresh_snapshot(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.reports.refresh().await;
    info!("Capex snapshot refresh requested");

    Json(RefreshResponse {
        status: "refreshed",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use capexview_core::capex::{
        CapexBudgetType, CapexItem, CapexSource, Company, Division, ExportTable, PoLineItem,
        PurchaseOrder, ReportService, SnapshotCache, SourceError, SourceTables,
    };
    use capexview_core::export::{ExportError, ExportReceipt, SheetExporter};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct FixtureSource;

    #[async_trait]
    impl CapexSource for FixtureSource {
        async fn fetch_tables(&self) -> Result<SourceTables, SourceError> {
            Ok(SourceTables {
                capex_items: vec![
                    CapexItem {
                        capex_id: 1,
                        division_id: Some(10),
                        budget_type_id: Some(1),
                        quantity: Some(dec!(10)),
                        unit_cost: Some(dec!(1500)),
                    },
                    CapexItem {
                        capex_id: 2,
                        division_id: Some(20),
                        budget_type_id: None,
                        quantity: Some(dec!(1)),
                        unit_cost: Some(dec!(800)),
                    },
                    CapexItem {
                        capex_id: 3,
                        division_id: Some(30),
                        budget_type_id: Some(1),
                        quantity: Some(dec!(2)),
                        unit_cost: Some(dec!(100)),
                    },
                ],
                purchase_orders: vec![PurchaseOrder {
                    po_id: 7,
                    po_no: Some("PO-7".to_string()),
                    po_date: NaiveDate::from_ymd_opt(2025, 5, 20),
                }],
                po_lines: vec![PoLineItem {
                    id: 1,
                    po_id: Some(7),
                    expense_id: Some(1),
                    quantity: Some(dec!(4)),
                    unit_price: Some(dec!(1000)),
                }],
                divisions: vec![
                    Division {
                        id: 10,
                        name: Some("Engineering".to_string()),
                        company_id: Some(1),
                    },
                    Division {
                        id: 20,
                        name: Some("Finance".to_string()),
                        company_id: Some(1),
                    },
                    Division {
                        id: 30,
                        name: Some("Operations".to_string()),
                        company_id: Some(2),
                    },
                ],
                budget_types: vec![CapexBudgetType {
                    id: 1,
                    name: Some("Machinery".to_string()),
                }],
                companies: vec![
                    Company {
                        id: 1,
                        name: Some("Acme".to_string()),
                    },
                    Company {
                        id: 2,
                        name: Some("Globex".to_string()),
                    },
                ],
            })
        }
    }

    struct DownSource;

    #[async_trait]
    impl CapexSource for DownSource {
        async fn fetch_tables(&self) -> Result<SourceTables, SourceError> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct CountingExporter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SheetExporter for CountingExporter {
        async fn export(&self, table: &ExportTable) -> Result<ExportReceipt, ExportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExportReceipt {
                rows_written: table.rows.len() + 1,
            })
        }
    }

    fn state(
        source: Arc<dyn CapexSource>,
        exporter: Option<Arc<dyn SheetExporter>>,
    ) -> AppState {
        AppState {
            reports: Arc::new(ReportService::new(source, SnapshotCache::default())),
            exporter,
        }
    }

    async fn send(state: AppState, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_report_default_view() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "GET",
            "/api/v1/capex/report",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let view = &json["view"];
        assert_eq!(view["company"]["selected"], "All Companies");
        assert_eq!(view["company"]["message"], "Showing data for all companies.");
        assert_eq!(view["totals"]["capex_amount"], "16,000.00");
        assert_eq!(view["totals"]["po_line_amount"], "4,000.00");
        assert_eq!(view["totals"]["budget_balance"], "12,000.00");
        assert_eq!(view["detail"].as_array().unwrap().len(), 3);
        assert_eq!(view["detail_metrics"]["capex_items"], "3");
        assert_eq!(json["query_params"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_report_restores_persisted_filters() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "GET",
            "/api/v1/capex/report?company=Acme&division=Engineering",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let view = &json["view"];
        assert_eq!(view["company"]["source"], "persisted");
        assert_eq!(
            view["division"]["message"],
            "Showing details for: **Engineering** (restored from saved link)."
        );
        assert_eq!(
            view["division"]["options"],
            serde_json::json!(["All Divisions", "Engineering", "Finance"])
        );
        assert_eq!(view["detail"][0]["capex_amount"], "15000.00");
        assert_eq!(view["detail"][0]["po_no"], "PO-7");
        assert_eq!(view["detail"][0]["po_date"], "2025-05-20");
        assert_eq!(json["query_params"]["company"], "Acme");
        assert_eq!(json["query_params"]["division"], "Engineering");
    }

    #[tokio::test]
    async fn test_row_click_drills_into_division() {
        let (_, json) = send(
            state(Arc::new(FixtureSource), None),
            "GET",
            "/api/v1/capex/report?company=Acme&division_select=All%20Divisions&row=1",
        )
        .await;

        let view = &json["view"];
        assert_eq!(view["summary"][1]["division"], "Finance");
        assert_eq!(view["division"]["selected"], "Finance");
        assert_eq!(view["division"]["source"], "row_click");
        assert_eq!(json["query_params"]["division"], "Finance");
    }

    #[tokio::test]
    async fn test_invalid_row_is_bad_request() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "GET",
            "/api/v1/capex/report?row=first",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(
            json["message"],
            "Validation error: row must be a summary row index, got 'first'"
        );
    }

    #[tokio::test]
    async fn test_empty_row_means_no_click() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "GET",
            "/api/v1/capex/report?company=Acme&division=Engineering&row=",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["view"]["division"]["selected"], "Engineering");
        assert_eq!(json["view"]["division"]["source"], "persisted");
    }

    #[tokio::test]
    async fn test_source_failure_is_500() {
        let (status, json) = send(
            state(Arc::new(DownSource), None),
            "GET",
            "/api/v1/capex/report",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_export_without_configuration_reports_failure() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "POST",
            "/api/v1/capex/export?company=Globex",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["export"]["status"], "failed");
        assert_eq!(json["export"]["message"], "Spreadsheet export is not configured");
        assert_eq!(json["view"]["detail"].as_array().unwrap().len(), 1);
        assert_eq!(json["query_params"]["company"], "Globex");
    }

    #[tokio::test]
    async fn test_export_with_exporter() {
        let exporter = Arc::new(CountingExporter::default());
        let (status, json) = send(
            state(Arc::new(FixtureSource), Some(exporter.clone())),
            "POST",
            "/api/v1/capex/export?company=Acme",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["export"]["status"], "success");
        assert_eq!(json["export"]["message"], "Google Sheet updated successfully!");
        assert_eq!(json["export"]["rows_written"], 3);
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh() {
        let (status, json) = send(
            state(Arc::new(FixtureSource), None),
            "POST",
            "/api/v1/capex/refresh",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "refreshed");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = send(
            state(Arc::new(DownSource), None),
            "GET",
            "/api/v1/health",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["export_configured"], false);
    }
}
