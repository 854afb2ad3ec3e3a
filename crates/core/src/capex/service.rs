//! Report service: snapshot, aggregate, render, export.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::aggregation::AggregationEngine;
use super::cache::SnapshotCache;
use super::filter::FilterContext;
use super::render::{DashboardRenderer, DashboardView};
use super::source::{CapexSource, SourceError};
use super::summary::SummaryRollup;
use crate::export::SheetExporter;

/// Message shown after a successful export.
pub const EXPORT_SUCCESS_MESSAGE: &str = "Google Sheet updated successfully!";

/// Message shown when no exporter is configured.
pub const EXPORT_NOT_CONFIGURED_MESSAGE: &str = "Spreadsheet export is not configured";

/// A rendered cycle.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// The page view.
    pub view: DashboardView,
    /// Filter context for the next cycle.
    pub next: FilterContext,
    /// When the underlying snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Whether the snapshot came from the cache.
    pub cached: bool,
}

/// Export result status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    /// The worksheet was rewritten.
    Success,
    /// The export failed; worksheet state is unknown.
    Failed,
}

/// Outcome of an export action, reported rather than raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Status.
    pub status: ExportStatus,
    /// Human-readable message.
    pub message: String,
    /// Rows written, header included.
    pub rows_written: usize,
}

impl ExportOutcome {
    /// Failed outcome with the given message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ExportStatus::Failed,
            message: message.into(),
            rows_written: 0,
        }
    }

    /// Outcome when no exporter is wired.
    #[must_use]
    pub fn not_configured() -> Self {
        Self::failed(EXPORT_NOT_CONFIGURED_MESSAGE)
    }
}

/// Report orchestration over a source and its snapshot cache.
pub struct ReportService {
    source: Arc<dyn CapexSource>,
    cache: SnapshotCache,
}

impl ReportService {
    /// Creates a service.
    #[must_use]
    pub fn new(source: Arc<dyn CapexSource>, cache: SnapshotCache) -> Self {
        Self { source, cache }
    }

    /// Renders one cycle for the given filter inputs.
    ///
    /// # Errors
    ///
    /// Returns the source error when the snapshot cannot be fetched. No
    /// partial view is produced.
    pub async fn render(&self, context: &FilterContext) -> Result<RenderedReport, SourceError> {
        let snapshot = self.cache.get_or_fetch(self.source.as_ref()).await?;
        let rows = AggregationEngine::aggregate(&snapshot.tables);
        let (view, next) = DashboardRenderer::render(&rows, context);

        Ok(RenderedReport {
            view,
            next,
            fetched_at: snapshot.fetched_at,
            cached: snapshot.cached,
        })
    }

    /// Renders, then pushes the detail table to the exporter.
    ///
    /// Export failures are folded into the outcome; only a failed source
    /// fetch is an error.
    ///
    /// # Errors
    ///
    /// Returns the source error when the snapshot cannot be fetched.
    pub async fn export(
        &self,
        context: &FilterContext,
        exporter: Option<&dyn SheetExporter>,
    ) -> Result<(RenderedReport, ExportOutcome), SourceError> {
        let report = self.render(context).await?;

        let Some(exporter) = exporter else {
            warn!("Export requested without a configured spreadsheet");
            return Ok((report, ExportOutcome::not_configured()));
        };

        let table = SummaryRollup::export_projection(&report.view.detail);
        let outcome = match exporter.export(&table).await {
            Ok(receipt) => {
                info!(
                    rows = receipt.rows_written,
                    company = %report.view.company.effective,
                    division = %report.view.division.effective,
                    "Exported detail table"
                );
                ExportOutcome {
                    status: ExportStatus::Success,
                    message: EXPORT_SUCCESS_MESSAGE.to_string(),
                    rows_written: receipt.rows_written,
                }
            }
            Err(e) => {
                warn!(error = %e, "Export failed");
                ExportOutcome::failed(format!("Failed to update Google Sheet: {e}"))
            }
        };

        Ok((report, outcome))
    }

    /// Drops the cached snapshot.
    pub async fn refresh(&self) {
        self.cache.invalidate().await;
        info!("Snapshot cache invalidated");
    }
}
