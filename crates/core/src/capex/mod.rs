//! CAPEX budget versus PO spend reporting.
//!
//! This module provides the report pipeline:
//! - Joining the six source relations into reconciled rows
//! - Company/division filter reconciliation
//! - Division roll-up, grand totals and the export projection
//! - The render cycle and the source snapshot cache

pub mod aggregation;
pub mod cache;
pub mod filter;
pub mod render;
pub mod service;
pub mod source;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;


pub use aggregation::AggregationEngine;
pub use cache::{Clock, Snapshot, SnapshotCache, SystemClock};
pub use filter::{
    FilterContext, FilterDimension, FilterResolution, FilterResolver, FilterSource,
    PersistedFilters,
};
pub use render::{DashboardRenderer, DashboardView, DetailColumn};
pub use service::{ExportOutcome, ExportStatus, RenderedReport, ReportService};
pub use source::{CapexSource, SourceError};
pub use summary::{
    DetailMetrics, DivisionSummary, EXPORT_COLUMNS, ExportRow, ExportTable, SummaryRollup, Totals,
};
pub use types::*;
