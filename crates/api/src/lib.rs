//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The capex report, export and refresh routes
//! - Health check
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use axum::Router;
use capexview_core::capex::ReportService;
use capexview_core::export::SheetExporter;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report pipeline over the cached source snapshot.
    pub reports: Arc<ReportService>,
    /// Spreadsheet exporter; export is disabled when absent.
    pub exporter: Option<Arc<dyn SheetExporter>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
