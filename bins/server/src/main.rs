//! CapexView API Server
//!
//! Main entry point for the capex report service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use capexview_api::{AppState, create_router};
use capexview_core::capex::{ReportService, SnapshotCache};
use capexview_core::export::{GoogleSheetsExporter, SheetExporter};
use capexview_db::{CapexRepository, connect};
use capexview_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capexview=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    // Report pipeline over the cached source snapshot
    let source = Arc::new(CapexRepository::new(db));
    let cache = SnapshotCache::new(config.cache.ttl_secs);
    let reports = Arc::new(ReportService::new(source, cache));
    info!(ttl_secs = config.cache.ttl_secs, "Snapshot cache configured");

    // Spreadsheet exporter, built once for the process lifetime
    let exporter: Option<Arc<dyn SheetExporter>> = match &config.sheets {
        Some(sheets) => {
            let exporter = GoogleSheetsExporter::from_config(sheets)
                .context("Invalid spreadsheet export configuration")?;
            info!(
                spreadsheet = %exporter.target().spreadsheet_id,
                worksheet = %exporter.target().worksheet,
                "Spreadsheet export configured"
            );
            Some(Arc::new(exporter))
        }
        None => {
            warn!("No spreadsheet configured; export is disabled");
            None
        }
    };

    // Create application state
    let state = AppState { reports, exporter };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
