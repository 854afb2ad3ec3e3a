//! Source data contract.

use async_trait::async_trait;
use thiserror::Error;

use super::types::SourceTables;

/// Errors raised while fetching the source tables.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Store could not be reached.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    /// A table query failed.
    #[error("Query on {table} failed: {message}")]
    Query {
        /// Table being read.
        table: &'static str,
        /// Driver message.
        message: String,
    },
}

/// Supplier of the six raw relations behind the report.
///
/// A fetch is all-or-nothing: either every table is returned or the call
/// fails, so no render ever sees a partial snapshot.
#[async_trait]
pub trait CapexSource: Send + Sync {
    /// Fetches every source table.
    async fn fetch_tables(&self) -> Result<SourceTables, SourceError>;
}
