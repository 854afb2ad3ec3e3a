//! Export adapter contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ExportError;
use crate::capex::ExportTable;

/// Acknowledgement of a completed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    /// Rows written, header included.
    pub rows_written: usize,
}

/// Destination for the exported detail table.
#[async_trait]
pub trait SheetExporter: Send + Sync {
    /// Replaces the destination's contents with `table`.
    async fn export(&self, table: &ExportTable) -> Result<ExportReceipt, ExportError>;
}
