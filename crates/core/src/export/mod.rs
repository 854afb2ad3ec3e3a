//! Spreadsheet export of the filtered detail table.
//!
//! The export overwrites one worksheet: the sheet is cleared, then the
//! header and data rows are written from `A1`. The two calls are not
//! atomic; a failure between them leaves the sheet empty.

pub mod error;
pub mod exporter;
pub mod sheets;
pub mod target;

pub use error::ExportError;
pub use exporter::{ExportReceipt, SheetExporter};
pub use sheets::GoogleSheetsExporter;
pub use target::SheetTarget;
