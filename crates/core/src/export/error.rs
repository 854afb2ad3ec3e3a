//! Export error types.

use thiserror::Error;

/// Errors that can occur while exporting to a spreadsheet.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Spreadsheet URL or ID could not be parsed.
    #[error("Invalid spreadsheet target: {0}")]
    InvalidTarget(String),

    /// The spreadsheet API rejected the request.
    #[error("Spreadsheet API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Request never completed.
    #[error("Spreadsheet request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
