//! Google Sheets values API client.

use std::time::Duration;

use async_trait::async_trait;
use capexview_shared::SheetsConfig;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ExportError;
use super::exporter::{ExportReceipt, SheetExporter};
use super::target::SheetTarget;
use crate::capex::ExportTable;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_rows: usize,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Exporter writing to one Google Sheets worksheet.
///
/// Holds a single HTTP client for the process lifetime. Authentication is a
/// bearer access token issued elsewhere.
#[derive(Debug, Clone)]
pub struct GoogleSheetsExporter {
    http: Client,
    api_base: Url,
    target: SheetTarget,
    access_token: String,
}

impl GoogleSheetsExporter {
    /// Builds an exporter from configuration.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, ExportError> {
        let target = SheetTarget::parse(&config.spreadsheet, &config.worksheet)?;
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| ExportError::InvalidTarget(format!("invalid api_base: {e}")))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base,
            target,
            access_token: config.access_token.clone(),
        })
    }

    /// The worksheet this exporter writes to.
    #[must_use]
    pub fn target(&self) -> &SheetTarget {
        &self.target
    }

    /// A1 range covering the whole worksheet.
    fn sheet_range(&self) -> String {
        format!("'{}'", self.target.worksheet.replace('\'', "''"))
    }

    fn values_url(&self, range_segment: &str) -> Result<Url, ExportError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ExportError::InvalidTarget(self.api_base.to_string()))?
            .pop_if_empty()
            .extend([
                "spreadsheets",
                self.target.spreadsheet_id.as_str(),
                "values",
                range_segment,
            ]);
        Ok(url)
    }

    async fn clear(&self) -> Result<(), ExportError> {
        let url = self.values_url(&format!("{}:clear", self.sheet_range()))?;

        let res = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check_status(res).await?;

        debug!(worksheet = %self.target.worksheet, "Cleared worksheet");
        Ok(())
    }

    async fn write(&self, values: Vec<Vec<String>>) -> Result<usize, ExportError> {
        let range = format!("{}!A1", self.sheet_range());
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");

        let body = ValueRange {
            range: &range,
            major_dimension: "ROWS",
            values,
        };

        let res = self
            .http
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let res = check_status(res).await?;

        // updatedRows is omitted when nothing was written.
        let updated = res.json::<UpdateValuesResponse>().await?;
        Ok(updated.updated_rows)
    }
}

#[async_trait]
impl SheetExporter for GoogleSheetsExporter {
    async fn export(&self, table: &ExportTable) -> Result<ExportReceipt, ExportError> {
        self.clear().await?;
        let rows_written = self.write(table.to_values()).await?;

        info!(
            spreadsheet = %self.target.spreadsheet_id,
            worksheet = %self.target.worksheet,
            rows_written,
            "Worksheet updated"
        );
        Ok(ExportReceipt { rows_written })
    }
}

async fn check_status(res: Response) -> Result<Response, ExportError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res
        .json::<ApiErrorBody>()
        .await
        .map(|body| body.error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(ExportError::Api {
        status: status.as_u16(),
        message,
    })
}
