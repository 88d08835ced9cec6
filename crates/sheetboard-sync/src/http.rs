//! HTTP client for the Google Sheets v4 `values` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

use crate::error::SyncError;
use crate::source::{Row, RowSource};
use crate::values::ValueRange;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Where to read from and with which key.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// API root, e.g. `https://sheets.googleapis.com` (no trailing slash needed).
    pub base_url: String,
    pub sheet_id: String,
    /// A1 range such as `Sheet1!A2:G1000`.
    pub range: String,
    pub api_key: String,
    /// Upper bound on one request, connect through body.
    pub timeout: Duration,
}

/// Read-only client for one spreadsheet range.
pub struct SheetsClient {
    client: reqwest::Client,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(mut config: SheetsConfig) -> Result<Self, SyncError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SyncError::transport)?;
        Ok(Self { client, config })
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}?key={key}` with each path
    /// segment percent-encoded.
    pub fn values_url(&self) -> Result<Url, SyncError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| SyncError::Other(format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SyncError::Other(format!("base URL cannot carry a path: {}", self.config.base_url)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.config.sheet_id.as_str(),
                "values",
                self.config.range.as_str(),
            ]);
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }

    /// Fetch and decode the configured range.
    pub async fn fetch_value_range(&self) -> Result<ValueRange, SyncError> {
        let url = self.values_url()?;

        info!(sheet_id = %self.config.sheet_id, range = %self.config.range, "fetching sheet values");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SyncError::transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "sheet API returned an error");
            return Err(SyncError::Server {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let body = resp.text().await.map_err(SyncError::transport)?;
        ValueRange::from_json(&body)
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    async fn fetch_rows(&self) -> Result<Vec<Row>, SyncError> {
        let rows = self.fetch_value_range().await?.into_rows();
        info!(count = rows.len(), "fetched sheet rows");
        Ok(rows)
    }
}
