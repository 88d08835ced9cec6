//! Runtime configuration and the startup validation gate.

use std::path::PathBuf;
use std::time::Duration;

use sheetboard_core::FilterSet;
use sheetboard_sync::SheetsConfig;
use thiserror::Error;

use crate::app::Cli;

/// Values shipped in sample configs that must be replaced before use.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";
pub const PLACEHOLDER_SHEET_ID: &str = "YOUR_SHEET_ID_HERE";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key not configured. Pass --api-key or set SHEETBOARD_API_KEY")]
    MissingApiKey,

    #[error("Google Sheet ID not configured. Pass --sheet-id or set SHEETBOARD_SHEET_ID")]
    MissingSheetId,

    #[error("refresh interval must be greater than zero")]
    ZeroRefreshInterval,
}

/// Upper bound on one sheet request. Shorter refresh intervals lower it
/// to the interval.
const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub sheet_id: String,
    pub api_key: String,
    pub range: String,
    pub base_url: String,
    pub refresh: Duration,
    pub output: PathBuf,
    pub initial_filters: FilterSet,
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            sheet_id: cli.sheet_id.trim().to_string(),
            api_key: cli.api_key.trim().to_string(),
            range: cli.range.clone(),
            base_url: cli.base_url.clone(),
            refresh: Duration::from_millis(cli.refresh_ms),
            output: cli.output.clone(),
            initial_filters: FilterSet {
                issue_type: cli.issue_type.clone().filter(|v| !v.is_empty()),
                priority: cli.priority.clone().filter(|v| !v.is_empty()),
                status: cli.status.clone().filter(|v| !v.is_empty()),
            },
        }
    }
}

impl DashboardConfig {
    /// Check the credential and identifier before any request goes out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::MissingApiKey);
        }
        if self.sheet_id.is_empty() || self.sheet_id == PLACEHOLDER_SHEET_ID {
            return Err(ConfigError::MissingSheetId);
        }
        if self.refresh.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    pub fn sheets_config(&self) -> SheetsConfig {
        SheetsConfig {
            base_url: self.base_url.clone(),
            sheet_id: self.sheet_id.clone(),
            range: self.range.clone(),
            api_key: self.api_key.clone(),
            timeout: self.refresh.min(MAX_REQUEST_TIMEOUT),
        }
    }

    /// Page auto-reload period, at least one second.
    pub fn reload_secs(&self) -> u64 {
        self.refresh.as_secs().max(1)
    }
}
