//! The update record shown on each dashboard card.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_ISSUE_TYPE: &str = "Other";
pub const DEFAULT_PRIORITY: &str = "Low";
pub const DEFAULT_STATUS: &str = "Open";

/// One parsed update entry derived from a single sheet row.
///
/// Records carry no identity; every fetch builds a fresh list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    /// Raw date-like string as it appears in the sheet.
    pub timestamp: String,
    pub title: String,
    pub description: String,
    pub issue_type: String,
    pub priority: String,
    pub status: String,
}

impl Default for UpdateRecord {
    fn default() -> Self {
        Self {
            timestamp: String::new(),
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}
