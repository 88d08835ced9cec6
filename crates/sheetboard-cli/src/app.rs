use std::path::PathBuf;

use clap::Parser;
use sheetboard_sync::http::DEFAULT_BASE_URL;

/// Poll a spreadsheet of team updates and render them as a filterable card dashboard.
///
/// While running, stdin accepts `type <v>`, `priority <v>`, `status <v>`
/// (omit the value to unset), `clear`, `refresh`, `help` and `quit`.
#[derive(Debug, Parser)]
#[command(name = "sheetboard", version)]
pub struct Cli {
    /// Spreadsheet identifier (the long id in the sheet URL).
    #[arg(long, env = "SHEETBOARD_SHEET_ID", default_value = "")]
    pub sheet_id: String,

    /// API key with read access to the sheet.
    #[arg(long, env = "SHEETBOARD_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// A1 range holding the update rows, header excluded.
    #[arg(long, env = "SHEETBOARD_RANGE", default_value = "Sheet1!A2:G1000")]
    pub range: String,

    /// Poll interval in milliseconds.
    #[arg(long, env = "SHEETBOARD_REFRESH_MS", default_value_t = 30_000)]
    pub refresh_ms: u64,

    /// API root, overridable for proxies.
    #[arg(long, env = "SHEETBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where the rendered HTML page is written.
    #[arg(long, short, env = "SHEETBOARD_OUTPUT", default_value = "dashboard.html")]
    pub output: PathBuf,

    /// Initial issue type filter.
    #[arg(long)]
    pub issue_type: Option<String>,

    /// Initial priority filter.
    #[arg(long)]
    pub priority: Option<String>,

    /// Initial status filter.
    #[arg(long)]
    pub status: Option<String>,

    /// Run a single fetch cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// With --once, print the filtered records as JSON instead of cards.
    #[arg(long, requires = "once")]
    pub json: bool,

    /// Only log errors.
    #[arg(long, short)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["sheetboard", "--sheet-id", "abc", "--api-key", "k"]).unwrap();
        assert_eq!(cli.range, "Sheet1!A2:G1000");
        assert_eq!(cli.refresh_ms, 30_000);
        assert_eq!(cli.base_url, "https://sheets.googleapis.com");
        assert_eq!(cli.output, PathBuf::from("dashboard.html"));
        assert!(cli.issue_type.is_none());
        assert!(!cli.once);
    }

    #[test]
    fn json_requires_once() {
        assert!(Cli::try_parse_from(["sheetboard", "--json"]).is_err());
        let cli = Cli::try_parse_from(["sheetboard", "--once", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn initial_filters() {
        let cli = Cli::try_parse_from([
            "sheetboard",
            "--issue-type",
            "Bug",
            "--priority",
            "High",
            "--status",
            "In Progress",
        ])
        .unwrap();
        assert_eq!(cli.issue_type.as_deref(), Some("Bug"));
        assert_eq!(cli.priority.as_deref(), Some("High"));
        assert_eq!(cli.status.as_deref(), Some("In Progress"));
    }
}
