//! Publishing: rendered HTML page on disk plus the terminal listing.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use sheetboard_core::render_page;
use tracing::debug;

use crate::dashboard::Publisher;
use crate::display;
use crate::state::{AppState, FetchPhase};

pub struct HtmlPublisher {
    output: PathBuf,
    reload_secs: Option<u64>,
    terminal: bool,
}

impl HtmlPublisher {
    pub fn new(output: PathBuf, reload_secs: Option<u64>) -> Self {
        Self {
            output,
            reload_secs,
            terminal: true,
        }
    }

    /// Skip the stdout card listing.
    pub fn without_terminal(mut self) -> Self {
        self.terminal = false;
        self
    }
}

impl Publisher for HtmlPublisher {
    fn publish(&mut self, state: &AppState) -> anyhow::Result<()> {
        let now = Local::now();
        let html = render_page(&state.page_view(self.reload_secs), &now);
        write_atomic(&self.output, html.as_bytes())
            .with_context(|| format!("writing {}", self.output.display()))?;
        debug!(path = %self.output.display(), bytes = html.len(), "dashboard page written");

        // The loading state is page-only; the terminal gets the settled result.
        if self.terminal && state.phase() == FetchPhase::Idle {
            display::print_dashboard(state, &now).context("printing dashboard")?;
        }
        Ok(())
    }
}

/// Replace `path` so readers see either the old page or the new one.
fn write_atomic(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::sample_rows;
    use sheetboard_core::{FilterField, FilterSet};
    use sheetboard_sync::SyncError;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(FilterSet::default());
        state.complete_fetch(&sample_rows(), Local::now());
        state
    }

    #[test]
    fn writes_page_with_cards() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        let mut publisher = HtmlPublisher::new(path.clone(), Some(30)).without_terminal();

        publisher.publish(&loaded_state()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"content="30""#));
        assert_eq!(html.matches("class=\"update-card ").count(), 2);
        assert!(html.contains("Last updated: "));
    }

    #[test]
    fn overwrites_previous_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        let mut publisher = HtmlPublisher::new(path.clone(), None).without_terminal();

        let mut state = loaded_state();
        publisher.publish(&state).unwrap();
        state.set_filter(FilterField::Priority, Some("Low".into()));
        state.fail_fetch(&SyncError::Other("offline".into()));
        publisher.publish(&state).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("class=\"update-card ").count(), 1);
        assert!(html.contains("Failed to fetch updates: offline"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("dashboard.html");
        let mut publisher = HtmlPublisher::new(path, None).without_terminal();
        let err = publisher.publish(&loaded_state()).unwrap_err();
        assert!(err.to_string().contains("writing"));
    }
}
