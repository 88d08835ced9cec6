//! Vertical card display for update records on the terminal.
//!
//! Mirrors the HTML grid: banner and status first, then one card per
//! visible record in priority order.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use sheetboard_core::render::{NO_DATA_TEXT, NO_RESULTS_TEXT};
use sheetboard_core::{FilterField, NoticeKind, UpdateRecord, format_clock, format_time};

use crate::state::AppState;

const MAX_DESCRIPTION_CHARS: usize = 160;

// ── Public API ──

/// Print the current dashboard state to stdout.
pub fn print_dashboard(state: &AppState, now: &DateTime<Local>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_dashboard(&mut out, state, now)?;
    out.flush()
}

/// Write the dashboard listing to any writer.
pub fn write_dashboard(
    out: &mut impl Write,
    state: &AppState,
    now: &DateTime<Local>,
) -> io::Result<()> {
    write_header(out, state)?;

    let records = state.filtered();
    if records.is_empty() {
        let text = if state.no_data() { NO_DATA_TEXT } else { NO_RESULTS_TEXT };
        writeln!(out, "  {text}")?;
        return writeln!(out);
    }

    for record in records {
        write_card(out, record, now)?;
    }
    Ok(())
}

// ── Sections ──

fn write_header(out: &mut impl Write, state: &AppState) -> io::Result<()> {
    let updated = state
        .last_updated()
        .map(|t| format_clock(&t))
        .unwrap_or_else(|| "never".to_string());
    writeln!(
        out,
        "── Updates: {} of {} shown · last updated {} ──",
        state.filtered().len(),
        state.all().len(),
        updated
    )?;

    let active: Vec<String> = FilterField::ALL
        .iter()
        .filter_map(|&f| state.filters().get(f).map(|v| format!("{f}={v}")))
        .collect();
    if !active.is_empty() {
        writeln!(out, "   filters: {}", active.join(", "))?;
    }

    for notice in [state.status(), state.banner()].into_iter().flatten() {
        let tag = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Error => "error",
        };
        writeln!(out, "   [{tag}] {}", notice.text)?;
    }
    writeln!(out)
}

fn write_card(out: &mut impl Write, record: &UpdateRecord, now: &DateTime<Local>) -> io::Result<()> {
    writeln!(out, "=== {} ===", record.title)?;
    writeln!(out, "  {:<12} {}", "priority", record.priority)?;
    writeln!(out, "  {:<12} {}", "type", record.issue_type)?;
    writeln!(out, "  {:<12} {}", "status", record.status)?;
    writeln!(out, "  {:<12} {}", "when", format_time(&record.timestamp, now))?;
    if !record.description.is_empty() {
        writeln!(out, "  {}", truncate(&record.description, MAX_DESCRIPTION_CHARS))?;
    }
    writeln!(out)
}

// ── Helpers ──

/// Cut to `max` chars, marking the cut with "...".
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
