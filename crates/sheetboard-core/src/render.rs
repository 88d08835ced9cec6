//! HTML rendering for the dashboard page and its update cards.
//!
//! Every piece of record text, including priority and status, passes through
//! [`escape_html`] before it lands in markup.

use std::fmt::Write as _;

use chrono::{DateTime, TimeZone};

use crate::escape::escape_html;
use crate::filter::{FilterField, FilterOptions, FilterSet};
use crate::time::format_time;
use crate::update::UpdateRecord;

pub const NO_RESULTS_TEXT: &str = "No updates found matching your filters.";
pub const NO_DATA_TEXT: &str = "No updates available at the moment.";

/// Severity of a page notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational status line (loading, empty sheet).
    Info,
    /// Error banner (transport failure, misconfiguration).
    Error,
}

/// A status line or error banner shown above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Everything the page needs, borrowed from the application state.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub records: &'a [UpdateRecord],
    pub filters: &'a FilterSet,
    pub options: FilterOptions,
    pub status: Option<&'a Notice>,
    pub banner: Option<&'a Notice>,
    /// Pre-formatted "Last updated: ..." text.
    pub last_updated: Option<String>,
    /// The last fetch returned zero rows.
    pub no_data: bool,
    /// Seconds for the page's `meta refresh`, if any.
    pub reload_secs: Option<u64>,
}

/// CSS class for a priority label.
pub fn priority_class(priority: &str) -> String {
    priority.to_lowercase()
}

/// CSS class for a status label: lowercased, spaces become hyphens.
pub fn status_class(status: &str) -> String {
    status.to_lowercase().replace(' ', "-")
}

/// Render one update card.
pub fn render_card<Tz: TimeZone>(record: &UpdateRecord, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let priority_class = escape_html(&priority_class(&record.priority));
    let status_class = escape_html(&status_class(&record.status));

    format!(
        r#"<div class="update-card {priority_class}">
  <div class="card-header">
    <h2 class="card-title">{title}</h2>
    <span class="priority-badge {priority_class}">{priority}</span>
  </div>
  <div class="card-meta">
    <div class="meta-item"><span class="issue-type-badge">{issue_type}</span></div>
    <div class="meta-item"><span class="status-badge {status_class}">{status}</span></div>
  </div>
  <p class="card-description">{description}</p>
  <div class="card-footer"><div class="timestamp"><span>{time}</span></div></div>
</div>
"#,
        title = escape_html(&record.title),
        priority = escape_html(&record.priority),
        issue_type = escape_html(&record.issue_type),
        status = escape_html(&record.status),
        description = escape_html(&record.description),
        time = escape_html(&format_time(&record.timestamp, now)),
    )
}

/// Render the card grid contents: one card per record, or a single
/// placeholder when there is nothing to show.
pub fn render_grid<Tz: TimeZone>(records: &[UpdateRecord], no_data: bool, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if records.is_empty() {
        let text = if no_data { NO_DATA_TEXT } else { NO_RESULTS_TEXT };
        return format!("<div class=\"empty-state\"><p>{text}</p></div>\n");
    }
    records.iter().map(|r| render_card(r, now)).collect()
}

fn render_select(field: FilterField, options: &FilterOptions, filters: &FilterSet) -> String {
    let active = filters.get(field);
    let mut out = String::new();
    let key = field.key();
    let _ = writeln!(
        out,
        r#"<label class="filter">{label} <select id="{key}Filter" name="{key}" disabled>"#,
        label = field.label(),
    );
    let _ = writeln!(
        out,
        r#"  <option value=""{sel}>All</option>"#,
        sel = if active.is_none() { " selected" } else { "" },
    );
    for value in options.values(field) {
        let sel = if active == Some(value.as_str()) { " selected" } else { "" };
        let value = escape_html(value);
        let _ = writeln!(out, r#"  <option value="{value}"{sel}>{value}</option>"#);
    }
    out.push_str("</select></label>\n");
    out
}

fn render_notice(notice: &Notice) -> String {
    let (class, role) = match notice.kind {
        NoticeKind::Info => ("status-message", "status"),
        NoticeKind::Error => ("error-message", "alert"),
    };
    format!(
        "<div class=\"{class}\" role=\"{role}\">{}</div>\n",
        escape_html(&notice.text)
    )
}

/// Render the full dashboard document.
pub fn render_page<Tz: TimeZone>(view: &PageView<'_>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::with_capacity(4096 + view.records.len() * 512);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(secs) = view.reload_secs {
        let _ = writeln!(out, "<meta http-equiv=\"refresh\" content=\"{secs}\">");
    }
    out.push_str("<title>Updates Dashboard</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<header>\n<h1>Updates Dashboard</h1>\n");
    let _ = writeln!(
        out,
        "<div id=\"lastUpdate\" class=\"last-update\">{}</div>",
        escape_html(view.last_updated.as_deref().unwrap_or(""))
    );
    out.push_str("</header>\n<section class=\"filters\">\n");
    for field in FilterField::ALL {
        out.push_str(&render_select(field, &view.options, view.filters));
    }
    out.push_str("</section>\n");
    if let Some(status) = view.status {
        out.push_str(&render_notice(status));
    }
    if let Some(banner) = view.banner {
        out.push_str(&render_notice(banner));
    }
    out.push_str("<main id=\"updatesGrid\" class=\"updates-grid\">\n");
    out.push_str(&render_grid(view.records, view.no_data, now));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f5f7;color:#1f2328}
header{display:flex;justify-content:space-between;align-items:baseline;padding:1rem 2rem;background:#fff;border-bottom:1px solid #d0d7de}
.filters{display:flex;gap:1rem;padding:1rem 2rem}
.status-message{margin:0 2rem;padding:.5rem 1rem;background:#ddf4ff;border-radius:6px}
.error-message{margin:0 2rem;padding:.5rem 1rem;background:#ffebe9;color:#82071e;border-radius:6px}
.updates-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:1rem;padding:1rem 2rem;overflow-y:auto}
.update-card{background:#fff;border-radius:8px;padding:1rem;border-left:4px solid #8c959f}
.update-card.critical{border-left-color:#cf222e}.update-card.high{border-left-color:#bc4c00}
.update-card.medium{border-left-color:#9a6700}.update-card.low{border-left-color:#1a7f37}
.card-header{display:flex;justify-content:space-between;gap:.5rem}
.card-title{font-size:1.1rem;margin:0}
.priority-badge,.status-badge,.issue-type-badge{font-size:.75rem;padding:.1rem .5rem;border-radius:999px;background:#eaeef2}
.card-meta{display:flex;gap:.5rem;margin:.5rem 0}
.timestamp{font-size:.8rem;color:#656d76}
.empty-state{grid-column:1/-1;text-align:center;color:#656d76}
";
