use chrono::{DateTime, Local};
use sheetboard_core::render::NO_DATA_TEXT;
use sheetboard_core::{
    FilterField, FilterOptions, FilterSet, Notice, PageView, UpdateRecord, format_clock,
    parse_rows, sort_by_priority,
};
use sheetboard_sync::{Row, SyncError};

use crate::config::ConfigError;

pub const LOADING_TEXT: &str = "Loading updates...";

/// Where the fetch state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
}

/// Main application state.
///
/// All fields are private. The full list and the filtered view only change
/// together, through the methods below.
#[derive(Debug)]
pub struct AppState {
    /// Every record from the last successful fetch, priority-sorted.
    all: Vec<UpdateRecord>,

    /// `all` narrowed by `filters`.
    filtered: Vec<UpdateRecord>,

    filters: FilterSet,

    phase: FetchPhase,

    /// Informational line (loading, empty sheet).
    status: Option<Notice>,

    /// Error banner (transport failure, misconfiguration).
    banner: Option<Notice>,

    last_updated: Option<DateTime<Local>>,

    /// The last successful fetch returned zero rows.
    no_data: bool,

    /// Startup validation failed; fetching is disabled for good.
    blocked: bool,
}

impl AppState {
    pub fn new(filters: FilterSet) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            filters,
            phase: FetchPhase::Idle,
            status: None,
            banner: None,
            last_updated: None,
            no_data: false,
            blocked: false,
        }
    }

    pub fn all(&self) -> &[UpdateRecord] {
        &self.all
    }

    pub fn filtered(&self) -> &[UpdateRecord] {
        &self.filtered
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    pub fn banner(&self) -> Option<&Notice> {
        self.banner.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn no_data(&self) -> bool {
        self.no_data
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_filter(&mut self, field: FilterField, value: Option<String>) {
        self.filters.set(field, value);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Idle → Loading. Clears any banner and shows the loading status.
    pub fn begin_fetch(&mut self) {
        self.phase = FetchPhase::Loading;
        self.banner = None;
        self.status = Some(Notice::info(LOADING_TEXT));
    }

    /// Loading → Idle on success. Replaces the full list wholesale.
    pub fn complete_fetch(&mut self, rows: &[Row], now: DateTime<Local>) {
        self.phase = FetchPhase::Idle;
        self.last_updated = Some(now);

        if rows.is_empty() {
            self.all.clear();
            self.filtered.clear();
            self.no_data = true;
            self.status = Some(Notice::info(NO_DATA_TEXT));
            return;
        }

        let mut records = parse_rows(rows);
        sort_by_priority(&mut records);
        self.all = records;
        self.no_data = false;
        self.status = None;
        self.refilter();
    }

    /// Loading → Idle on failure. Records and filters stay as they were.
    pub fn fail_fetch(&mut self, err: &SyncError) {
        self.phase = FetchPhase::Idle;
        self.status = None;
        self.banner = Some(Notice::error(format!("Failed to fetch updates: {err}")));
    }

    /// Disable fetching and pin the configuration error as the banner.
    pub fn block(&mut self, err: &ConfigError) {
        self.blocked = true;
        self.status = None;
        self.banner = Some(Notice::error(err.to_string()));
    }

    /// Borrowed projection for the page renderer.
    pub fn page_view(&self, reload_secs: Option<u64>) -> PageView<'_> {
        PageView {
            records: &self.filtered,
            filters: &self.filters,
            options: FilterOptions::observe(&self.all, &self.filters),
            status: self.status.as_ref(),
            banner: self.banner.as_ref(),
            last_updated: self
                .last_updated
                .map(|t| format!("Last updated: {}", format_clock(&t))),
            no_data: self.no_data,
            reload_secs,
        }
    }

    fn refilter(&mut self) {
        self.filtered = self.filters.apply(&self.all);
    }
}
