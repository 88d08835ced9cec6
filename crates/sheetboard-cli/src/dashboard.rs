//! Command dispatch: the single entry point for every state change.

use chrono::Local;
use sheetboard_core::FilterField;
use sheetboard_sync::RowSource;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// A user or timer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    IssueTypeChanged(Option<String>),
    PriorityChanged(Option<String>),
    StatusChanged(Option<String>),
    ClearFilters,
    /// Run one fetch cycle.
    Tick,
}

impl Command {
    pub fn filter_changed(field: FilterField, value: Option<String>) -> Self {
        match field {
            FilterField::IssueType => Self::IssueTypeChanged(value),
            FilterField::Priority => Self::PriorityChanged(value),
            FilterField::Status => Self::StatusChanged(value),
        }
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FiltersChanged { visible: usize },
    Fetched { total: usize, visible: usize },
    FetchedEmpty,
    FetchFailed { reason: String },
    /// Tick ignored because configuration is invalid.
    FetchBlocked,
}

/// Sink that shows the current state to the user.
pub trait Publisher {
    fn publish(&mut self, state: &AppState) -> anyhow::Result<()>;
}

/// Owns the application state and routes commands to it.
pub struct Dashboard<S, P> {
    state: AppState,
    source: S,
    publisher: P,
}

impl<S: RowSource, P: Publisher> Dashboard<S, P> {
    pub fn new(state: AppState, source: S, publisher: P) -> Self {
        Self {
            state,
            source,
            publisher,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub async fn dispatch(&mut self, cmd: Command) -> Event {
        debug!(command = ?cmd, "dispatching command");

        let event = match cmd {
            Command::IssueTypeChanged(value) => self.change_filter(FilterField::IssueType, value),
            Command::PriorityChanged(value) => self.change_filter(FilterField::Priority, value),
            Command::StatusChanged(value) => self.change_filter(FilterField::Status, value),
            Command::ClearFilters => {
                self.state.clear_filters();
                info!(visible = self.state.filtered().len(), "filters cleared");
                Event::FiltersChanged {
                    visible: self.state.filtered().len(),
                }
            }
            Command::Tick => self.fetch_cycle().await,
        };

        self.publish();
        event
    }

    fn change_filter(&mut self, field: FilterField, value: Option<String>) -> Event {
        self.state.set_filter(field, value);
        let visible = self.state.filtered().len();
        info!(
            field = %field,
            value = self.state.filters().get(field).unwrap_or("(all)"),
            visible,
            "filter changed"
        );
        Event::FiltersChanged { visible }
    }

    async fn fetch_cycle(&mut self) -> Event {
        if self.state.is_blocked() {
            debug!("fetch skipped: configuration invalid");
            return Event::FetchBlocked;
        }

        self.state.begin_fetch();
        self.publish();

        match self.source.fetch_rows().await {
            Ok(rows) => {
                self.state.complete_fetch(&rows, Local::now());
                if self.state.no_data() {
                    info!("sheet returned no rows");
                    Event::FetchedEmpty
                } else {
                    let total = self.state.all().len();
                    let visible = self.state.filtered().len();
                    info!(rows = rows.len(), total, visible, "updates refreshed");
                    Event::Fetched { total, visible }
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch updates");
                self.state.fail_fetch(&e);
                Event::FetchFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn publish(&mut self) {
        if let Err(e) = self.publisher.publish(&self.state) {
            warn!(error = %e, "failed to publish dashboard");
        }
    }
}
