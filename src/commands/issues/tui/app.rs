use chrono::{DateTime, NaiveDate, TimeZone};
use ratatui::widgets::TableState;
use tracing::info;

use crate::commands::issues::date::{DateAction, Resolution, resolve_start_date};
use crate::commands::issues::report::IssueReport;
use crate::commands::issues::table::TableView;
use crate::shared::config::{ColumnLayout, ViewerConfig};

/// What the viewer currently shows below the date field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for a date, optionally with an inline error.
    Idle { error: Option<String> },
    Results(IssueReport),
    /// Terminal state; nothing is fetched after this.
    Cancelled,
}

/// Side effect requested by a key press, carried out by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Fetch(NaiveDate),
    OpenLink(String),
}

/// Application state for the TUI.
pub struct App {
    /// Text of the start-date field.
    pub input: String,
    pub screen: Screen,
    /// Selected row in the result table.
    pub table_state: TableState,
    pub should_quit: bool,
    pub layout: ColumnLayout,
    pub lookback_days: u32,
    /// One-line status such as a failed browser launch (cleared on next key).
    pub status: Option<String>,
}

impl App {
    pub fn new(viewer: &ViewerConfig, layout: Option<ColumnLayout>) -> Self {
        Self {
            input: String::new(),
            screen: Screen::Idle { error: None },
            table_state: TableState::default(),
            should_quit: false,
            layout: layout.unwrap_or(viewer.layout),
            lookback_days: viewer.lookback_days,
            status: None,
        }
    }

    pub fn has_results(&self) -> bool {
        matches!(self.screen, Screen::Results(_))
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Resolves the date field for `action`. Returns the fetch to perform, if any.
    pub fn resolve<Tz: TimeZone>(
        &mut self,
        action: DateAction,
        now: &DateTime<Tz>,
    ) -> Option<AppAction> {
        match resolve_start_date(&self.input, action, now, self.lookback_days) {
            Resolution::Resolved { date, source } => {
                info!(%date, ?source, "Start date resolved");
                Some(AppAction::Fetch(date))
            }
            Resolution::Invalid(e) => {
                self.screen = Screen::Idle {
                    error: Some(e.to_string()),
                };
                None
            }
            Resolution::Idle => None,
            Resolution::Cancelled => {
                self.cancel();
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.screen = Screen::Cancelled;
        self.should_quit = true;
    }

    /// Clears the output and starts a new resolution cycle. The date text is kept.
    pub fn reset(&mut self) {
        self.screen = Screen::Idle { error: None };
        self.table_state = TableState::default();
    }

    pub fn show_report(&mut self, report: IssueReport) {
        let has_rows = matches!(report.view(), Some(TableView::Table(_)));
        self.table_state = TableState::default().with_selected(has_rows.then_some(0));
        self.screen = Screen::Results(report);
    }

    fn row_count(&self) -> usize {
        match &self.screen {
            Screen::Results(report) => match report.view() {
                Some(TableView::Table(table)) => table.records().len(),
                _ => 0,
            },
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.row_count() == 0 {
            return;
        }
        let previous = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(previous));
    }

    /// Link of the highlighted row.
    pub fn selected_link(&self) -> Option<&str> {
        let Screen::Results(report) = &self.screen else {
            return None;
        };
        let Some(TableView::Table(table)) = report.view() else {
            return None;
        };
        let index = self.table_state.selected()?;
        table.records().get(index).map(|r| r.link.as_str())
    }
}
