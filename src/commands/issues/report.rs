//! Fetch → format → assemble, shared by the viewer and `jt list`.

use std::fmt::Display;

use chrono::TimeZone;
use tracing::warn;

use super::fetch::{FetchOutcome, IssueSearch, fetch_issues};
use super::format::format_issue;
use super::query::IssueQuery;
use super::table::{TableView, assemble};
use crate::shared::config::ColumnLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueReport {
    /// No query was run.
    NotRequested,
    /// The search itself failed; carries the user-facing warning.
    FetchFailed(String),
    Loaded {
        view: TableView,
        /// One line per record dropped by the formatter.
        warnings: Vec<String>,
    },
}

impl IssueReport {
    /// Warnings to show next to the result.
    pub fn warnings(&self) -> Vec<&str> {
        match self {
            Self::NotRequested => Vec::new(),
            Self::FetchFailed(message) => vec![message.as_str()],
            Self::Loaded { warnings, .. } => warnings.iter().map(String::as_str).collect(),
        }
    }

    /// Table to display. `None` unless the search actually ran to completion,
    /// so a failed fetch never reads as "no issues".
    pub fn view(&self) -> Option<&TableView> {
        match self {
            Self::NotRequested | Self::FetchFailed(_) => None,
            Self::Loaded { view, .. } => Some(view),
        }
    }
}

pub async fn load_report<Tz>(
    client: &impl IssueSearch,
    server: &str,
    query: Option<&IssueQuery>,
    layout: ColumnLayout,
    tz: &Tz,
) -> IssueReport
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let outcome = fetch_issues(client, query).await;
    if matches!(outcome, FetchOutcome::NotRequested) {
        return IssueReport::NotRequested;
    }
    if let Some(warning) = outcome.warning() {
        return IssueReport::FetchFailed(warning);
    }
    let issues = outcome.into_issues();

    let mut warnings = Vec::new();
    let outputs = issues.iter().map(|issue| {
        let result = format_issue(issue, server, tz);
        if let Err(e) = &result {
            warn!(issue_key = e.key(), error = %e, "Skipping malformed issue");
            warnings.push(format!("Skipping {}: {e}", e.key()));
        }
        result
    });
    let view = assemble(outputs, layout);

    IssueReport::Loaded { view, warnings }
}
