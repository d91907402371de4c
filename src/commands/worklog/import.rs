//! Bulk work-log import.
//!
//! Rows are processed one at a time in file order. A failed row is reported
//! and skipped; nothing is retried.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Args;
use indicatif::ProgressBar;
use serde::Deserialize;
use tracing::{info, warn};

use super::error::{Result, WorklogError};
use crate::infra::jira::{JiraClient, JiraError, RawIssue};
use crate::shared::env_var::JiraEnv;
use crate::shared::progress;

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,
}

/// One CSV row. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorklogRow {
    #[serde(rename = "Key")]
    pub key: String,

    /// Seconds.
    #[serde(rename = "Time Spent")]
    pub time_spent: u64,
}

/// Issue lookup and work-log creation.
pub trait WorklogApi {
    async fn get_issue(&self, key: &str) -> std::result::Result<RawIssue, JiraError>;

    async fn add_worklog(&self, key: &str, time_spent: &str) -> std::result::Result<(), JiraError>;
}

impl WorklogApi for JiraClient {
    async fn get_issue(&self, key: &str) -> std::result::Result<RawIssue, JiraError> {
        JiraClient::get_issue(self, key).await
    }

    async fn add_worklog(&self, key: &str, time_spent: &str) -> std::result::Result<(), JiraError> {
        JiraClient::add_worklog(self, key, time_spent).await
    }
}

#[derive(Debug)]
pub enum RowOutcome {
    Updated { key: String, time_spent: String },
    NotFound { key: String },
    Failed { key: String, error: JiraError },
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated { key, time_spent } => write!(f, "Updated {key} to {time_spent}."),
            Self::NotFound { key } => write!(
                f,
                "Issue {key} not found or you don't have permission to view it."
            ),
            Self::Failed { key, error } => write!(f, "Failed to update {key}: {error}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub outcomes: Vec<RowOutcome>,
}

impl ImportSummary {
    pub fn updated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.updated()
    }

    /// `Err` when any row did not go through.
    pub fn into_result(self) -> Result<()> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(WorklogError::IncompleteImport {
                failed,
                total: self.outcomes.len(),
            }),
        }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Updated {} issue(s), {} failed.",
            self.updated(),
            self.failed()
        )
    }
}

#[tokio::main]
pub async fn run(args: &ImportArgs) -> anyhow::Result<()> {
    let env = JiraEnv::load()?;
    let rows = read_rows(&args.file)?;
    let client = env.connect().await?;

    let bar = progress::bar(rows.len() as u64, "Updating work logs");
    let summary = import_rows(&client, &rows, &bar).await;
    bar.finish_and_clear();

    println!("{summary}");
    summary.into_result()?;
    Ok(())
}

/// Reads the whole file up front. Any malformed row aborts before the first update.
pub fn read_rows(path: &Path) -> Result<Vec<WorklogRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| WorklogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<WorklogRow>, _>>()
        .map_err(|source| WorklogError::InvalidRow {
            path: path.to_path_buf(),
            source,
        })
}

/// Converts seconds into a JIRA duration, dropping leftover seconds.
pub fn format_time_spent(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}

pub async fn import_rows(
    api: &impl WorklogApi,
    rows: &[WorklogRow],
    progress: &ProgressBar,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for row in rows {
        let outcome = update_row(api, row).await;
        if outcome.is_success() {
            info!(issue_key = %row.key, "{outcome}");
        } else {
            warn!(issue_key = %row.key, "{outcome}");
        }
        progress.suspend(|| println!("{outcome}"));
        progress.inc(1);
        summary.outcomes.push(outcome);
    }

    summary
}

async fn update_row(api: &impl WorklogApi, row: &WorklogRow) -> RowOutcome {
    let key = row.key.clone();
    let time_spent = format_time_spent(row.time_spent);

    let result = match api.get_issue(&key).await {
        Ok(_) => api.add_worklog(&key, &time_spent).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => RowOutcome::Updated { key, time_spent },
        Err(JiraError::NotFound(_)) => RowOutcome::NotFound { key },
        Err(error) => RowOutcome::Failed { key, error },
    }
}
