//! `jt list`: non-interactive issue table on stdout.

use std::fmt::Display;
use std::io::IsTerminal;

use chrono::{DateTime, Local, TimeZone};
use clap::Args;

use super::date::{DateAction, Resolution, resolve_start_date};
use super::error::ViewError;
use super::fetch::IssueSearch;
use super::query::IssueQuery;
use super::report::{IssueReport, load_report};
use super::table::{CellValue, ResultTable, TableView};
use crate::shared::config::{ColumnLayout, ViewerConfig, load_config};
use crate::shared::env_var::JiraEnv;
use crate::shared::progress;
use crate::shared::table::{TextCell, render_table};

const MAX_COLUMN_WIDTH: usize = 60;
const NO_ISSUES: &str = "No issues found.";

#[derive(Args, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Only issues created on or after this date (MM/DD/YYYY)
    #[arg(long, value_name = "MM/DD/YYYY")]
    pub since: Option<String>,

    /// Column layout, overriding `viewer.layout` from the config file
    #[arg(long, value_enum)]
    pub layout: Option<ColumnLayout>,
}

/// Rendered result: warnings for stderr, body for stdout.
#[derive(Debug, PartialEq, Eq)]
struct ListOutput {
    warnings: Vec<String>,
    body: String,
}

#[tokio::main]
pub async fn run(args: &ListArgs) -> anyhow::Result<()> {
    let env = JiraEnv::load()?;
    let config = load_config()?;
    let client = env.connect().await?;

    let spinner = progress::spinner("Fetching issues...");
    let output = list_issues(
        &client,
        &env,
        &config.viewer,
        args,
        &Local::now(),
        std::io::stdout().is_terminal(),
    )
    .await;
    spinner.finish_and_clear();

    let output = output?;
    for warning in &output.warnings {
        eprintln!("{warning}");
    }
    println!("{}", output.body);
    Ok(())
}

async fn list_issues<Tz>(
    client: &impl IssueSearch,
    env: &JiraEnv,
    viewer: &ViewerConfig,
    args: &ListArgs,
    now: &DateTime<Tz>,
    hyperlinks: bool,
) -> Result<ListOutput, ViewError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let input = args.since.as_deref().unwrap_or_default();
    let date = match resolve_start_date(input, DateAction::Submit, now, viewer.lookback_days) {
        Resolution::Resolved { date, .. } => date,
        Resolution::Invalid(e) => return Err(e),
        // Submit never idles or cancels.
        Resolution::Idle | Resolution::Cancelled => return Ok(ListOutput::empty()),
    };

    let query = IssueQuery::new(date).with_project(env.project_key.clone());
    let layout = args.layout.unwrap_or(viewer.layout);
    let report = load_report(client, &env.server, Some(&query), layout, &now.timezone()).await;
    if let IssueReport::FetchFailed(warning) = report {
        return Err(ViewError::FetchFailed(warning));
    }

    Ok(ListOutput::from_report(&report, hyperlinks))
}

impl ListOutput {
    fn empty() -> Self {
        Self {
            warnings: Vec::new(),
            body: NO_ISSUES.to_string(),
        }
    }

    fn from_report(report: &IssueReport, hyperlinks: bool) -> Self {
        let body = match report.view() {
            Some(TableView::Table(table)) => render_result_table(table, hyperlinks),
            Some(TableView::NoIssues) | None => NO_ISSUES.to_string(),
        };
        Self {
            warnings: report.warnings().into_iter().map(str::to_string).collect(),
            body,
        }
    }
}

fn render_result_table(table: &ResultTable, hyperlinks: bool) -> String {
    let rows: Vec<Vec<TextCell>> = table
        .rows()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    CellValue::Text(text) => TextCell::plain(text),
                    CellValue::Link { text, url } => TextCell::link(text, url),
                })
                .collect()
        })
        .collect();
    render_table(&table.headers(), &rows, MAX_COLUMN_WIDTH, hyperlinks)
}
