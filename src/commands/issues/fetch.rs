//! Issue search with an outcome that keeps "no matches" and "failed" apart.

use tracing::{error, info};

use super::query::IssueQuery;
use crate::infra::jira::{JiraClient, JiraError, RawIssue};

/// Search seam between the pipeline and the JIRA client.
pub trait IssueSearch {
    /// Returns every issue matching `jql`, in server order.
    async fn search_issues(&self, jql: &str) -> Result<Vec<RawIssue>, JiraError>;
}

impl IssueSearch for JiraClient {
    async fn search_issues(&self, jql: &str) -> Result<Vec<RawIssue>, JiraError> {
        JiraClient::search_issues(self, jql).await
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// No start date was resolved; the API was not called.
    NotRequested,
    /// Search succeeded, possibly with zero matches.
    Matches(Vec<RawIssue>),
    Failed(JiraError),
}

impl FetchOutcome {
    /// Degraded view where failures read as an empty result.
    pub fn into_issues(self) -> Vec<RawIssue> {
        match self {
            Self::Matches(issues) => issues,
            Self::NotRequested | Self::Failed(_) => Vec::new(),
        }
    }

    /// User-facing warning for a failed fetch.
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Failed(e) => Some(format!("JIRA error fetching issues: {e}")),
            _ => None,
        }
    }
}

/// Runs `query` once. Errors are logged and returned as `Failed`; nothing is retried.
pub async fn fetch_issues(client: &impl IssueSearch, query: Option<&IssueQuery>) -> FetchOutcome {
    let Some(query) = query else {
        return FetchOutcome::NotRequested;
    };

    let jql = query.to_jql();
    match client.search_issues(&jql).await {
        Ok(issues) => {
            info!(count = issues.len(), jql = %jql, "Fetched issues");
            FetchOutcome::Matches(issues)
        }
        Err(e) => {
            error!(error = %e, jql = %jql, "JIRA error fetching issues");
            FetchOutcome::Failed(e)
        }
    }
}
