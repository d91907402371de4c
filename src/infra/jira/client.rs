//! JIRA REST API client implementation using reqwest.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use super::error::{JiraError, Result};
use super::models::{Myself, RawIssue, SearchPage};

/// Issues requested per search page. JIRA Cloud caps pages at 100.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const SEARCH_FIELDS: &str = "summary,issuetype,status,created,updated";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("jira-tasks/", env!("CARGO_PKG_VERSION"));

/// Issue keys are encoded so they stay a single path segment.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Server URL and basic-auth credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JiraCredentials {
    pub server: String,
    pub username: String,
    pub api_token: String,
}

/// Client handle passed explicitly to everything that talks to JIRA.
#[derive(Clone)]
pub struct JiraClient {
    http: HttpClient,
    credentials: JiraCredentials,
    page_size: u32,
}

impl JiraClient {
    pub fn new(credentials: JiraCredentials) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| JiraError::Client(e.to_string()))?;
        Ok(Self {
            http,
            credentials,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Builds a client and checks the credentials against `/myself`.
    pub async fn connect(credentials: JiraCredentials) -> Result<Self> {
        let client = Self::new(credentials)?;
        let myself = client.verify_credentials().await?;
        info!(
            server = %client.server(),
            user = myself.display_name.as_deref().unwrap_or("unknown"),
            "Connected to JIRA"
        );
        Ok(client)
    }

    #[cfg(test)]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Server base URL exactly as configured.
    pub fn server(&self) -> &str {
        &self.credentials.server
    }

    pub(crate) async fn verify_credentials(&self) -> Result<Myself> {
        self.get_json(self.request_get("myself")).await
    }

    /// Runs a JQL search and returns every matching issue, following pages
    /// until `total` is reached.
    pub async fn search_issues(&self, jql: &str) -> Result<Vec<RawIssue>> {
        let mut issues: Vec<RawIssue> = Vec::new();
        let mut start_at: u32 = 0;

        loop {
            let request = self.request_get("search").query(&[
                ("jql", jql.to_string()),
                ("startAt", start_at.to_string()),
                ("maxResults", self.page_size.to_string()),
                ("fields", SEARCH_FIELDS.to_string()),
            ]);
            let page: SearchPage = self.get_json(request).await?;
            let received = page.issues.len() as u32;
            debug!(start_at = page.start_at, received, total = page.total, "Fetched search page");

            issues.extend(page.issues);
            start_at = start_at.saturating_add(received);

            // An empty page before `total` would otherwise loop forever.
            if received == 0 || start_at >= page.total {
                break;
            }
        }

        Ok(issues)
    }

    /// Looks up a single issue by key.
    pub async fn get_issue(&self, key: &str) -> Result<RawIssue> {
        let request = self
            .request_get(&issue_path(key, "")?)
            .query(&[("fields", "summary")]);
        self.get_json(request).await
    }

    /// Adds a work-log entry such as "1h 30m" to an issue.
    pub async fn add_worklog(&self, key: &str, time_spent: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url(&issue_path(key, "/worklog")?))
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_token))
            .json(&json!({ "timeSpent": time_spent }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/rest/api/2/{}",
            self.credentials.server.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request_get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.url(path))
            .basic_auth(&self.credentials.username, Some(&self.credentials.api_token))
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = ensure_success(request.send().await?).await?;
        response.json::<T>().await.map_err(JiraError::from)
    }
}

/// `issue/{key}{suffix}` with the key percent-encoded.
///
/// Dot-only keys are rejected: URL parsers resolve them (even encoded) as
/// `.`/`..` segments, which would address another endpoint.
fn issue_path(key: &str, suffix: &str) -> Result<String> {
    if key.is_empty() || key.chars().all(|c| c == '.') {
        return Err(JiraError::NotFound(format!("invalid issue key '{key}'")));
    }
    Ok(format!("issue/{}{suffix}", utf8_percent_encode(key, KEY_SEGMENT)))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(JiraError::from_response(status, &body))
}
