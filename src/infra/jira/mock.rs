//! wiremock-based JIRA mock server for testing.
//!
//! Provides `JiraMockServer` for HTTP-level mocking of the JIRA REST API v2.
//!
//! ```ignore
//! let mock = JiraMockServer::start().await;
//! mock.myself("Jane Doe").await;
//! mock.search(vec![issue_json("ABC-1", "Summary")]).await;
//! mock.worklog_created("ABC-1", "1h 30m").await;
//! let client = mock.client();
//! ```

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::{JiraClient, JiraCredentials};

/// Create a mock issue JSON object with every displayed field populated.
pub fn issue_json(key: &str, summary: &str) -> serde_json::Value {
    issue_json_with(
        key,
        summary,
        "To Do",
        "2024-01-15T10:30:00.000+0000",
        "2024-01-16T08:00:00.000+0000",
    )
}

pub fn issue_json_with(
    key: &str,
    summary: &str,
    status: &str,
    created: &str,
    updated: &str,
) -> serde_json::Value {
    json!({
        "id": "10001",
        "key": key,
        "self": format!("https://example.atlassian.net/rest/api/2/issue/{key}"),
        "fields": {
            "summary": summary,
            "issuetype": {"name": "Task"},
            "status": {"name": status},
            "created": created,
            "updated": updated
        }
    })
}

fn search_page(issues: &[serde_json::Value], start_at: usize, total: usize) -> serde_json::Value {
    json!({
        "expand": "names,schema",
        "startAt": start_at,
        "maxResults": issues.len(),
        "total": total,
        "issues": issues
    })
}

/// wiremock-based JIRA mock server for testing.
pub struct JiraMockServer {
    server: MockServer,
}

impl JiraMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn credentials(&self) -> JiraCredentials {
        JiraCredentials {
            server: self.server.uri(),
            username: "jane@example.com".to_string(),
            api_token: "test-token".to_string(),
        }
    }

    /// Get a JiraClient configured to use this mock server.
    pub fn client(&self) -> JiraClient {
        JiraClient::new(self.credentials()).unwrap()
    }

    /// Mock GET /myself for a valid login.
    pub async fn myself(&self, display_name: &str) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/myself"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accountId": "5b10a2844c20165700ede21g",
                "displayName": display_name,
                "active": true
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /myself answering with the given status.
    pub async fn myself_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/myself"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock a search that returns all issues in a single page.
    pub async fn search(&self, issues: Vec<serde_json::Value>) {
        let total = issues.len();
        self.search_with_total(issues, total).await;
    }

    /// Mock a search page claiming `total` matches regardless of the page content.
    pub async fn search_with_total(&self, issues: Vec<serde_json::Value>, total: usize) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&issues, 0, total)))
            .mount(&self.server)
            .await;
    }

    /// Mock a search split into pages of `page_size`, matched on `startAt`.
    pub async fn search_paged(&self, issues: Vec<serde_json::Value>, page_size: usize) {
        let total = issues.len();
        for (index, chunk) in issues.chunks(page_size).enumerate() {
            let start_at = index * page_size;
            Mock::given(method("GET"))
                .and(path("/rest/api/2/search"))
                .and(query_param("startAt", start_at.to_string()))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(search_page(chunk, start_at, total)),
                )
                .mount(&self.server)
                .await;
        }
    }

    /// Mock a failing search.
    pub async fn search_error(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /issue/{key} for an existing issue.
    pub async fn issue(&self, key: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/rest/api/2/issue/{key}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue_json(key, "Existing")))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /issue/{key} returning 404.
    pub async fn issue_not_found(&self, key: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/rest/api/2/issue/{key}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errorMessages": ["Issue does not exist or you do not have permission to see it."],
                "errors": {}
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock POST /issue/{key}/worklog succeeding.
    pub async fn worklog_created(&self, key: &str, time_spent: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/rest/api/2/issue/{key}/worklog")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "100028",
                "timeSpent": time_spent
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock POST /issue/{key}/worklog failing with the given status.
    pub async fn worklog_error(&self, key: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/rest/api/2/issue/{key}/worklog")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "errorMessages": ["You do not have the permission to log work."],
                "errors": {}
            })))
            .mount(&self.server)
            .await;
    }

    /// Paths of all requests received so far, as sent on the wire.
    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }

    /// JQL strings of all search requests received so far.
    pub async fn received_jql(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/rest/api/2/search")
            .filter_map(|r| {
                r.url
                    .query_pairs()
                    .find(|(name, _)| name == "jql")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }

    /// `timeSpent` values of all work-log requests received so far.
    pub async fn received_worklogs(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().ends_with("/worklog"))
            .filter_map(|r| serde_json::from_slice::<serde_json::Value>(&r.body).ok())
            .filter_map(|body| body["timeSpent"].as_str().map(str::to_string))
            .collect()
    }
}
