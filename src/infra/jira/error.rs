//! JIRA API error types.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Incorrect username or API token (HTTP 401)")]
    Unauthorized,

    #[error("Forbidden, check your permissions (HTTP 403)")]
    Forbidden,

    #[error("Not found (HTTP 404){}", format_details(.0))]
    NotFound(String),

    #[error("JIRA API error (HTTP {}){}", .status.as_u16(), format_details(.message))]
    Http { status: StatusCode, message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode JIRA response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, JiraError>;

impl JiraError {
    /// Maps a non-success response into an error, using the JIRA error body for detail.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = format_error_body(body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound(message),
            _ => Self::Http { status, message },
        }
    }

    /// Message shown when authenticating against the server fails at startup.
    pub fn connection_message(&self) -> String {
        match self {
            Self::Unauthorized => "Authentication failed: Incorrect username or API token".into(),
            Self::Forbidden => "Authentication failed: Forbidden, check your permissions".into(),
            Self::NotFound(_) => "Authentication failed: JIRA server URL not found".into(),
            other => format!("Authentication failed: {other}"),
        }
    }
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Client(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

fn format_details(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

/// Flattens a JIRA error body into one line.
///
/// JIRA answers with `{"errorMessages": [...], "errors": {"field": "msg"}}`;
/// anything else is returned trimmed as-is.
fn format_error_body(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let mut parts: Vec<String> = value
        .get("errorMessages")
        .and_then(|v| v.as_array())
        .map(|messages| {
            messages
                .iter()
                .filter_map(|m| m.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(errors) = value.get("errors").and_then(|v| v.as_object()) {
        parts.extend(
            errors
                .iter()
                .filter_map(|(field, msg)| msg.as_str().map(|m| format!("{field}: {m}"))),
        );
    }

    parts.join(", ")
}
