//! JIRA REST API client module using reqwest.
//!
//! Provides `JiraClient` for issue search, issue lookup and work-log creation,
//! authenticated with basic auth (username + API token).

mod client;
pub(crate) mod error;
#[cfg(test)]
mod mock;
mod models;

pub use client::{JiraClient, JiraCredentials};
pub use error::JiraError;
#[cfg(test)]
pub use mock::{JiraMockServer, issue_json, issue_json_with};
pub use models::{NamedField, RawFields, RawIssue};
