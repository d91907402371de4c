//! Centralized reader for JIRA_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `JiraEnv` struct.

use std::path::PathBuf;

use super::config::ConfigError;
use crate::infra::jira::{JiraClient, JiraCredentials};

const SERVER: &str = "JIRA_SERVER";
const USERNAME: &str = "JIRA_USERNAME";
const API_TOKEN: &str = "JIRA_API_TOKEN";
const PROJECT_KEY: &str = "JIRA_PROJECT_KEY";

/// Snapshot of the JIRA_* environment variables at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraEnv {
    /// Base URL, e.g. "https://example.atlassian.net".
    pub server: String,

    pub username: String,

    pub api_token: String,

    /// When set, the issue query is limited to this project.
    pub project_key: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    non_empty_var(name).ok_or(ConfigError::MissingEnvVar(name))
}

impl JiraEnv {
    /// Read the JIRA_* variables from the current process.
    /// Call `load_dotenv` first to pick up a `.env` file.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            server: required_var(SERVER)?,
            username: required_var(USERNAME)?,
            api_token: required_var(API_TOKEN)?,
            project_key: non_empty_var(PROJECT_KEY),
        })
    }

    pub fn credentials(&self) -> JiraCredentials {
        JiraCredentials {
            server: self.server.clone(),
            username: self.username.clone(),
            api_token: self.api_token.clone(),
        }
    }

    /// Builds a client and verifies the credentials. Any failure is fatal
    /// for the caller, so it is reported as a configuration problem.
    pub async fn connect(&self) -> Result<JiraClient, ConfigError> {
        JiraClient::connect(self.credentials())
            .await
            .map_err(|e| ConfigError::Connection(e.connection_message()))
    }
}

/// Loads `.env` from the working directory (or a parent) into the process
/// environment. Variables already set take precedence.
///
/// Runs before logging is set up so `.env` can carry `JT_LOG`; the caller
/// logs the returned path.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}
