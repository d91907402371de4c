//! JQL construction for "my open issues since a date".

use std::fmt;

use chrono::NaiveDate;

/// Status excluded from the results.
pub const EXCLUDED_STATUS: &str = "Done";

/// Field used both for the date boundary and for ordering.
pub const DATE_FIELD: &str = "created";

/// Issues assigned to the authenticated user, created on or after
/// `min_created`, not in `EXCLUDED_STATUS`, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    min_created: NaiveDate,
    project: Option<String>,
}

impl IssueQuery {
    pub fn new(min_created: NaiveDate) -> Self {
        Self {
            min_created,
            project: None,
        }
    }

    /// Restricts the query to one project key (from `JIRA_PROJECT_KEY`).
    pub fn with_project(mut self, project: Option<String>) -> Self {
        self.project = project;
        self
    }

    pub fn to_jql(&self) -> String {
        let mut clauses = Vec::with_capacity(4);
        if let Some(project) = &self.project {
            clauses.push(format!("project = {}", quote(project)));
        }
        clauses.push("assignee = currentUser()".to_string());
        clauses.push(format!(
            "{DATE_FIELD} >= \"{}\"",
            self.min_created.format("%Y-%m-%d")
        ));
        clauses.push(format!("status != {}", quote(EXCLUDED_STATUS)));

        format!("{} ORDER BY {DATE_FIELD} ASC", clauses.join(" AND "))
    }
}

impl fmt::Display for IssueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_jql())
    }
}

/// Double-quotes a JQL string literal.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
