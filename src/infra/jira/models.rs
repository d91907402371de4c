//! Wire models for the JIRA REST API v2.
//!
//! Nested issue fields are all optional: a missing field must reach the
//! formatter as `None` instead of failing the whole search page.

use serde::Deserialize;

/// One issue as returned by search or issue lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Option<RawFields>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(default)]
    pub status: Option<NamedField>,
    /// e.g. "2024-01-15T10:30:00.000+0000"
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// Objects like `issuetype` and `status` where only the name is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedField {
    #[serde(default)]
    pub name: Option<String>,
}

/// One page of `GET /rest/api/2/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

/// Response of `GET /rest/api/2/myself`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Myself {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_issue_with_all_fields() {
        let issue: RawIssue = serde_json::from_value(json!({
            "key": "ABC-1",
            "fields": {
                "summary": "Fix login",
                "issuetype": {"name": "Bug"},
                "status": {"name": "In Progress"},
                "created": "2024-01-15T10:30:00.000+0000",
                "updated": "2024-01-16T08:00:00.000+0000"
            }
        }))
        .unwrap();

        let fields = issue.fields.unwrap();
        assert_eq!(fields.summary.as_deref(), Some("Fix login"));
        assert_eq!(fields.issuetype.unwrap().name.as_deref(), Some("Bug"));
        assert_eq!(fields.status.unwrap().name.as_deref(), Some("In Progress"));
    }

    #[test]
    fn raw_issue_tolerates_missing_and_null_fields() {
        let issue: RawIssue = serde_json::from_value(json!({
            "key": "ABC-2",
            "fields": {"summary": null, "status": {}}
        }))
        .unwrap();

        let fields = issue.fields.unwrap();
        assert_eq!(fields.summary, None);
        assert_eq!(fields.issuetype, None);
        assert_eq!(fields.status, Some(NamedField { name: None }));
    }

    #[test]
    fn search_page_defaults_when_issues_absent() {
        let page: SearchPage = serde_json::from_value(json!({"total": 0})).unwrap();
        assert_eq!(page.start_at, 0);
        assert!(page.issues.is_empty());
    }
}
