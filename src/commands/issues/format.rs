//! Maps raw JIRA issues into flat display records.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeZone};
use thiserror::Error;

use crate::infra::jira::{NamedField, RawIssue};

/// Timestamp format of `created`/`updated`, e.g. "2024-01-15T10:30:00.000+0000".
const SOURCE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One table row. Every field is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub key: String,
    pub summary: String,
    pub issue_type: String,
    pub status: String,
    /// `{server}/browse/{key}`
    pub link: String,
    /// Source value of `created`, kept for ordering.
    pub created_at: DateTime<FixedOffset>,
    pub created_local: String,
    pub updated_local: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Missing field in issue {key}: {field}")]
    MissingField { key: String, field: &'static str },

    #[error("Unparseable {field} timestamp in issue {key}: '{value}'")]
    InvalidTimestamp {
        key: String,
        field: &'static str,
        value: String,
    },
}

impl FormatError {
    pub fn key(&self) -> &str {
        match self {
            Self::MissingField { key, .. } | Self::InvalidTimestamp { key, .. } => key,
        }
    }
}

/// Formats one issue, converting timestamps into `tz`.
///
/// The link is plain concatenation of `server` and the key, without validation.
pub fn format_issue<Tz>(
    issue: &RawIssue,
    server: &str,
    tz: &Tz,
) -> Result<DisplayRecord, FormatError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let key = issue.key.as_str();
    let missing = |field: &'static str| FormatError::MissingField {
        key: key.to_string(),
        field,
    };

    let fields = issue.fields.as_ref().ok_or_else(|| missing("fields"))?;
    let summary = fields.summary.clone().ok_or_else(|| missing("summary"))?;
    let issue_type = name_of(fields.issuetype.as_ref()).ok_or_else(|| missing("issuetype.name"))?;
    let status = name_of(fields.status.as_ref()).ok_or_else(|| missing("status.name"))?;
    let created_raw = fields.created.as_deref().ok_or_else(|| missing("created"))?;
    let updated_raw = fields.updated.as_deref().ok_or_else(|| missing("updated"))?;

    let created_at = parse_timestamp(key, "created", created_raw)?;
    let updated_at = parse_timestamp(key, "updated", updated_raw)?;

    Ok(DisplayRecord {
        key: key.to_string(),
        summary,
        issue_type,
        status,
        link: format!("{server}/browse/{key}"),
        created_at,
        created_local: to_local_string(&created_at, tz),
        updated_local: to_local_string(&updated_at, tz),
    })
}

fn name_of(field: Option<&NamedField>) -> Option<String> {
    field.and_then(|f| f.name.clone())
}

fn parse_timestamp(
    key: &str,
    field: &'static str,
    value: &str,
) -> Result<DateTime<FixedOffset>, FormatError> {
    DateTime::parse_from_str(value, SOURCE_TIMESTAMP_FORMAT).map_err(|_| {
        FormatError::InvalidTimestamp {
            key: key.to_string(),
            field,
            value: value.to_string(),
        }
    })
}

fn to_local_string<Tz>(timestamp: &DateTime<FixedOffset>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(DISPLAY_TIMESTAMP_FORMAT)
        .to_string()
}
