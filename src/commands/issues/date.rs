//! Start-date resolution for the issue query.
//!
//! Turns the date field's text plus the control that was pressed into a
//! calendar date, an inline error, or a request to end the session.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use lazy_regex::regex_is_match;

use super::error::{Result, ViewError};

const INPUT_FORMAT: &str = "%m/%d/%Y";

/// Control triggered on the date form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAction {
    /// Nothing pressed yet.
    None,
    Submit,
    Cancel,
}

/// Where a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    /// Field was empty; the lookback window was applied.
    Default,
    /// Field held a valid MM/DD/YYYY date.
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No control pressed; nothing to do.
    Idle,
    Resolved { date: NaiveDate, source: DateSource },
    /// Submitted text did not parse; stay idle and show the error.
    Invalid(ViewError),
    /// The session must end without fetching.
    Cancelled,
}

/// Resolves the start date from the form state.
///
/// Cancel wins over everything else. An empty field resolves to
/// `now - lookback_days` in `now`'s time zone, date part only.
pub fn resolve_start_date<Tz: TimeZone>(
    input: &str,
    action: DateAction,
    now: &DateTime<Tz>,
    lookback_days: u32,
) -> Resolution {
    match action {
        DateAction::Cancel => Resolution::Cancelled,
        DateAction::None => Resolution::Idle,
        DateAction::Submit if input.is_empty() => Resolution::Resolved {
            date: default_start_date(now, lookback_days),
            source: DateSource::Default,
        },
        DateAction::Submit => match parse_date_input(input) {
            Ok(date) => Resolution::Resolved {
                date,
                source: DateSource::Explicit,
            },
            Err(e) => Resolution::Invalid(e),
        },
    }
}

/// Parses strictly `MM/DD/YYYY` (zero-padded, no surrounding whitespace).
pub fn parse_date_input(input: &str) -> Result<NaiveDate> {
    if !regex_is_match!(r"^\d{2}/\d{2}/\d{4}$", input) {
        return Err(ViewError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, INPUT_FORMAT)
        .map_err(|_| ViewError::InvalidDate(input.to_string()))
}

/// Local calendar date `lookback_days` before `now`.
pub fn default_start_date<Tz: TimeZone>(now: &DateTime<Tz>, lookback_days: u32) -> NaiveDate {
    let today = now.date_naive();
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}
