//! Canonical calendar-date helpers.
//!
//! Every date key in a plan is a local calendar day rendered as
//! `YYYY-MM-DD`; exported calendars depend on this exact form.

use chrono::{Duration, NaiveDate};

use crate::error::ValidationError;

/// The canonical date key format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date as its canonical `YYYY-MM-DD` key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a canonical `YYYY-MM-DD` key.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for anything that is not a
/// real calendar date in canonical form.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// Shift a date by whole days, saturating at the representable range.
pub fn add_days(date: NaiveDate, days: i32) -> NaiveDate {
    date.checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Inclusive day range `start..=end`; empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
