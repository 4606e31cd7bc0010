//! Due-date parsing and normalization.
//!
//! Clients send dates in a handful of common shapes; everything is stored and
//! compared as `yyyy-MM-dd`. Date-times keep the calendar date as written and
//! drop the time of day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::ValidationError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Canonical storage format.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Parses any accepted date shape into a calendar date.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::InvalidDueDate);
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
    {
        return Ok(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|datetime| datetime.date())
        .ok_or(ValidationError::InvalidDueDate)
}

/// Formats a date the way it is stored in the `due_date` column.
pub fn canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Parses and immediately re-formats. Used for agenda lookups.
pub fn normalize(input: &str) -> Result<String, ValidationError> {
    parse_due_date(input).map(canonical)
}
