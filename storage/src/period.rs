//! Fixed textual format for message timestamps.
//!
//! Periods are stored, bound and compared as `YYYY-MM-DD HH:MM:SS` strings with no offset,
//! so range filters compare formatted strings rather than typed timestamps.

use chrono::{Local, NaiveDateTime, Timelike};

/// `chrono` pattern for every persisted or compared period.
pub const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_period(period: &NaiveDateTime) -> String {
    period.format(PERIOD_FORMAT).to_string()
}

pub fn parse_period(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, PERIOD_FORMAT)
}

/// Current local wall-clock time at second precision.
pub fn now_period() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
