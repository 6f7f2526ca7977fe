//! Timestamp codec shared by uploaded files and destination worksheets.
//!
//! Both sides write minute-resolution local times such as
//! `"Jul 20, 2025 10:11 AM"`, so values are compared as naive datetimes.

use chrono::NaiveDateTime;

pub const DATETIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Number of whitespace-separated fields in [`DATETIME_FORMAT`].
const FIELD_COUNT: usize = 5;

/// Parses a value in [`DATETIME_FORMAT`]. Blank or non-matching text yields
/// `None`.
///
/// Every space in the format must be matched by at least one whitespace
/// character; chrono alone would also accept `"Jul 20,2025 10:11AM"`.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }
    NaiveDateTime::parse_from_str(&fields.join(" "), DATETIME_FORMAT).ok()
}

/// Renders a timestamp for a worksheet cell; `None` renders as `""`.
pub fn format(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}
