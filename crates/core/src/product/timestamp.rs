//! Canonical timestamp handling for products.
//!
//! Every timestamp stored or served by productstore is UTC, truncated to
//! millisecond precision and rendered with [`TIMESTAMP_FORMAT`]. The same
//! string is used for the JSON API and for the DynamoDB attributes, so a value
//! read back from the store compares equal to the value that was written.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

/// Sortable UTC format with millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Truncates a timestamp to the precision kept by [`TIMESTAMP_FORMAT`].
pub fn truncate_timestamp(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// Current time, already truncated.
pub fn now() -> DateTime<Utc> {
    truncate_timestamp(Utc::now())
}

/// Formats a timestamp with [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp written by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}
