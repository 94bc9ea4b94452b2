//! Serde helper functions for product timestamps.
//!
//! Products travel as JSON with timestamps in the same fixed format used for
//! storage. Request payloads additionally treat empty strings as "not set".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

use crate::product::{format_timestamp, parse_timestamp, truncate_timestamp};

/// (De)serialize a required timestamp using the canonical format.
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_flexible(&s).map_err(serde::de::Error::custom)
    }
}

/// Deserialize an optional timestamp, treating empty strings as None.
///
/// Accepts the canonical format as well as any RFC 3339 string; the result is
/// truncated to millisecond precision either way.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_flexible(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn parse_flexible(s: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .map(truncate_timestamp)
        .map_err(|e| format!("invalid timestamp {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "timestamp")]
        at: DateTime<Utc>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct OptionalStamp {
        #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_timestamp_serializes_in_canonical_format() {
        let value = Stamped {
            at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-15T10:30:00.000Z"}"#);
    }

    #[test]
    fn test_timestamp_accepts_rfc3339_with_offset() {
        let json = r#"{"at":"2024-01-15T12:30:00.123456+02:00"}"#;
        let value: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(
            value.at,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
                + chrono::Duration::milliseconds(123)
        );
    }

    #[test]
    fn test_optional_timestamp_empty() {
        let value: OptionalStamp = serde_json::from_str(r#"{"at": ""}"#).unwrap();
        assert_eq!(value.at, None);
    }

    #[test]
    fn test_optional_timestamp_missing() {
        let value: OptionalStamp = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(value.at, None);
    }

    #[test]
    fn test_optional_timestamp_invalid() {
        let result: Result<OptionalStamp, _> = serde_json::from_str(r#"{"at": "yesterday"}"#);
        assert!(result.is_err());
    }
}
