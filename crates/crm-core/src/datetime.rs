//! Timestamp formatting and lenient date parsing.
//!
//! Timestamps go over the wire as `%Y-%m-%dT%H:%M:%S%.3fZ`. Incoming dates
//! may also be date-only (`YYYY-MM-DD`, midnight UTC) or RFC 3339 with an
//! offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formats a timestamp for the wire and the store.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(WIRE_FORMAT).to_string()
}

/// Formats only the date part (`YYYY-MM-DD`), as form inputs expect.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Parses a timestamp, trying RFC 3339, naive date-times and plain dates.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Serde adapter for optional date fields (`#[serde(with = "crate::datetime::optional")]`).
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_datetime(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse_datetime(&s)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {s}"))),
        }
    }
}
