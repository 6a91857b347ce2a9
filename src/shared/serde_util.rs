//! Timestamp parsing for backend wire formats.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use super::amount::WireNumber;

/// Unix-millis wire value to a timestamp.
///
/// Price history points carry `timestamp` as epoch milliseconds; upstream
/// providers occasionally emit them as floats or strings. Malformed values map
/// to the Unix epoch.
pub fn millis_or_epoch(value: Option<&WireNumber>) -> DateTime<Utc> {
    value
        .and_then(WireNumber::to_decimal)
        .and_then(|ms| ms.trunc().to_i64())
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (with offset) and naive ISO-8601 values, which are taken
/// as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a required timestamp; malformed values map to the Unix epoch.
pub fn timestamp_or_epoch(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap_or_default()
}
