//! Row-to-entity parsing helpers.
//!
//! Repos convert column-indexed `libsql::Row` values into typed entities.
//! Timestamps are written with `to_rfc3339()` but columns defaulted by
//! `SQLite`'s `datetime('now')` use a different layout, so both are accepted.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-03-02T09:00:00+00:00"`) and `SQLite`'s default
/// format (`"2026-03-02 09:00:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all roll-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER 0/1 column as `bool`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for any other stored value.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    match row.get::<i64>(idx)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DatabaseError::InvalidState(format!(
            "expected 0 or 1 in flag column {idx}, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use rstest::rstest;

    use super::*;
    use roll_core::enums::PropagationStatus;

    #[rstest]
    #[case("2026-03-02T09:15:00+00:00")]
    #[case("2026-03-02T09:15:00Z")]
    #[case("2026-03-02 09:15:00")]
    fn parses_both_datetime_layouts(#[case] input: &str) {
        let dt = parse_datetime(input).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2026, 3, 2));
        assert_eq!((dt.hour(), dt.minute()), (9, 15));
    }

    #[test]
    fn rejects_garbage_datetime() {
        assert!(matches!(
            parse_datetime("yesterday"),
            Err(DatabaseError::Query(_))
        ));
    }

    #[test]
    fn parses_status_enum() {
        let status: PropagationStatus = parse_enum("applied").unwrap();
        assert_eq!(status, PropagationStatus::Applied);
        assert!(parse_enum::<PropagationStatus>("lost").is_err());
    }
}
