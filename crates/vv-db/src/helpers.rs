//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`).

use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `StoreError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, StoreError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all vv-core enums (`snake_case` statuses and display-form
/// categories alike).
///
/// # Errors
///
/// Returns `StoreError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| StoreError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `StoreError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, StoreError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Parse a TEXT column holding a JSON value into a deserializable type.
///
/// Used for JSON-encoded columns: post tags, preferred categories, social
/// links, notification payloads.
///
/// # Errors
///
/// Returns `StoreError::Query` if the string is not valid JSON for `T`.
pub fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, StoreError> {
    serde_json::from_str(s).map_err(|e| StoreError::Query(format!("Invalid JSON in column: {e}")))
}

/// Serialize a value into the JSON TEXT form stored in the database.
///
/// # Errors
///
/// Returns `StoreError` if serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Other(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vv_core::enums::{Category, CommentStatus};

    #[test]
    fn parse_datetime_both_formats() {
        assert!(parse_datetime("2026-02-09T14:30:00+00:00").is_ok());
        assert!(parse_datetime("2026-02-09 14:30:00").is_ok());
        assert!(parse_datetime("not a date").is_err());
    }

    #[test]
    fn parse_optional_datetime_empty_is_none() {
        assert_eq!(parse_optional_datetime(None).unwrap(), None);
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert!(parse_optional_datetime(Some("2026-02-09 14:30:00"))
            .unwrap()
            .is_some());
    }

    #[test]
    fn parse_enum_statuses_and_categories() {
        let status: CommentStatus = parse_enum("approved").unwrap();
        assert_eq!(status, CommentStatus::Approved);

        let category: Category = parse_enum("Culture and Tourism").unwrap();
        assert_eq!(category, Category::CultureAndTourism);

        assert!(parse_enum::<CommentStatus>("nonsense").is_err());
    }

    #[test]
    fn json_roundtrip() {
        let tags = vec!["a".to_string(), "b".to_string()];
        let encoded = to_json(&tags).unwrap();
        let decoded: Vec<String> = parse_json(&encoded).unwrap();
        assert_eq!(decoded, tags);
    }
}
