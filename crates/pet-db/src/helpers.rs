//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual
//! datetime format (`SQLite`'s `datetime('now')` vs `to_rfc3339()`).
//!
//! Absence is preserved exactly: SQL NULL becomes `None`, while an empty
//! string stays `Some("")`. Clients see `null` only for values that were
//! never stored.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DatabaseError;

/// Offset-carrying layouts beyond RFC 3339. `%#z` accepts `+00`, `+0000` and `+00:00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Zone-less layouts, read as UTC. `%.f` also matches no fraction at all.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles RFC 3339 (`"2026-02-09T14:30:00+00:00"`), `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`), fractional seconds, a bare `T`
/// separator, and short `+00` offsets as written by Postgres exports.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string matches none of them.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(DatabaseError::InvalidState(format!("unrecognised datetime '{s}'")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Only SQL NULL maps to `None`.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`,
/// so nullable columns must go through `get::<Option<String>>()`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

/// Read a nullable INTEGER column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

/// Read a nullable datetime column stored as TEXT.
///
/// Timestamps on authored content are informational, so a value that
/// cannot be parsed is logged and served as `null` instead of failing the row.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_datetime(
    row: &libsql::Row,
    idx: i32,
) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match parse_optional_datetime(get_opt_string(row, idx)?.as_deref()) {
        Err(DatabaseError::InvalidState(reason)) => {
            tracing::warn!(column = idx, %reason, "stored timestamp is unreadable; serving null");
            Ok(None)
        }
        other => other,
    }
}

/// Extract an optional JSON value from a TEXT column.
///
/// Text that is not valid JSON is served as a plain JSON string rather than
/// failing the whole node; hand-edited rows must not break traversal.
#[must_use]
pub fn parse_lenient_json(s: Option<&str>) -> Option<serde_json::Value> {
    let s = s?;
    if s.is_empty() {
        return None;
    }
    match serde_json::from_str(s) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "stored JSON column is not valid JSON; serving raw text");
            Some(serde_json::Value::String(s.to_string()))
        }
    }
}

/// Serialise an optional JSON value for a TEXT column. `null` is stored as NULL.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialisation fails.
pub fn json_column(value: &serde_json::Value) -> Result<Option<String>, DatabaseError> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::to_string(value)
        .map(Some)
        .map_err(|e| DatabaseError::Other(e.into()))
}
