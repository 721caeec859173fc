//! Row-to-entity parsing helpers.
//!
//! Repos convert `libsql::Row` (column-indexed) into typed entity structs.
//! Window columns hold canonical ISO-8601 text written by
//! [`ccm_core::timestamp::format_timestamp`].

use ccm_core::timestamp::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;

use crate::error::DatabaseError;

/// Parse a stored window column back into a timestamp.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the column holds text that is not a timestamp.
pub fn parse_stored_timestamp(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    parse_timestamp(s).map_err(|e| DatabaseError::Query(format!("bad stored timestamp: {e}")))
}

/// Text form used for window columns in SQL parameters.
#[must_use]
pub fn sql_timestamp(ts: &NaiveDateTime) -> String {
    format_timestamp(ts)
}

/// Read a nullable TEXT column. SQL NULL is `None`; any stored text,
/// including `''`, is returned unchanged.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// Use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_text_roundtrips() {
        let ts = parse_timestamp("2023-03-31T23:59:59").unwrap();
        assert_eq!(parse_stored_timestamp(&sql_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn corrupt_column_is_query_error() {
        assert!(matches!(
            parse_stored_timestamp("not-a-date"),
            Err(DatabaseError::Query(_))
        ));
    }
}
