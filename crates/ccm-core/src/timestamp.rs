//! ISO-8601 timestamp handling for measurement and rule windows.
//!
//! Windows are compared as naive UTC date-times. Inputs may be plain dates
//! (`2023-01-01`), naive date-times (`2023-01-01T00:00:00`, optional fraction,
//! `T` or space separator) or RFC 3339 strings with an offset, which are
//! shifted to UTC before the offset is dropped.
//!
//! [`format_timestamp`] is the single canonical rendering. It is used both for
//! the stored `period_start`/`period_end` columns and for published documents,
//! so text ordering in the store matches chronological ordering.
//!
//! # Example
//! ```ignore
//! use ccm_core::timestamp;
//! use chrono::NaiveDateTime;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Window {
//!     #[serde(with = "timestamp::iso")]
//!     pub start: NaiveDateTime,
//! }
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::errors::CoreError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 date or date-time into a naive UTC timestamp.
///
/// Fractions finer than a microsecond are rejected, since the stored form
/// cannot hold them.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the string matches none of the accepted
/// forms or carries sub-microsecond precision.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, CoreError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return whole_microseconds(dt.naive_utc(), input);
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return whole_microseconds(dt, input);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CoreError::Validation(format!("invalid ISO-8601 timestamp '{input}'")))
}

fn whole_microseconds(ts: NaiveDateTime, input: &str) -> Result<NaiveDateTime, CoreError> {
    if ts.nanosecond() % 1_000 == 0 {
        Ok(ts)
    } else {
        Err(CoreError::Validation(format!(
            "timestamp '{input}' is more precise than microseconds"
        )))
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS`, adding microseconds only when
/// the value has a sub-second part.
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Serde adapter: `NaiveDateTime` as a canonical ISO-8601 string.
pub mod iso {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_plain_date_as_midnight() {
        assert_eq!(
            parse_timestamp("2023-03-01").unwrap(),
            ymd_hms(2023, 3, 1, 0, 0, 0)
        );
    }

    #[test]
    fn parses_naive_datetime_with_either_separator() {
        let expected = ymd_hms(2023, 3, 31, 23, 59, 59);
        assert_eq!(parse_timestamp("2023-03-31T23:59:59").unwrap(), expected);
        assert_eq!(parse_timestamp("2023-03-31 23:59:59").unwrap(), expected);
    }

    #[test]
    fn parses_minutes_only() {
        assert_eq!(
            parse_timestamp("2023-03-31T12:30").unwrap(),
            ymd_hms(2023, 3, 31, 12, 30, 0)
        );
    }

    #[test]
    fn offset_is_folded_into_utc() {
        assert_eq!(
            parse_timestamp("2023-06-01T01:00:00+01:00").unwrap(),
            ymd_hms(2023, 6, 1, 0, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2023-06-01T00:00:00Z").unwrap(),
            ymd_hms(2023, 6, 1, 0, 0, 0)
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("March 2023").unwrap_err();
        assert!(err.to_string().contains("March 2023"));
    }

    #[test]
    fn format_omits_zero_fraction() {
        assert_eq!(
            format_timestamp(&ymd_hms(2023, 1, 1, 0, 0, 0)),
            "2023-01-01T00:00:00"
        );
    }

    #[test]
    fn format_keeps_microseconds() {
        let ts = parse_timestamp("2023-01-01T00:00:00.25").unwrap();
        assert_eq!(format_timestamp(&ts), "2023-01-01T00:00:00.250000");
    }

    #[test]
    fn microseconds_roundtrip_through_format() {
        let ts = parse_timestamp("2023-01-01T00:00:00.000001").unwrap();
        assert_eq!(format_timestamp(&ts), "2023-01-01T00:00:00.000001");
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[test]
    fn sub_microsecond_fraction_is_rejected() {
        for input in ["2023-01-01T00:00:00.0000001", "2023-01-01T00:00:00.123456789Z"] {
            let err = parse_timestamp(input).unwrap_err();
            assert!(err.to_string().contains("microseconds"), "{input}: {err}");
        }
        assert!(parse_timestamp("2023-01-01T00:00:00.123456000").is_ok());
    }

    #[test]
    fn formatted_text_sorts_chronologically() {
        let earlier = format_timestamp(&parse_timestamp("2023-01-01T00:00:00").unwrap());
        let fraction = format_timestamp(&parse_timestamp("2023-01-01T00:00:00.5").unwrap());
        let later = format_timestamp(&parse_timestamp("2023-01-01T00:00:01").unwrap());
        assert!(earlier < fraction);
        assert!(fraction < later);
    }
}
