//! Review date parsing

use crate::error::InputError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%y", "%d-%b-%Y", "%Y/%m/%d"];

/// Date-time formats without an offset; the time of day is discarded
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a review date to its calendar date.
///
/// Accepts ISO-8601 dates (`2023-01-01`), ISO-8601 / RFC 3339 date-times
/// (`2023-01-01T10:30:00Z`, `2023-01-01 10:30:00`), and the `31-Jul-18`
/// form used by the review dataset. Date-times with an offset keep the
/// calendar date as written, not converted to UTC.
pub fn parse_review_date(value: &str) -> Result<NaiveDate, InputError> {
    let trimmed = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(InputError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_review_date("2023-01-01").unwrap(), ymd(2023, 1, 1));
        assert_eq!(parse_review_date(" 2023-01-02 ").unwrap(), ymd(2023, 1, 2));
    }

    #[test]
    fn test_dataset_date() {
        assert_eq!(parse_review_date("31-Jul-18").unwrap(), ymd(2018, 7, 31));
        assert_eq!(parse_review_date("1-Jun-2018").unwrap(), ymd(2018, 6, 1));
    }

    #[test]
    fn test_datetime_discards_time() {
        assert_eq!(
            parse_review_date("2023-01-01T23:59:59Z").unwrap(),
            ymd(2023, 1, 1)
        );
        assert_eq!(
            parse_review_date("2023-01-01T23:30:00+05:00").unwrap(),
            ymd(2023, 1, 1)
        );
        assert_eq!(
            parse_review_date("2023-01-01 08:15:00").unwrap(),
            ymd(2023, 1, 1)
        );
        assert_eq!(
            parse_review_date("2023-01-01T08:15").unwrap(),
            ymd(2023, 1, 1)
        );
    }

    #[test]
    fn test_invalid_date_keeps_value() {
        let err = parse_review_date("2023-13-45").unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidDate {
                value: "2023-13-45".to_string()
            }
        );

        assert!(parse_review_date("").is_err());
        assert!(parse_review_date("yesterday").is_err());
    }
}
