use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{AppError, AppResult};

/// Parse a strict ISO calendar date (`YYYY-MM-DD`) from a query parameter.
pub fn parse_query_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a date in YYYY-MM-DD format", field)))
}

/// Parse an entry date supplied by a client. Accepts a bare calendar date or an
/// RFC 3339 timestamp; timestamps are reduced to their UTC calendar day.
pub fn parse_entry_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| AppError::Validation("date must be YYYY-MM-DD or an RFC 3339 timestamp".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_date_accepts_iso() {
        assert_eq!(parse_query_date("from", "2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_query_date_rejects_garbage() {
        assert!(matches!(
            parse_query_date("from", "yesterday"),
            Err(AppError::Validation(_))
        ));
        assert!(parse_query_date("to", "2024-13-01").is_err());
        assert!(parse_query_date("to", "2024-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn test_entry_date_normalizes_offsets_to_utc() {
        // 23:30 at -05:00 is already the next day in UTC.
        assert_eq!(
            parse_entry_date("2024-03-10T23:30:00-05:00").unwrap(),
            ymd(2024, 3, 11)
        );
        assert_eq!(parse_entry_date("2024-03-10T01:00:00Z").unwrap(), ymd(2024, 3, 10));
        assert_eq!(parse_entry_date("2024-03-10").unwrap(), ymd(2024, 3, 10));
    }

    #[test]
    fn test_entry_date_rejects_garbage() {
        assert!(parse_entry_date("March 10th").is_err());
    }
}
