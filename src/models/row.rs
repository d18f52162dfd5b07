//! Column conversions shared by the row mappers

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;

/// ISO calendar date, the key format for day plans
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn timestamp_to_sql(ts: &DateTime<Utc>) -> String {
    // Nanosecond precision so save -> load is exact
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn timestamp_from_sql(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn date_to_sql(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_from_sql(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip_keeps_nanos() {
        let ts = Utc::now();
        let text = timestamp_to_sql(&ts);
        assert_eq!(timestamp_from_sql(0, &text).unwrap(), ts);
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date_to_sql(&date), "2024-02-29");
        assert_eq!(date_from_sql(0, "2024-02-29").unwrap(), date);
        assert!(date_from_sql(0, "29/02/2024").is_err());
    }
}
