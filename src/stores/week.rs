//! Calendar helpers for Monday-anchored weeks
//!
//! Plain calendar-date arithmetic on `NaiveDate`; no time zones involved
//! beyond asking the local clock what day it is.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::row::DATE_FORMAT;

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date key
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Monday of the week containing `date`
///
/// With `day` counted Sunday = 0 .. Saturday = 6, the week start is the
/// day-of-month `date.day() - day + (1, or -6 on Sundays)`, letting the
/// calendar roll over into the previous month or year.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let day = i64::from(date.weekday().num_days_from_sunday());
    let diff = i64::from(date.day()) - day + if day == 0 { -6 } else { 1 };
    let offset = diff - i64::from(date.day());

    date.checked_add_signed(Duration::days(offset)).unwrap_or(date)
}

/// The seven dates, Monday through Sunday, of the week containing `date`
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| {
        start
            .checked_add_signed(Duration::days(i as i64))
            .unwrap_or(start)
    })
}

/// Short weekday label for report rows
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn formatted(dates: &[NaiveDate]) -> Vec<String> {
        dates.iter().map(|d| format_date(*d)).collect()
    }

    #[test]
    fn test_wednesday_starts_on_preceding_monday() {
        let dates = week_dates(date("2024-05-15"));
        assert_eq!(
            formatted(&dates),
            vec![
                "2024-05-13", "2024-05-14", "2024-05-15", "2024-05-16",
                "2024-05-17", "2024-05-18", "2024-05-19",
            ]
        );
    }

    #[test]
    fn test_monday_is_its_own_week_start() {
        assert_eq!(week_start(date("2024-05-13")), date("2024-05-13"));
    }

    #[test]
    fn test_sunday_goes_back_six_days() {
        assert_eq!(week_start(date("2024-05-19")), date("2024-05-13"));
    }

    #[test]
    fn test_rolls_over_month_and_year() {
        // Wednesday 2025-01-01 belongs to the week starting Monday 2024-12-30
        assert_eq!(week_start(date("2025-01-01")), date("2024-12-30"));

        // Sunday 2024-03-03: day-of-month 3 - 6 crosses into February (leap year)
        assert_eq!(week_start(date("2024-03-03")), date("2024-02-26"));

        let dates = week_dates(date("2024-03-03"));
        assert_eq!(format_date(dates[3]), "2024-02-29");
        assert_eq!(format_date(dates[6]), "2024-03-03");
    }

    #[test]
    fn test_every_day_of_a_week_maps_to_same_start() {
        let start = date("2024-07-01");
        for offset in 0..7 {
            let day = start + Duration::days(offset);
            assert_eq!(week_start(day), start);
        }
    }

    #[test]
    fn test_parse_and_label() {
        assert_eq!(parse_date(" 2024-05-15 "), Some(date("2024-05-15")));
        assert_eq!(parse_date("15/05/2024"), None);
        assert_eq!(weekday_label(date("2024-05-15")), "Wed");
    }
}
