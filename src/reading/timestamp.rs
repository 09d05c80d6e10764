//! Day-first timestamps as written by the Cave-Link logger.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"];

/// Parses `DD/MM/YYYY HH:MM[:SS]`. A bare date is read as midnight.
pub fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if !has_four_digit_year(s) {
        return None;
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// chrono's `%Y` also takes `26` as year 0026.
fn has_four_digit_year(s: &str) -> bool {
    let date = s.split_whitespace().next().unwrap_or_default();

    date.rsplit(['/', '.', '-'])
        .next()
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn should_read_day_before_month() {
        let ts = parse_day_first("01/02/2024 13:45").unwrap();

        assert_eq!(ts.day(), 1);
        assert_eq!(ts.month(), 2);
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.hour(), 13);
        assert_eq!(ts.minute(), 45);
    }

    #[test]
    fn should_read_seconds_and_dots() {
        let ts = parse_day_first(" 31.12.2023 23:59:30 ").unwrap();
        assert_eq!(ts.second(), 30);
        assert_eq!(ts.month(), 12);
    }

    #[test]
    fn should_read_bare_date_as_midnight() {
        let ts = parse_day_first("15/06/2024").unwrap();
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.day(), 15);
    }

    #[test]
    fn should_reject_two_digit_year() {
        assert!(parse_day_first("18/10/26 06:00").is_none());
        assert!(parse_day_first("18.10.026 06:00").is_none());
        assert!(parse_day_first("18/10/26").is_none());
    }

    #[test]
    fn should_reject_month_first() {
        assert!(parse_day_first("12/31/2023 10:00").is_none());
        assert!(parse_day_first("yesterday").is_none());
        assert!(parse_day_first("").is_none());
    }
}
