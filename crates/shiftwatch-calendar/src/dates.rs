//! Free-text date and time parsing for calendar headers and shift labels.
//!
//! Month-day-year order throughout, matching the site's US formatting.
//! Column headers sometimes omit the year; those resolve against today.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use shiftwatch_core::error::{Result, ShiftwatchError};

const DATE_FORMATS: &[&str] = &[
    "%m-%d-%Y",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

// Joined with " %Y" after pinning the anchor year.
const YEARLESS_FORMATS: &[&str] = &[
    "%A, %B %d",
    "%a, %b %d",
    "%A %B %d",
    "%a %b %d",
    "%B %d",
    "%b %d",
    "%m/%d",
    "%m-%d",
];

const TIME_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M"];

/// Parse a free-text calendar date, e.g. "04-13-2022" or "Wed, Apr 13".
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    parse_date_anchored(text, Local::now().date_naive())
}

fn parse_date_anchored(text: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    // chrono cannot resolve a bare month-day, so pin the anchor year first
    let candidate = format!("{trimmed} {}", today.year());
    for format in YEARLESS_FORMATS {
        let with_year = format!("{format} %Y");
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, &with_year) {
            return Ok(date);
        }
    }
    Err(ShiftwatchError::Parse(format!("unparseable date: {text:?}")))
}

/// Parse a shift's displayed start time, e.g. "6:00 AM" or "18:00".
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let trimmed = text.trim();
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, format) {
            return Ok(time);
        }
    }
    Err(ShiftwatchError::Parse(format!("unparseable shift time: {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_parse_date_mdy() {
        assert_eq!(parse_date("04-13-2022").expect("date"), date(2022, 4, 13));
        assert_eq!(parse_date("4/13/2022").expect("date"), date(2022, 4, 13));
    }

    #[test]
    fn test_parse_date_month_name() {
        assert_eq!(parse_date("April 13, 2022").expect("date"), date(2022, 4, 13));
        assert_eq!(parse_date("  Apr 13, 2022 ").expect("date"), date(2022, 4, 13));
    }

    #[test]
    fn test_parse_date_yearless_header() {
        // April 13, 2022 was a Wednesday
        assert_eq!(
            parse_date_anchored("Wed, Apr 13", date(2022, 1, 1)).expect("date"),
            date(2022, 4, 13)
        );
        assert_eq!(
            parse_date_anchored("April 13", date(2022, 6, 30)).expect("date"),
            date(2022, 4, 13)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("next Tuesday-ish").unwrap_err();
        assert!(matches!(err, ShiftwatchError::Parse(_)));
    }

    #[test]
    fn test_parse_time_twelve_hour() {
        assert_eq!(
            parse_time("8:00 AM").expect("time"),
            NaiveTime::from_hms_opt(8, 0, 0).expect("valid time")
        );
        assert_eq!(
            parse_time("1:00 PM").expect("time"),
            NaiveTime::from_hms_opt(13, 0, 0).expect("valid time")
        );
    }

    #[test]
    fn test_parse_time_twenty_four_hour() {
        assert_eq!(
            parse_time("18:30").expect("time"),
            NaiveTime::from_hms_opt(18, 30, 0).expect("valid time")
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        let err = parse_time("noonish").unwrap_err();
        assert!(matches!(err, ShiftwatchError::Parse(_)));
    }
}
