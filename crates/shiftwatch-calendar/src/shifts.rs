//! Shift extraction and filtering.
//!
//! Entries whose displayed time or name cannot be parsed abort the scan
//! rather than being silently dropped.

use chrono::Timelike;
use shiftwatch_core::error::{Result, ShiftwatchError};
use shiftwatch_core::types::{DateColumn, Shift};

use crate::dates;

/// Every co-op shift runs two and three-quarter hours.
pub const SHIFT_DURATION_HOURS: f64 = 2.75;

/// Wildcard pattern accepting any shift name.
pub const ANY_SHIFT: &str = "all";

/// Filter a column's raw entries down to bookable shifts, in document order.
///
/// A shift is kept when it starts at or after `start_hour`, fits entirely
/// before `end_hour`, is not already claimed, and its name matches
/// `name_pattern` (or the pattern is [`ANY_SHIFT`]).
pub fn matching_shifts(
    column: &DateColumn,
    start_hour: u32,
    end_hour: u32,
    name_pattern: &str,
) -> Result<Vec<Shift>> {
    let mut matches = Vec::new();
    for entry in &column.entries {
        let time = dates::parse_time(&entry.time_text)?;

        // Claimed shifts are never offered again, whatever else matches.
        if entry.claimed {
            continue;
        }

        let hour = time.hour();
        let starts_late_enough = hour >= start_hour;
        let fits_before_end = end_hour as f64 >= hour as f64 + SHIFT_DURATION_HOURS;
        if !starts_late_enough || !fits_before_end {
            continue;
        }

        let name = clean_name(&entry.name_text).ok_or_else(|| {
            ShiftwatchError::Parse(format!(
                "shift entry at {} has no readable name",
                entry.time_text
            ))
        })?;
        if name_pattern == ANY_SHIFT || name.eq_ignore_ascii_case(name_pattern) {
            matches.push(Shift::new(name, time));
        }
    }
    Ok(matches)
}

/// Reduce a raw label to the shift name: the first line carrying letters,
/// stripped of the site's trailing decorations.
fn clean_name(raw: &str) -> Option<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|line| line.chars().any(char::is_alphabetic))?;
    let cleaned = line
        .trim_end_matches(|c: char| !(c.is_alphanumeric() || c == ')'))
        .trim()
        .to_string();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use shiftwatch_core::types::RawShiftEntry;

    fn entry(time_text: &str, name_text: &str, claimed: bool) -> RawShiftEntry {
        RawShiftEntry {
            time_text: time_text.into(),
            name_text: name_text.into(),
            claimed,
        }
    }

    fn column(entries: Vec<RawShiftEntry>) -> DateColumn {
        DateColumn {
            date: NaiveDate::from_ymd_opt(2022, 4, 13).expect("valid date"),
            entries,
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn test_scenario_window_and_claimed_filters() {
        // stock excluded: 13 + 2.75 > 14; cashier excluded: claimed
        let column = column(vec![
            entry("8:00 AM", "checkout", false),
            entry("1:00 PM", "stock", false),
            entry("9:00 AM", "cashier", true),
        ]);
        let matches = matching_shifts(&column, 8, 14, ANY_SHIFT).expect("filter");
        assert_eq!(matches, vec![Shift::new("checkout", time(8, 0))]);
    }

    #[test]
    fn test_claimed_excluded_regardless_of_other_filters() {
        let column = column(vec![entry("9:00 AM", "checkout", true)]);
        let matches = matching_shifts(&column, 8, 24, "checkout").expect("filter");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_document_order_preserved() {
        let column = column(vec![
            entry("10:00 AM", "stocking", false),
            entry("8:00 AM", "checkout", false),
        ]);
        let matches = matching_shifts(&column, 1, 24, ANY_SHIFT).expect("filter");
        assert_eq!(
            matches,
            vec![
                Shift::new("stocking", time(10, 0)),
                Shift::new("checkout", time(8, 0)),
            ]
        );
    }

    #[test]
    fn test_window_boundaries() {
        // 9 + 2.75 = 11.75 <= 12: kept. 10 + 2.75 = 12.75 > 12: dropped.
        let column = column(vec![
            entry("9:00 AM", "checkout", false),
            entry("10:00 AM", "checkout", false),
        ]);
        let matches = matching_shifts(&column, 9, 12, ANY_SHIFT).expect("filter");
        assert_eq!(matches, vec![Shift::new("checkout", time(9, 0))]);
    }

    #[test]
    fn test_name_match_case_insensitive_exact() {
        let column = column(vec![
            entry("9:00 AM", "Checkout", false),
            entry("10:00 AM", "Checkout Squad", false),
        ]);
        let matches = matching_shifts(&column, 1, 24, "checkout").expect("filter");
        assert_eq!(matches, vec![Shift::new("Checkout", time(9, 0))]);
    }

    #[test]
    fn test_unparseable_time_propagates() {
        let column = column(vec![entry("morningish", "checkout", false)]);
        let err = matching_shifts(&column, 1, 24, ANY_SHIFT).unwrap_err();
        assert!(matches!(err, ShiftwatchError::Parse(_)));
    }

    #[test]
    fn test_unreadable_name_propagates() {
        let column = column(vec![entry("9:00 AM", " \n ▣ \n", false)]);
        let err = matching_shifts(&column, 1, 24, ANY_SHIFT).unwrap_err();
        assert!(matches!(err, ShiftwatchError::Parse(_)));
    }

    #[test]
    fn test_clean_name_strips_decorations() {
        assert_eq!(clean_name("\n Checkout ▣\n").as_deref(), Some("Checkout"));
        assert_eq!(
            clean_name("\n Receiving (Produce) ▣\n").as_deref(),
            Some("Receiving (Produce)")
        );
        assert_eq!(clean_name("  \n ▣ \n"), None);
    }
}
