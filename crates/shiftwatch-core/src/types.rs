//! Shared value types for the watch pipeline.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One raw entry lifted out of a calendar column, before any parsing of its
/// displayed text. Document order is preserved by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawShiftEntry {
    /// Displayed start time, e.g. "8:00 AM".
    pub time_text: String,
    /// Displayed label text, still carrying the site's decorations.
    pub name_text: String,
    /// The member has already signed up for this one.
    pub claimed: bool,
}

/// The portion of a calendar page belonging to one date.
#[derive(Debug, Clone)]
pub struct DateColumn {
    pub date: NaiveDate,
    pub entries: Vec<RawShiftEntry>,
}

/// A bookable shift that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub name: String,
    pub time: NaiveTime,
}

impl Shift {
    pub fn new(name: impl Into<String>, time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.time.format("%H:%M"), self.name)
    }
}

/// Immutable parameters for one watch run.
#[derive(Debug, Clone)]
pub struct WatchRequest {
    pub target_date: NaiveDate,
    /// Earliest hour (1-24) the shift may start, inclusive.
    pub start_hour: u32,
    /// Latest hour (1-24) the shift may end, inclusive.
    pub end_hour: u32,
    /// Shift name to match, or "all".
    pub shift_name: String,
    /// Persist the login session to disk between polls.
    pub keep_session_alive: bool,
    /// Sleep between polls.
    pub sleep_secs: u64,
    /// Overall wall-clock budget for the run.
    pub timeout: Duration,
    /// Phone number to text when a match appears.
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_display() {
        let time = NaiveTime::from_hms_opt(8, 0, 0).expect("valid time");
        let shift = Shift::new("checkout", time);
        assert_eq!(shift.to_string(), "08:00: checkout");
    }

    #[test]
    fn test_shift_display_afternoon() {
        let time = NaiveTime::from_hms_opt(13, 30, 0).expect("valid time");
        assert_eq!(Shift::new("stocking", time).to_string(), "13:30: stocking");
    }

    #[test]
    fn test_shift_json_roundtrip() {
        let time = NaiveTime::from_hms_opt(9, 15, 0).expect("valid time");
        let shift = Shift::new("cashier", time);
        let json = serde_json::to_string(&shift).expect("serialize");
        let parsed: Shift = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, shift);
    }
}
