//! # Shiftwatch Calendar
//! Locate the calendar column for a target date and filter its shifts.

pub mod dates;
pub mod scanner;
pub mod shifts;
