//! # Shiftwatch Agent
//! The poll loop engine — acquire, scan, filter, notify, repeat.

pub mod watcher;

pub use watcher::ShiftWatcher;
