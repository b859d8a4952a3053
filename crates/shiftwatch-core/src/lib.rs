//! # Shiftwatch Core
//! Shared error taxonomy, configuration, value types, and site endpoints.

pub mod config;
pub mod error;
pub mod types;
pub mod urls;
