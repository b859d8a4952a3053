//! Unified error types for Shiftwatch.

use thiserror::Error;

/// Result type alias using ShiftwatchError.
pub type Result<T> = std::result::Result<T, ShiftwatchError>;

#[derive(Error, Debug)]
pub enum ShiftwatchError {
    // Session errors
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Session store error: {0}")]
    Store(String),

    // Calendar errors
    #[error("No calendar date matched the given one: {0}")]
    DateNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShiftwatchError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthFailed(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Whether this error should abort the whole run instead of just the
    /// current poll iteration.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::DateNotFound(_) | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShiftwatchError::AuthFailed("bad password".into());
        assert!(err.to_string().contains("bad password"));
    }

    #[test]
    fn test_error_constructors() {
        let e1 = ShiftwatchError::auth("test");
        assert!(matches!(e1, ShiftwatchError::AuthFailed(_)));

        let e2 = ShiftwatchError::parse("test");
        assert!(matches!(e2, ShiftwatchError::Parse(_)));

        let e3 = ShiftwatchError::http("test");
        assert!(matches!(e3, ShiftwatchError::Http(_)));

        let e4 = ShiftwatchError::store("test");
        assert!(matches!(e4, ShiftwatchError::Store(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShiftwatchError = io_err.into();
        assert!(matches!(err, ShiftwatchError::Io(_)));
    }

    #[test]
    fn test_fatal_routing() {
        assert!(ShiftwatchError::auth("x").is_fatal());
        assert!(ShiftwatchError::DateNotFound("2022-04-13".into()).is_fatal());
        assert!(ShiftwatchError::Config("x".into()).is_fatal());

        assert!(!ShiftwatchError::parse("x").is_fatal());
        assert!(!ShiftwatchError::http("x").is_fatal());
        assert!(!ShiftwatchError::store("x").is_fatal());
    }
}
