//! Environment-backed configuration.
//!
//! Credentials and the SMS API key never travel on the command line; they are
//! read from the environment (a `.env` file is honored by the binary before
//! this module runs).

use std::path::PathBuf;

use crate::error::{Result, ShiftwatchError};
use crate::urls;

/// Member-site login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// SMS gateway settings.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// Everything a watch run needs beyond its CLI arguments.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub credentials: Credentials,
    pub sms: SmsConfig,
    /// Where the persisted session lives between polls.
    pub store_path: PathBuf,
}

impl WatchConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            credentials: Credentials {
                username: require_env("COOP_USERNAME")?,
                password: require_env("COOP_PASSWORD")?,
            },
            sms: SmsConfig {
                endpoint: urls::TEXTBELT_URL.into(),
                api_key: require_env("SMS_API_KEY")?,
            },
            store_path: Self::default_store_path(),
        })
    }

    /// Default session store location.
    pub fn default_store_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".shiftwatch").join("session.db")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ShiftwatchError::Config(format!("missing required environment variable {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_path_shape() {
        let path = WatchConfig::default_store_path();
        assert!(path.ends_with(".shiftwatch/session.db"));
    }

    #[test]
    fn test_require_env_missing() {
        let err = require_env("SHIFTWATCH_TEST_VAR_THAT_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, ShiftwatchError::Config(_)));
        assert!(err.to_string().contains("SHIFTWATCH_TEST_VAR_THAT_DOES_NOT_EXIST"));
    }
}
