//! Textbelt SMS client — one form POST per text, JSON acknowledgment back.

use serde::Deserialize;
use shiftwatch_core::config::SmsConfig;
use shiftwatch_core::error::{Result, ShiftwatchError};

/// Delivery acknowledgment from the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "quotaRemaining", default)]
    pub quota_remaining: Option<i64>,
}

/// Outbound SMS client.
pub struct SmsClient {
    client: reqwest::Client,
    config: SmsConfig,
}

impl SmsClient {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Send one text and return the gateway's acknowledgment.
    pub async fn send(&self, phone: &str, message: &str) -> Result<SmsAck> {
        let form = [
            ("phone", phone),
            ("message", message),
            ("key", self.config.api_key.as_str()),
        ];
        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| ShiftwatchError::Http(format!("sms send: {e}")))?;
        let ack: SmsAck = response
            .json()
            .await
            .map_err(|e| ShiftwatchError::Http(format!("sms ack parse: {e}")))?;
        tracing::debug!(
            "SMS response: success={} quota_remaining={:?}",
            ack.success,
            ack.quota_remaining
        );
        Ok(ack)
    }
}
