//! Match notification with send throttling.
//!
//! Sending is best-effort: the send timestamp is recorded on every attempt,
//! even when the gateway reports failure.

use std::time::{Duration, Instant};

use shiftwatch_core::types::Shift;
use shiftwatch_core::urls::{BASE_URL, SHIFTS_PATH};

use crate::textbelt::SmsClient;

/// Longest shift list that still fits a single text.
pub const MAX_SMS_BODY: usize = 95;

/// Minimum gap between two outbound texts.
pub const RESEND_INTERVAL: Duration = Duration::from_secs(60 * 60);

const OVERSIZE_PLACEHOLDER: &str = "(too many shifts for text)";

/// Last-send bookkeeping. Single writer, process lifetime.
#[derive(Debug, Default)]
pub struct ThrottleState {
    last_sent: Option<Instant>,
}

impl ThrottleState {
    /// True when nothing has been sent yet, or a full interval has elapsed.
    pub fn ready(&self, now: Instant, interval: Duration) -> bool {
        match self.last_sent {
            None => true,
            Some(at) => now.duration_since(at) >= interval,
        }
    }

    pub fn mark_sent(&mut self, now: Instant) {
        self.last_sent = Some(now);
    }
}

/// One line per shift. An oversize block collapses to a placeholder instead
/// of a truncated, misleading list.
pub fn render_body(shifts: &[Shift]) -> String {
    let block = shifts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    if block.len() <= MAX_SMS_BODY {
        block
    } else {
        OVERSIZE_PLACEHOLDER.into()
    }
}

/// The full text: header, shift block, and a link back to the calendar.
pub fn render_message(shifts: &[Shift]) -> String {
    format!(
        "Coop shifts available! \n{}\n\nCheck now: {BASE_URL}{SHIFTS_PATH}",
        render_body(shifts)
    )
}

/// Sends match notifications, at most one per [`RESEND_INTERVAL`].
pub struct ShiftNotifier {
    sms: SmsClient,
    phone: String,
    throttle: ThrottleState,
}

impl ShiftNotifier {
    pub fn new(sms: SmsClient, phone: impl Into<String>) -> Self {
        Self {
            sms,
            phone: phone.into(),
            throttle: ThrottleState::default(),
        }
    }

    /// Text the matches if the throttle allows it; otherwise suppress with a
    /// log line. Gateway and transport failures are logged, never escalated.
    pub async fn maybe_notify(&mut self, shifts: &[Shift]) {
        let now = Instant::now();
        if !self.throttle.ready(now, RESEND_INTERVAL) {
            tracing::info!("Not sending text — inside the throttle window");
            return;
        }

        tracing::info!("Sending text message about {} matching shift(s)", shifts.len());
        match self.sms.send(&self.phone, &render_message(shifts)).await {
            Ok(ack) if ack.success => tracing::info!("Text delivered"),
            Ok(ack) => tracing::warn!(
                "Gateway rejected the text: {}",
                ack.error.unwrap_or_else(|| "unknown error".into())
            ),
            Err(e) => tracing::warn!("Text send failed: {e}"),
        }
        self.throttle.mark_sent(now);
    }
}
