//! The poll loop — drive session, scan, filter, and notify until the
//! wall-clock timeout elapses.
//!
//! Error routing: authentication failures and a target date missing from the
//! whole calendar abort the run; parse, transport, and store errors abort
//! only the current iteration and the next poll is the retry.

use std::time::Instant;

use shiftwatch_calendar::{scanner, shifts};
use shiftwatch_core::config::WatchConfig;
use shiftwatch_core::error::{Result, ShiftwatchError};
use shiftwatch_core::types::{Shift, WatchRequest};
use shiftwatch_notify::{ShiftNotifier, SmsClient};
use shiftwatch_session::MemberSession;

/// Drives the watch cycle for one target date.
pub struct ShiftWatcher {
    config: WatchConfig,
    request: WatchRequest,
    notifier: ShiftNotifier,
    started: Instant,
}

impl ShiftWatcher {
    pub fn new(config: WatchConfig, request: WatchRequest) -> Self {
        let sms = SmsClient::new(config.sms.clone());
        let notifier = ShiftNotifier::new(sms, request.phone.clone());
        Self {
            config,
            request,
            notifier,
            started: Instant::now(),
        }
    }

    /// Poll until the configured timeout elapses. The loop keeps watching
    /// after a successful notification; the throttle suppresses repeats.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(
            "Watching {} for '{}' shifts starting {}:00-{}:00",
            self.request.target_date,
            self.request.shift_name,
            self.request.start_hour,
            self.request.end_hour,
        );

        while self.started.elapsed() <= self.request.timeout {
            match self.poll_once().await {
                Ok(matches) if matches.is_empty() => {
                    tracing::info!(
                        "No shifts found - will retry in {}s",
                        self.request.sleep_secs
                    );
                }
                Ok(matches) => {
                    println!("====== MATCHING SHIFTS ======");
                    for shift in &matches {
                        println!("{shift}");
                    }
                    self.notifier.maybe_notify(&matches).await;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Poll failed ({e}) - will retry in {}s",
                        self.request.sleep_secs
                    );
                }
            }
            tokio::time::sleep(std::time::Duration::from_secs(self.request.sleep_secs)).await;
        }

        tracing::info!("Timed out! Ending...");
        Ok(())
    }

    /// One acquire → scan → filter → release cycle. The session is released
    /// on every path, persisting per the keep-alive flag.
    async fn poll_once(&self) -> Result<Vec<Shift>> {
        let session = MemberSession::acquire(&self.config).await?;
        let outcome = self.scan(&session).await;
        if let Err(e) = session.release(&self.config, self.request.keep_session_alive) {
            tracing::warn!("Failed to release session: {e}");
        }
        outcome
    }

    async fn scan(&self, session: &MemberSession) -> Result<Vec<Shift>> {
        let column = scanner::find_column(session, self.request.target_date)
            .await?
            .ok_or_else(|| {
                ShiftwatchError::DateNotFound(self.request.target_date.to_string())
            })?;
        shifts::matching_shifts(
            &column,
            self.request.start_hour,
            self.request.end_hour,
            &self.request.shift_name,
        )
    }
}
