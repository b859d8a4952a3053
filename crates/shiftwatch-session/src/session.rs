//! Authenticated member-site session.
//!
//! Login is a two-step handshake: fetch the login form, lift the anti-forgery
//! token out of it, then post the credentials with that token. A session
//! restored from disk gets one liveness probe before it is trusted; a probe
//! that comes back unauthenticated discards it and logs in fresh.

use std::sync::Arc;

use chrono::Local;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use scraper::{Html, Selector};
use shiftwatch_core::config::WatchConfig;
use shiftwatch_core::error::{Result, ShiftwatchError};
use shiftwatch_core::urls::{BASE_URL, CSRF_FIELD, LOGIN_PATH, calendar_page_url};

use crate::store::{SavedSession, SessionStore};

/// Marker present on every authenticated calendar page; the login redirect
/// does not carry it.
const AUTH_MARKER: &str = "Shift Calendar";

/// A logged-in handle to the member site.
pub struct MemberSession {
    client: reqwest::Client,
    jar: Arc<Jar>,
}

impl MemberSession {
    /// Acquire a working session: restore-and-probe when one is on disk,
    /// otherwise perform a fresh login handshake (no probe).
    pub async fn acquire(config: &WatchConfig) -> Result<Self> {
        let saved = {
            let store = SessionStore::open(&config.store_path)?;
            store.load()?
        };

        match saved {
            None => {
                tracing::info!("Creating new session");
                let session = Self::from_cookies(&[])?;
                session.login(config).await?;
                Ok(session)
            }
            Some(saved) => {
                tracing::info!("Grabbed session from local store");
                let session = Self::from_cookies(&saved.cookies)?;
                if session.is_alive().await? {
                    tracing::info!("Session from store still works");
                    Ok(session)
                } else {
                    tracing::info!("Session from store does not work — creating new one");
                    let fresh = Self::from_cookies(&[])?;
                    fresh.login(config).await?;
                    Ok(fresh)
                }
            }
        }
    }

    /// Persist or discard the session, per the keep-alive flag.
    pub fn release(self, config: &WatchConfig, persist: bool) -> Result<()> {
        let store = SessionStore::open(&config.store_path)?;
        if persist {
            store.save(&self.snapshot()?)?;
            tracing::debug!("Session persisted to store");
        } else {
            store.delete()?;
        }
        Ok(())
    }

    /// Fetch one calendar page (zero-based), anchored at today's date.
    pub async fn fetch_calendar_page(&self, page: usize) -> Result<String> {
        let url = calendar_page_url(page, Local::now().date_naive());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShiftwatchError::Http(format!("fetch calendar page {page}: {e}")))?;
        response
            .text()
            .await
            .map_err(|e| ShiftwatchError::Http(format!("read calendar page {page}: {e}")))
    }

    fn from_cookies(cookies: &[String]) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        if !cookies.is_empty() {
            let url = base_url()?;
            for cookie in cookies {
                jar.add_cookie_str(cookie, &url);
            }
        }
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()
            .map_err(|e| ShiftwatchError::Http(format!("build http client: {e}")))?;
        Ok(Self { client, jar })
    }

    /// The login handshake: fetch form, extract token, post credentials.
    async fn login(&self, config: &WatchConfig) -> Result<()> {
        let login_url = format!("{BASE_URL}{LOGIN_PATH}");

        let form_page = self
            .client
            .get(&login_url)
            .send()
            .await
            .map_err(|e| ShiftwatchError::AuthFailed(format!("fetch login page: {e}")))?
            .text()
            .await
            .map_err(|e| ShiftwatchError::AuthFailed(format!("read login page: {e}")))?;

        let token = extract_csrf_token(&form_page)?;

        let form = [
            ("username", config.credentials.username.as_str()),
            ("password", config.credentials.password.as_str()),
            (CSRF_FIELD, token.as_str()),
            ("Submit", "Log In"),
            ("next", ""),
        ];
        let response = self
            .client
            .post(&login_url)
            .header("Referer", login_url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| ShiftwatchError::AuthFailed(format!("submit login: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShiftwatchError::AuthFailed(format!(
                "login returned status {status}"
            )));
        }
        tracing::info!("Login status code response was: {status}");
        Ok(())
    }

    /// One round-trip probe: an expired session gets the login page back
    /// instead of the calendar.
    async fn is_alive(&self) -> Result<bool> {
        let body = self.fetch_calendar_page(0).await?;
        Ok(looks_authenticated(&body))
    }

    /// Snapshot the cookie jar for persistence.
    fn snapshot(&self) -> Result<SavedSession> {
        let url = base_url()?;
        let cookies = match self.jar.cookies(&url) {
            Some(header) => split_cookie_header(header.to_str().unwrap_or("")),
            None => Vec::new(),
        };
        Ok(SavedSession { cookies })
    }
}

fn base_url() -> Result<Url> {
    Url::parse(BASE_URL).map_err(|e| ShiftwatchError::Http(format!("base url: {e}")))
}

/// Pull the anti-forgery token out of the login form.
fn extract_csrf_token(body: &str) -> Result<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse(&format!("input[name=\"{CSRF_FIELD}\"]"))
        .map_err(|e| ShiftwatchError::Parse(format!("csrf selector: {e}")))?;
    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_owned)
        .ok_or_else(|| ShiftwatchError::AuthFailed("login page had no csrf token".into()))
}

fn looks_authenticated(body: &str) -> bool {
    body.contains(AUTH_MARKER)
}

/// "a=1; b=2" → ["a=1", "b=2"]
fn split_cookie_header(header: &str) -> Vec<String> {
    header
        .split("; ")
        .filter(|pair| !pair.is_empty())
        .map(str::to_owned)
        .collect()
}
