//! Member-site and gateway endpoints.

use chrono::NaiveDate;

/// Member site root.
pub const BASE_URL: &str = "https://members.foodcoop.com";

/// Login form, relative to [`BASE_URL`].
pub const LOGIN_PATH: &str = "/services/login/";

/// Shift calendar, relative to [`BASE_URL`].
pub const SHIFTS_PATH: &str = "/services/shifts";

/// Name of the anti-forgery form field on the login page.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Textbelt SMS gateway.
pub const TEXTBELT_URL: &str = "https://textbelt.com/text";

/// Calendar page URL for the given zero-based page index, anchored at `from`.
pub fn calendar_page_url(page: usize, from: NaiveDate) -> String {
    format!("{BASE_URL}{SHIFTS_PATH}/{page}/0/{}", from.format("%Y-%m-%d"))
}
