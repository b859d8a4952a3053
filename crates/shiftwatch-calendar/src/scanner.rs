//! Calendar scanning — fetch pages in order and locate the column whose
//! header matches the target date.
//!
//! `scraper::Html` is not `Send`, so all document work happens inside
//! synchronous helpers; page bodies are the only thing crossing an await.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use shiftwatch_core::error::{Result, ShiftwatchError};
use shiftwatch_core::types::{DateColumn, RawShiftEntry};
use shiftwatch_session::MemberSession;

use crate::dates;

/// How many calendar pages the site exposes ahead; the scan never goes
/// past this bound.
pub const PAGE_LIMIT: usize = 6;

/// Class marking a shift the member has already signed up for.
const CLAIMED_CLASS: &str = "my_shift";

struct Selectors {
    grid: Selector,
    header: Selector,
    entry: Selector,
    time: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            grid: parse_selector("div.grid-container")?,
            header: parse_selector("p b")?,
            entry: parse_selector("a.shift")?,
            time: parse_selector("b")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ShiftwatchError::Parse(format!("selector {css:?}: {e}")))
}

/// Scan up to [`PAGE_LIMIT`] pages for the target date's column. Returns
/// `Ok(None)` when no page carries it; the caller decides whether that is
/// fatal.
pub async fn find_column(
    session: &MemberSession,
    target_date: NaiveDate,
) -> Result<Option<DateColumn>> {
    for page in 0..PAGE_LIMIT {
        let body = session.fetch_calendar_page(page).await?;
        if let Some(column) = extract_column(&body, target_date)? {
            tracing::info!("Found shifts page for chosen date on page {page}");
            return Ok(Some(column));
        }
    }
    Ok(None)
}

/// Pull the target date's column out of one page body. First match in
/// document order wins; a duplicate column would be a data anomaly and gets
/// no special handling.
pub fn extract_column(body: &str, target_date: NaiveDate) -> Result<Option<DateColumn>> {
    let selectors = Selectors::new()?;
    let document = Html::parse_document(body);

    let Some(grid) = document.select(&selectors.grid).next() else {
        return Ok(None);
    };

    for child in grid.children() {
        let Some(column) = ElementRef::wrap(child) else {
            continue;
        };
        if !column.value().classes().any(|class| class == "col") {
            continue;
        }

        let Some(header) = column.select(&selectors.header).next() else {
            continue;
        };
        let header_text: String = header.text().collect();
        let column_date = match dates::parse_date(&header_text) {
            Ok(date) => date,
            Err(_) => {
                tracing::debug!("Skipping column with unreadable header {header_text:?}");
                continue;
            }
        };
        tracing::debug!("Date for current column is {column_date}");

        if column_date == target_date {
            let entries = column
                .select(&selectors.entry)
                .map(|entry| raw_entry(entry, &selectors))
                .collect();
            return Ok(Some(DateColumn {
                date: column_date,
                entries,
            }));
        }
    }

    Ok(None)
}

fn raw_entry(entry: ElementRef<'_>, selectors: &Selectors) -> RawShiftEntry {
    let claimed = entry.value().classes().any(|class| class == CLAIMED_CLASS);
    let time_text = entry
        .select(&selectors.time)
        .next()
        .map(|b| b.text().collect::<String>())
        .unwrap_or_default();
    RawShiftEntry {
        time_text,
        name_text: entry_name_text(entry),
        claimed,
    }
}

/// Everything in the anchor except its `<b>` time label.
fn entry_name_text(entry: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in entry.children() {
        if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() == "b" {
                continue;
            }
            out.extend(element.text());
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    out
}
