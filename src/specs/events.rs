// src/specs/events.rs
//! Listing extractor for the events results page.
//!
//! Shape of one listing on the site (classes are what matter, nesting varies):
//! ```text
//! <li class="l-event-item">
//!   <div class="l-hit">Title</div>
//!   <div class="l-hit-venue">Venue</div>
//!   <div class="l-date">Runs from 12 May 2024</div>
//!   <div class="l-date">18:00</div>
//! </li>
//! ```
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::{
    DATE_PREFIX, DATE_SELECTOR, HEADERS, LISTING_SELECTOR, MISSING, TITLE_SELECTOR, VENUE_SELECTOR,
};
use crate::core::sanitize::{clean_text, normalize_ws, strip_phrase};
use crate::error::ExtractError;

static LISTING: LazyLock<Selector> = LazyLock::new(|| selector(LISTING_SELECTOR));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(TITLE_SELECTOR));
static VENUE: LazyLock<Selector> = LazyLock::new(|| selector(VENUE_SELECTOR));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector(DATE_SELECTOR));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// One event as listed on a results page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub title: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub page_number: u32,
}

impl EventRecord {
    pub fn headers() -> Vec<String> {
        HEADERS.iter().map(|h| h.to_string()).collect()
    }

    /// Row in output column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.location.clone(),
            self.date.clone(),
            self.time.clone(),
            self.page_number.to_string(),
        ]
    }
}

/// Rendered markup captured from the browser at one moment.
/// Take a fresh one after every scroll or navigation.
#[derive(Clone, Debug)]
pub struct PageSnapshot {
    markup: String,
}

impl PageSnapshot {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { markup: markup.into() }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// A listing that could not be turned into a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    /// 0-based position among the page's listings.
    pub index: usize,
    pub error: ExtractError,
    /// Short excerpt of the listing's text, for the log line.
    pub excerpt: String,
}

/// Everything found in one snapshot, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageListings {
    pub listings: usize,
    pub records: Vec<EventRecord>,
    pub skipped: Vec<Skipped>,
}

/// Records for every well-formed listing in `snapshot`. Bad listings are
/// logged and dropped; they never affect their siblings.
pub fn extract(snapshot: &PageSnapshot, page_number: u32) -> Vec<EventRecord> {
    let page = parse_listings(snapshot, page_number);
    for s in &page.skipped {
        tracing::warn!(page = page_number, index = s.index, error = %s.error, listing = %s.excerpt, "skipped listing");
    }
    page.records
}

/// Like [`extract`], but hands back the skipped listings instead of logging them.
pub fn parse_listings(snapshot: &PageSnapshot, page_number: u32) -> PageListings {
    let doc = Html::parse_document(snapshot.markup());
    let mut out = PageListings::default();

    for (index, item) in doc.select(&LISTING).enumerate() {
        out.listings += 1;
        match extract_one(item, page_number) {
            Ok(rec) => out.records.push(rec),
            Err(error) => out.skipped.push(Skipped { index, error, excerpt: excerpt(item) }),
        }
    }
    out
}

fn extract_one(item: ElementRef<'_>, page_number: u32) -> Result<EventRecord, ExtractError> {
    let title = first_text(item, &TITLE).ok_or(ExtractError::MissingField("title"))?;
    let location = first_text(item, &VENUE).ok_or(ExtractError::MissingField("location"))?;

    let dates: Vec<String> = item.select(&DATE).take(2).map(text_of).collect();
    let (date, time) = match dates.as_slice() {
        [first, second] => (strip_phrase(first, DATE_PREFIX), clean_text(second)),
        _ => (MISSING.to_string(), MISSING.to_string()),
    };

    Ok(EventRecord { title, location, date, time, page_number })
}

fn first_text(item: ElementRef<'_>, sel: &Selector) -> Option<String> {
    item.select(sel).next().map(|el| clean_text(text_of(el)))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

fn excerpt(item: ElementRef<'_>) -> String {
    let text = normalize_ws(&text_of(item));
    match text.char_indices().nth(60) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text,
    }
}
