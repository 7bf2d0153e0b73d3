// tests/common/mod.rs
//
// In-memory stand-in for a browser: a list of pages, a next-page control
// that may or may not exist on each, and a page height that grows a few
// times before settling.
#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{json, Value};

use quicket_scrape::config::consts::{LISTING_SELECTOR, NEXT_PAGE_SELECTOR};
use quicket_scrape::config::{RunConfig, Timing};
use quicket_scrape::error::RenderError;
use quicket_scrape::renderer::{Element, RenderResult, Renderer};

pub struct FakePage {
    pub markup: String,
    pub has_next: bool,
    /// Heights reported by successive `scrollHeight` reads; the last repeats.
    pub heights: Vec<u64>,
    /// Whether the next-page control, when present, reports as clickable.
    pub interactable: bool,
    /// W3C error code the next-page click fails with, if any.
    pub click_error: Option<&'static str>,
}

impl FakePage {
    pub fn new(markup: String, has_next: bool) -> Self {
        Self { markup, has_next, heights: vec![300], interactable: true, click_error: None }
    }
}

#[derive(Default)]
pub struct FakeSite {
    pub pages: Vec<FakePage>,
    pub current: usize,
    pub navigated_to: Vec<String>,
    pub clicks: usize,
    pub scroll_calls: Vec<u64>,
    pub height_reads: usize,
    pub terminated: usize,
    /// When set, `current_markup` fails on this 0-based page.
    pub markup_error_on: Option<usize>,
}

impl FakeSite {
    pub fn new(pages: Vec<FakePage>) -> Self {
        Self { pages, ..Self::default() }
    }

    fn page(&self) -> &FakePage {
        &self.pages[self.current]
    }
}

impl Renderer for FakeSite {
    fn navigate(&mut self, url: &str) -> RenderResult<()> {
        self.navigated_to.push(url.to_string());
        self.current = 0;
        Ok(())
    }

    fn execute(&mut self, script: &str) -> RenderResult<Value> {
        if script.contains("scrollHeight") {
            let heights = &self.page().heights;
            let h = heights[self.height_reads.min(heights.len() - 1)];
            self.height_reads += 1;
            return Ok(json!(h));
        }
        if let Some(rest) = script.strip_prefix("window.scrollTo(0, ") {
            let y = rest.trim_end_matches(");").parse().unwrap();
            self.scroll_calls.push(y);
        }
        Ok(Value::Null)
    }

    fn current_markup(&mut self) -> RenderResult<String> {
        if self.markup_error_on == Some(self.current) {
            return Err(RenderError::Transport("connection reset".into()));
        }
        Ok(self.page().markup.clone())
    }

    fn find(&mut self, selector: &str) -> RenderResult<Option<Element>> {
        Ok(self.find_all(selector)?.into_iter().next())
    }

    fn find_all(&mut self, selector: &str) -> RenderResult<Vec<Element>> {
        let page = self.page();
        let found = match selector {
            LISTING_SELECTOR => page.markup.matches("l-event-item").count(),
            NEXT_PAGE_SELECTOR => usize::from(page.has_next),
            _ => 0,
        };
        Ok((0..found).map(|i| Element::new(format!("{selector}#{i}"))).collect())
    }

    fn is_interactable(&mut self, _element: &Element) -> RenderResult<bool> {
        Ok(self.page().interactable)
    }

    fn click(&mut self, element: &Element) -> RenderResult<()> {
        if !element.id().starts_with(NEXT_PAGE_SELECTOR) || !self.page().has_next {
            return Err(RenderError::command("element click intercepted", "not clickable"));
        }
        if let Some(code) = self.page().click_error {
            return Err(RenderError::command(code, "click failed"));
        }
        self.clicks += 1;
        self.current += 1;
        self.height_reads = 0;
        Ok(())
    }

    fn scroll_into_view(&mut self, _element: &Element) -> RenderResult<()> {
        Ok(())
    }

    fn terminate(&mut self) -> RenderResult<()> {
        self.terminated += 1;
        Ok(())
    }
}

/// `<li class="l-event-item">` with the given parts; `None` leaves a part out.
pub fn listing(title: Option<&str>, venue: Option<&str>, dates: &[&str]) -> String {
    let mut s = String::from(r#"<li class="l-event-item">"#);
    if let Some(t) = title {
        s.push_str(&format!(r#"<div class="l-hit">{t}</div>"#));
    }
    if let Some(v) = venue {
        s.push_str(&format!(r#"<div class="l-hit-venue">{v}</div>"#));
    }
    for d in dates {
        s.push_str(&format!(r#"<div class="l-date">{d}</div>"#));
    }
    s.push_str("</li>");
    s
}

pub fn results_page(listings: &[String]) -> String {
    format!(
        r#"<html><body><ul class="l-results">{}</ul><i class="fa-solid fa-angle-right l-icon"></i></body></html>"#,
        listings.concat()
    )
}

/// Page `n` with `count` well-formed listings titled "P{n} E{i}".
pub fn numbered_page(n: usize, count: usize) -> String {
    let items: Vec<String> = (0..count)
        .map(|i| listing(Some(format!("P{n} E{i}").as_str()), Some("Venue"), &["Runs from 1 Jan 2025", "19:00"]))
        .collect();
    results_page(&items)
}

pub fn test_config(pages: u32, output: PathBuf) -> RunConfig {
    RunConfig {
        page_count: pages,
        output,
        base_url: "http://fake.test/events/".into(),
        timing: Timing::zero(),
        ..RunConfig::default()
    }
}
