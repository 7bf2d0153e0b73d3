// src/config/options.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;

use super::consts::*;
use crate::error::ScrapeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Firefox,
    Chrome,
}

impl BrowserKind {
    pub fn name(&self) -> &'static str {
        match self { BrowserKind::Firefox => "firefox", BrowserKind::Chrome => "chrome" }
    }

    /// Where the matching driver (geckodriver / chromedriver) listens by default.
    pub fn default_webdriver_url(&self) -> &'static str {
        match self { BrowserKind::Firefox => GECKODRIVER_URL, BrowserKind::Chrome => CHROMEDRIVER_URL }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrowserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firefox" => Ok(BrowserKind::Firefox),
            "chrome" => Ok(BrowserKind::Chrome),
            other => Err(format!("Unknown browser: {} (expected firefox or chrome)", other)),
        }
    }
}

/// Inclusive `[min, max]` range a random pause is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self { min: Duration::from_millis(min), max: Duration::from_millis(max) }
    }

    pub const fn fixed(d: Duration) -> Self {
        Self { min: d, max: d }
    }

    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::rng().random_range(self.min..=self.max)
    }
}

/// Every pause and timeout the run uses. Tests build this with [`Timing::zero`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    pub page_load_timeout: Duration,
    pub poll_interval: Duration,
    pub scroll_step_px: u32,
    pub scroll_step_delay: Duration,
    pub scroll_settle: Duration,
    pub render_settle: Duration,
    pub nav_settle: Duration,
    pub post_click_delay: DelayRange,
    pub inter_page_delay: DelayRange,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            page_load_timeout: Duration::from_millis(PAGE_LOAD_TIMEOUT_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            scroll_step_px: SCROLL_STEP_PX,
            scroll_step_delay: Duration::from_millis(SCROLL_STEP_DELAY_MS),
            scroll_settle: Duration::from_millis(SCROLL_SETTLE_MS),
            render_settle: Duration::from_millis(RENDER_SETTLE_MS),
            nav_settle: Duration::from_millis(NAV_SETTLE_MS),
            post_click_delay: DelayRange::from_millis(POST_CLICK_MIN_MS, POST_CLICK_MAX_MS),
            inter_page_delay: DelayRange::from_millis(PAGE_PAUSE_MIN_MS, PAGE_PAUSE_MAX_MS),
        }
    }
}

impl Timing {
    /// No pauses at all; waits still get one probe before timing out.
    pub fn zero() -> Self {
        Self {
            page_load_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
            scroll_step_px: SCROLL_STEP_PX,
            scroll_step_delay: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            render_settle: Duration::ZERO,
            nav_settle: Duration::ZERO,
            post_click_delay: DelayRange::fixed(Duration::ZERO),
            inter_page_delay: DelayRange::fixed(Duration::ZERO),
        }
    }
}

/// Immutable settings for one run. Built once by the caller, only read afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub page_count: u32,
    pub output: PathBuf,
    pub browser: BrowserKind,
    pub headless: bool,
    pub base_url: String,
    pub webdriver_url: String,
    pub timing: Timing,
}

impl Default for RunConfig {
    fn default() -> Self {
        let browser = BrowserKind::default();
        Self {
            page_count: DEFAULT_PAGES,
            output: PathBuf::from(DEFAULT_OUT_FILE),
            browser,
            headless: DEFAULT_HEADLESS,
            base_url: BASE_URL.to_string(),
            webdriver_url: browser.default_webdriver_url().to_string(),
            timing: Timing::default(),
        }
    }
}

impl RunConfig {
    /// Defaults for `browser`, with the driver endpoint following the browser.
    pub fn for_browser(browser: BrowserKind) -> Self {
        Self {
            browser,
            webdriver_url: browser.default_webdriver_url().to_string(),
            ..Self::default()
        }
    }

    /// Apply `WEBDRIVER_URL` / `QUICKET_BASE_URL` when set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env_nonempty(ENV_WEBDRIVER_URL) {
            self.webdriver_url = url;
        }
        if let Some(url) = env_nonempty(ENV_BASE_URL) {
            self.base_url = url;
        }
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.page_count == 0 {
            return Err(ScrapeError::Config("page count must be at least 1".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ScrapeError::Config("output target is empty".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ScrapeError::Config("base URL is empty".to_string()));
        }
        if self.timing.scroll_step_px == 0 {
            return Err(ScrapeError::Config("scroll step must be at least 1 px".to_string()));
        }
        for (name, range) in [
            ("post-click delay", &self.timing.post_click_delay),
            ("inter-page delay", &self.timing.inter_page_delay),
        ] {
            if range.min > range.max {
                return Err(ScrapeError::Config(format!(
                    "{name} range is inverted ({:?} > {:?})",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
