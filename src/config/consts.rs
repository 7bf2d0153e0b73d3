// src/config/consts.rs

// Target site
pub const BASE_URL: &str = "https://www.quicket.co.za/events/";
pub const LISTING_SELECTOR: &str = "li.l-event-item";
pub const TITLE_SELECTOR: &str = "div.l-hit";
pub const VENUE_SELECTOR: &str = "div.l-hit-venue";
pub const DATE_SELECTOR: &str = "div.l-date";
pub const NEXT_PAGE_SELECTOR: &str = "i.fa-solid.fa-angle-right.l-icon";
pub const DATE_PREFIX: &str = "Runs from";
pub const MISSING: &str = "N/A";

// Browser
pub const DEFAULT_HEADLESS: bool = true;
pub const GECKODRIVER_URL: &str = "http://localhost:4444";
pub const CHROMEDRIVER_URL: &str = "http://localhost:9515";
pub const ENV_WEBDRIVER_URL: &str = "WEBDRIVER_URL";
pub const ENV_BASE_URL: &str = "QUICKET_BASE_URL";

// Scrape
pub const DEFAULT_PAGES: u32 = 10;
pub const DEFAULT_OUT_FILE: &str = "quicket_events.csv";

// Timing (ms)
pub const PAGE_LOAD_TIMEOUT_MS: u64 = 10_000;
pub const POLL_INTERVAL_MS: u64 = 250;
pub const SCROLL_STEP_PX: u32 = 100;
pub const SCROLL_STEP_DELAY_MS: u64 = 100;
pub const SCROLL_SETTLE_MS: u64 = 2_000;
pub const RENDER_SETTLE_MS: u64 = 2_000;
pub const NAV_SETTLE_MS: u64 = 1_000;
pub const POST_CLICK_MIN_MS: u64 = 2_000;
pub const POST_CLICK_MAX_MS: u64 = 4_000;
pub const PAGE_PAUSE_MIN_MS: u64 = 1_000; // be polite
pub const PAGE_PAUSE_MAX_MS: u64 = 3_000;

// Output
pub const HEADERS: [&str; 5] = [
    "Event Title",
    "Event Location",
    "Event Date",
    "Event Time",
    "Page Number",
];
