// src/scrape.rs
use std::path::PathBuf;
use std::thread;

use crate::{
    config::{RunConfig, Timing},
    error::Result,
    file::{CsvSink, Sink},
    progress::Progress,
    renderer::{
        scroll::scroll_to_stable_bottom,
        wait::{await_condition, listing_present, next_control_ready},
        webdriver::WebDriver,
        Renderer, Session,
    },
    specs::events::{parse_listings, PageSnapshot},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageState {
    AwaitingPage,
    Extracting,
    Advancing,
    Done,
    Aborted,
}

/// How pagination ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stop {
    /// Every configured page was visited.
    Completed,
    /// The next-page control was missing or unusable after `after_page`.
    NoMorePages { after_page: u32, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationReport {
    pub pages_visited: u32,
    pub records_written: usize,
    pub records_skipped: usize,
    pub stop: Stop,
}

/// Final state of a whole run, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Finished(PaginationReport),
    /// The run hit an error it could not recover from. Rows written before
    /// the error are still in the output.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub outcome: RunOutcome,
}

impl RunSummary {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, RunOutcome::Failed(_))
    }
}

fn log_state(page: u32, state: PageState) {
    tracing::debug!(page, ?state, "pagination state");
}

/* ---------------- Pagination controller ---------------- */

/// Visit pages 1..=N starting at `config.base_url`: wait for listings,
/// extract, write, then scroll and click through to the next page.
///
/// A page that never shows listings is fatal (`ScrapeError::Timeout`).
/// A next-page control that never becomes clickable ends pagination early
/// with [`Stop::NoMorePages`]; records already written stay written.
pub fn paginate<R, S>(
    renderer: &mut R,
    sink: &mut S,
    config: &RunConfig,
    progress: &mut dyn Progress,
) -> Result<PaginationReport>
where
    R: Renderer + ?Sized,
    S: Sink + ?Sized,
{
    let timing = &config.timing;
    let mut report = PaginationReport {
        pages_visited: 0,
        records_written: 0,
        records_skipped: 0,
        stop: Stop::Completed,
    };

    progress.begin(config.page_count);
    renderer.navigate(&config.base_url)?;

    let mut page = 1u32;
    let mut state = PageState::AwaitingPage;

    loop {
        log_state(page, state);
        state = match state {
            PageState::AwaitingPage => {
                progress.log(&format!("Scraping page {page}"));
                await_condition(
                    renderer,
                    "event listings",
                    timing.page_load_timeout,
                    timing.poll_interval,
                    listing_present,
                )?;
                PageState::Extracting
            }

            PageState::Extracting => {
                thread::sleep(timing.render_settle);
                let snapshot = PageSnapshot::new(renderer.current_markup()?);
                let found = parse_listings(&snapshot, page);
                progress.log(&format!("Found {} events on page {page}", found.listings));

                for skipped in &found.skipped {
                    tracing::warn!(page, index = skipped.index, error = %skipped.error, listing = %skipped.excerpt, "skipped listing");
                    progress.log(&format!("Error extracting event details: {}", skipped.error));
                }
                for record in &found.records {
                    sink.write_record(record)?;
                }
                sink.flush()?;

                report.pages_visited = page;
                report.records_written += found.records.len();
                report.records_skipped += found.skipped.len();
                progress.page_done(page, found.records.len());
                tracing::info!(page, records = found.records.len(), skipped = found.skipped.len(), "page extracted");

                if page < config.page_count {
                    PageState::Advancing
                } else {
                    next_page(&mut page, timing, config.page_count)
                }
            }

            PageState::Advancing => match advance(renderer, timing) {
                Ok(()) => next_page(&mut page, timing, config.page_count),
                Err(e) if e.is_navigation() => {
                    tracing::info!(page, error = %e, "no next page");
                    progress.log(&format!("Navigation error: {e}"));
                    progress.log("No more pages available");
                    report.stop = Stop::NoMorePages { after_page: page, reason: e.to_string() };
                    PageState::Aborted
                }
                Err(e) => return Err(e),
            },

            PageState::Done | PageState::Aborted => break,
        };
    }

    Ok(report)
}

/// Scroll the current page out, then click through to the next one.
fn advance<R: Renderer + ?Sized>(renderer: &mut R, timing: &Timing) -> Result<()> {
    scroll_to_stable_bottom(renderer, timing)?;

    let next = await_condition(
        renderer,
        "next page control",
        timing.page_load_timeout,
        timing.poll_interval,
        next_control_ready,
    )?;
    renderer.scroll_into_view(&next)?;
    thread::sleep(timing.nav_settle);
    renderer.click(&next)?;

    thread::sleep(timing.post_click_delay.sample());
    Ok(())
}

/// Inter-page pause, then move the counter on.
fn next_page(page: &mut u32, timing: &Timing, page_count: u32) -> PageState {
    thread::sleep(timing.inter_page_delay.sample());
    *page += 1;
    if *page > page_count { PageState::Done } else { PageState::AwaitingPage }
}

/* ---------------- Run wrappers ---------------- */

/// Full run against a real browser: open a WebDriver session, scrape into
/// `config.output`, close the session.
///
/// Setup failures (bad config, no driver) are returned as `Err`. Anything
/// that goes wrong once the browser is up is logged and reported in
/// [`RunSummary::outcome`] instead.
pub fn run(config: &RunConfig, progress: &mut dyn Progress) -> Result<RunSummary> {
    config.validate()?;
    tracing::info!(
        browser = %config.browser,
        headless = config.headless,
        pages = config.page_count,
        webdriver = %config.webdriver_url,
        "starting browser"
    );
    let driver = WebDriver::launch(&config.webdriver_url, config.browser, config.headless)?;
    Ok(run_with(driver, config, progress))
}

/// Run with any renderer. The renderer is terminated before this returns,
/// whatever happened.
pub fn run_with<R: Renderer>(renderer: R, config: &RunConfig, progress: &mut dyn Progress) -> RunSummary {
    let output = config.output_path().to_path_buf();

    let outcome = {
        let mut session = Session::new(renderer);
        let result = scrape_to_file(&mut *session, config, progress);
        if let Err(e) = session.close() {
            tracing::warn!(error = %e, "failed to terminate renderer");
        }

        match result {
            Ok(report) => {
                if let Stop::NoMorePages { after_page, .. } = &report.stop {
                    tracing::info!(after_page, "stopped early");
                }
                RunOutcome::Finished(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "run failed");
                progress.log(&format!("An error occurred: {e}"));
                RunOutcome::Failed(e.to_string())
            }
        }
    };

    let done = format!("Scraping complete. Data saved to {}", output.display());
    tracing::info!(output = %output.display(), "scraping complete");
    progress.log(&done);
    progress.finish();

    RunSummary { output, outcome }
}

fn scrape_to_file<R: Renderer + ?Sized>(
    renderer: &mut R,
    config: &RunConfig,
    progress: &mut dyn Progress,
) -> Result<PaginationReport> {
    let mut sink = CsvSink::create(config.output_path())?;
    let report = paginate(renderer, &mut sink, config, progress)?;
    debug_assert_eq!(sink.rows(), report.records_written);
    sink.finish()?;
    Ok(report)
}

