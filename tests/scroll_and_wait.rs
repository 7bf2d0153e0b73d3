// tests/scroll_and_wait.rs
mod common;

use std::time::{Duration, Instant};

use common::{numbered_page, FakePage, FakeSite};
use quicket_scrape::config::Timing;
use quicket_scrape::error::{RenderError, ScrapeError};
use quicket_scrape::renderer::scroll::scroll_to_stable_bottom;
use quicket_scrape::renderer::wait::{await_condition, listing_present, next_control_ready};

#[test]
fn wait_returns_once_probe_succeeds() {
    let mut fake = FakeSite::new(vec![FakePage::new(numbered_page(1, 1), true)]);
    let mut calls = 0;

    let got = await_condition(&mut fake, "third time lucky", Duration::from_secs(5), Duration::from_millis(1), |_| {
        calls += 1;
        Ok((calls == 3).then_some(calls))
    })
    .unwrap();

    assert_eq!(got, 3);
}

#[test]
fn wait_times_out_after_deadline() {
    let mut fake = FakeSite::new(vec![FakePage::new(String::new(), false)]);
    let timeout = Duration::from_millis(30);
    let start = Instant::now();

    let err = await_condition(&mut fake, "event listings", timeout, Duration::from_millis(5), listing_present)
        .unwrap_err();

    assert!(start.elapsed() >= timeout);
    match err {
        ScrapeError::Timeout { condition, waited } => {
            assert_eq!(condition, "event listings");
            assert!(waited >= timeout);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_timeout_still_probes_once() {
    let mut fake = FakeSite::new(vec![FakePage::new(numbered_page(1, 2), true)]);
    assert!(await_condition(&mut fake, "listings", Duration::ZERO, Duration::ZERO, listing_present).is_ok());
    assert!(await_condition(&mut fake, "next", Duration::ZERO, Duration::ZERO, next_control_ready).is_ok());
}

#[test]
fn probe_errors_are_not_retried() {
    let mut fake = FakeSite::new(vec![FakePage::new(String::new(), false)]);
    let mut calls = 0;

    let err = await_condition::<_, (), _>(&mut fake, "broken", Duration::from_secs(5), Duration::ZERO, |_| {
        calls += 1;
        Err(RenderError::Transport("gone".into()).into())
    })
    .unwrap_err();

    assert!(matches!(err, ScrapeError::Render(_)));
    assert_eq!(calls, 1);
}

#[test]
fn scroller_stops_when_height_repeats() {
    let mut page = FakePage::new(String::new(), false);
    page.heights = vec![200, 200];
    let mut fake = FakeSite::new(vec![page]);

    let passes = scroll_to_stable_bottom(&mut fake, &Timing::zero()).unwrap();

    assert_eq!(passes, 1);
    assert_eq!(fake.scroll_calls, [0, 100]);
}

#[test]
fn scroller_follows_growing_page() {
    let mut page = FakePage::new(String::new(), false);
    page.heights = vec![100, 150, 300, 300];
    let mut fake = FakeSite::new(vec![page]);
    let timing = Timing { scroll_step_px: 50, ..Timing::zero() };

    let passes = scroll_to_stable_bottom(&mut fake, &timing).unwrap();

    assert_eq!(passes, 3);
    assert_eq!(fake.scroll_calls, [0, 50, 0, 50, 100, 0, 50, 100, 150, 200, 250]);
    assert_eq!(fake.height_reads, 4);
}
