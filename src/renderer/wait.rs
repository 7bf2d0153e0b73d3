// src/renderer/wait.rs
use std::thread;
use std::time::{Duration, Instant};

use super::{Element, Renderer};
use crate::config::consts::{LISTING_SELECTOR, NEXT_PAGE_SELECTOR};
use crate::error::{Result, ScrapeError};

/// Poll `probe` until it yields a value or `timeout` elapses.
///
/// The probe always runs at least once, so a zero timeout still checks the
/// page. Renderer errors from the probe are returned immediately; there are
/// no internal retries beyond the polling itself.
pub fn await_condition<R, T, F>(
    renderer: &mut R,
    condition: &'static str,
    timeout: Duration,
    poll: Duration,
    mut probe: F,
) -> Result<T>
where
    R: Renderer + ?Sized,
    F: FnMut(&mut R) -> Result<Option<T>>,
{
    let start = Instant::now();
    loop {
        if let Some(found) = probe(renderer)? {
            return Ok(found);
        }

        let waited = start.elapsed();
        if waited >= timeout {
            tracing::debug!(condition, ?waited, "wait timed out");
            return Err(ScrapeError::Timeout { condition, waited });
        }

        // Never sleep past the deadline.
        thread::sleep(poll.min(timeout - waited));
    }
}

/// Page-ready: at least one listing item is in the DOM.
pub fn listing_present<R: Renderer + ?Sized>(renderer: &mut R) -> Result<Option<Element>> {
    Ok(renderer.find(LISTING_SELECTOR)?)
}

/// Navigation-ready: the next-page control exists and can be clicked.
pub fn next_control_ready<R: Renderer + ?Sized>(renderer: &mut R) -> Result<Option<Element>> {
    match renderer.find(NEXT_PAGE_SELECTOR)? {
        Some(el) if renderer.is_interactable(&el)? => Ok(Some(el)),
        _ => Ok(None),
    }
}
