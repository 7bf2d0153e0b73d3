// src/renderer/scroll.rs
use std::thread;

use serde_json::Value;

use super::Renderer;
use crate::config::Timing;
use crate::error::{Result, ScrapeError};

const HEIGHT_SCRIPT: &str = "return document.body.scrollHeight";

/// Walk the page top to bottom in fixed steps until two passes in a row see
/// the same scrollable height. Lazy-loaded listings only render once they
/// have been scrolled past, so jumping straight to the bottom is not enough.
///
/// Returns the number of passes made. There is no pass limit: a page that
/// keeps growing keeps being scrolled.
pub fn scroll_to_stable_bottom<R: Renderer + ?Sized>(renderer: &mut R, timing: &Timing) -> Result<u32> {
    let step = timing.scroll_step_px.max(1) as usize;
    let mut last_height = page_height(renderer)?;
    let mut passes = 0u32;

    loop {
        for y in (0..last_height).step_by(step) {
            renderer.execute(&format!("window.scrollTo(0, {y});"))?;
            thread::sleep(timing.scroll_step_delay);
        }
        passes += 1;

        // let async content land
        thread::sleep(timing.scroll_settle);

        let new_height = page_height(renderer)?;
        tracing::debug!(pass = passes, last_height, new_height, "scroll pass");
        if new_height == last_height {
            return Ok(passes);
        }
        last_height = new_height;
    }
}

fn page_height<R: Renderer + ?Sized>(renderer: &mut R) -> Result<u64> {
    match renderer.execute(HEIGHT_SCRIPT)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| ScrapeError::Script(format!("non-positive scroll height {n}"))),
        other => Err(ScrapeError::Script(format!("non-numeric scroll height {other}"))),
    }
}
