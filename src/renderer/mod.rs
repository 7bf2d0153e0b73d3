// src/renderer/mod.rs
//! # Page renderer
//!
//! A controllable browser the scraper drives: navigate, run script, read the
//! rendered markup, locate and click elements. The pagination loop only ever
//! talks to [`Renderer`], so tests swap in an in-memory site and production
//! uses the WebDriver client in [`webdriver`].
//!
//! - `wait`   – polling for a DOM condition with a timeout.
//! - `scroll` – progressive scrolling until the page height stops growing.
//!
//! [`Session`] owns a renderer for the length of a run and terminates it on
//! drop, so the browser goes away on every exit path.
use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::error::RenderError;

pub mod scroll;
pub mod wait;
pub mod webdriver;

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Opaque handle to an element in the current document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element {
    id: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

pub trait Renderer {
    fn navigate(&mut self, url: &str) -> RenderResult<()>;

    /// Run `script` in the page; its `return` value comes back as JSON.
    fn execute(&mut self, script: &str) -> RenderResult<Value>;

    fn current_markup(&mut self) -> RenderResult<String>;

    /// `Ok(None)` when nothing matches the CSS selector.
    fn find(&mut self, selector: &str) -> RenderResult<Option<Element>>;

    fn find_all(&mut self, selector: &str) -> RenderResult<Vec<Element>>;

    /// Displayed and enabled.
    fn is_interactable(&mut self, element: &Element) -> RenderResult<bool>;

    fn click(&mut self, element: &Element) -> RenderResult<()>;

    fn scroll_into_view(&mut self, element: &Element) -> RenderResult<()>;

    /// Shut the browser down. Calling it again must be harmless.
    fn terminate(&mut self) -> RenderResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn navigate(&mut self, url: &str) -> RenderResult<()> { (**self).navigate(url) }
    fn execute(&mut self, script: &str) -> RenderResult<Value> { (**self).execute(script) }
    fn current_markup(&mut self) -> RenderResult<String> { (**self).current_markup() }
    fn find(&mut self, selector: &str) -> RenderResult<Option<Element>> { (**self).find(selector) }
    fn find_all(&mut self, selector: &str) -> RenderResult<Vec<Element>> { (**self).find_all(selector) }
    fn is_interactable(&mut self, element: &Element) -> RenderResult<bool> { (**self).is_interactable(element) }
    fn click(&mut self, element: &Element) -> RenderResult<()> { (**self).click(element) }
    fn scroll_into_view(&mut self, element: &Element) -> RenderResult<()> { (**self).scroll_into_view(element) }
    fn terminate(&mut self) -> RenderResult<()> { (**self).terminate() }
}

/// Owns a renderer for one run and terminates it when dropped.
pub struct Session<R: Renderer> {
    inner: R,
    closed: bool,
}

impl<R: Renderer> Session<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, closed: false }
    }

    /// Terminate now and report the outcome; drop will not try again.
    pub fn close(mut self) -> RenderResult<()> {
        self.closed = true;
        self.inner.terminate()
    }
}

impl<R: Renderer> Deref for Session<R> {
    type Target = R;
    fn deref(&self) -> &R { &self.inner }
}

impl<R: Renderer> DerefMut for Session<R> {
    fn deref_mut(&mut self) -> &mut R { &mut self.inner }
}

impl<R: Renderer> Drop for Session<R> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.inner.terminate() {
            tracing::warn!(error = %e, "failed to terminate renderer");
        }
    }
}
