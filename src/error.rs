// src/error.rs
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// W3C error codes that mean "the thing we wanted to click is not there (any more)".
const NAVIGATION_CODES: [&str; 4] = [
    "no such element",
    "element not interactable",
    "element click intercepted",
    "stale element reference",
];

/// One listing could not be turned into a record. Recovered per listing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("listing has no {0}")]
    MissingField(&'static str),
}

/// Failure reported by a page renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{code}: {message}")]
    Command { code: String, message: String },

    #[error("unexpected response: {0}")]
    Protocol(String),
}

impl RenderError {
    pub fn command(code: &str, message: impl Into<String>) -> Self {
        RenderError::Command { code: code.to_string(), message: message.into() }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            RenderError::Command { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.code().is_some_and(|c| NAVIGATION_CODES.contains(&c))
    }
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        RenderError::Transport(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("timed out after {waited:?} waiting for {condition}")]
    Timeout { condition: &'static str, waited: Duration },

    #[error("renderer: {0}")]
    Render(#[from] RenderError),

    #[error("script returned {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Errors that end pagination early instead of failing the run.
    pub fn is_navigation(&self) -> bool {
        match self {
            ScrapeError::Timeout { .. } => true,
            ScrapeError::Render(e) => e.is_navigation(),
            _ => false,
        }
    }
}
