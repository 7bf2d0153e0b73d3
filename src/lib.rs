// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod renderer;
pub mod scrape;
pub mod specs;

pub use config::RunConfig;
pub use error::{Result, ScrapeError};
pub use specs::events::{extract, EventRecord, PageSnapshot};
