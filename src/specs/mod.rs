// src/specs/mod.rs
//! # Page specs
//!
//! Pure HTML parsing for the pages the scraper visits. A spec knows *where the
//! data lives in the markup* and nothing else: no browser, no files, no pacing.
//! It takes a [`events::PageSnapshot`] and returns structured records.
//!
//! ## Conventions
//! - Selectors are the site's class names (see `config::consts`); compiled once.
//! - One bad listing never costs its siblings: failures are collected per
//!   listing and reported, the rest of the page still comes back.
//! - Output order is document order. No dedup, no sorting.
//!
//! ## Testing notes
//! Specs are tested offline against HTML fixtures (`tests/extract_listings.rs`).
pub mod events;
