// src/progress.rs
/// Progress reporting for a scrape run.
/// Frontends implement this to surface status lines to users.
pub trait Progress {
    /// Called at the start with the number of pages requested.
    fn begin(&mut self, _pages: u32) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one page has been extracted and its records written.
    fn page_done(&mut self, _page: u32, _records: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every line; handy for tests and for embedding.
#[derive(Default, Debug)]
pub struct RecordedProgress {
    pub lines: Vec<String>,
    pub pages: Vec<(u32, usize)>,
    pub finished: bool,
}

impl Progress for RecordedProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn page_done(&mut self, page: u32, records: usize) {
        self.pages.push((page, records));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
