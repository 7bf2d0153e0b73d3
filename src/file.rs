// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::{write_row, Delim};
use crate::specs::events::EventRecord;

/// Where extracted records go. Records arrive in extraction order.
pub trait Sink {
    fn write_record(&mut self, record: &EventRecord) -> io::Result<()>;

    /// Push buffered records to durable storage. Called after every page.
    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

/// In-memory sink.
impl Sink for Vec<EventRecord> {
    fn write_record(&mut self, record: &EventRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Delimited text file with the header row written up front.
pub struct CsvSink {
    delim: Delim,
    out: BufWriter<File>,
    rows: usize,
}

impl CsvSink {
    /// Create (or truncate) `path`, creating parent directories as needed.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let delim = Delim::for_path(path);
        let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
        write_row(&mut out, &EventRecord::headers(), delim)?;
        out.flush()?;

        Ok(Self { delim, out, rows: 0 })
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close.
    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Sink for CsvSink {
    fn write_record(&mut self, record: &EventRecord) -> io::Result<()> {
        write_row(&mut self.out, &record.to_row(), self.delim)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
