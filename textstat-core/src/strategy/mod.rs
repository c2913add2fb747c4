//! Interchangeable ingestion strategies
//!
//! Every strategy reads the source with a different I/O granularity and feeds
//! the same scanner, normalizer and frequency table, so all of them produce
//! identical statistics for identical content.

mod chunked;
mod line;

pub use chunked::ChunkedBufferStrategy;
pub use line::{LineBufferedStrategy, UnbufferedLineStrategy};

use crate::{
    aggregator::FrequencyTable,
    config::Config,
    error::{Error, Result},
    progress::{CancelFlag, ProgressObserver},
    scanner::{normalize, tokenize, LineCounter},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

/// How the source is read while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadStrategy {
    /// Fixed-size byte chunks with token carry-over
    #[default]
    ChunkedBuffer,
    /// One line at a time through a buffered reader
    LineBuffered,
    /// One line at a time assembled from small raw reads
    UnbufferedLine,
}

impl ReadStrategy {
    /// Every available strategy
    pub const ALL: [ReadStrategy; 3] = [
        ReadStrategy::ChunkedBuffer,
        ReadStrategy::LineBuffered,
        ReadStrategy::UnbufferedLine,
    ];

    /// Instantiate the strategy with sizes taken from the configuration
    pub fn ingestor(&self, config: &Config) -> Box<dyn IngestionStrategy> {
        match self {
            ReadStrategy::ChunkedBuffer => Box::new(ChunkedBufferStrategy::new(config.chunk_size())),
            ReadStrategy::LineBuffered => {
                Box::new(LineBufferedStrategy::new(config.line_buffer_size()))
            }
            ReadStrategy::UnbufferedLine => {
                Box::new(UnbufferedLineStrategy::new(config.unbuffered_read_size()))
            }
        }
    }
}

impl fmt::Display for ReadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadStrategy::ChunkedBuffer => "chunked-buffer",
            ReadStrategy::LineBuffered => "line-buffered",
            ReadStrategy::UnbufferedLine => "unbuffered-line",
        };
        f.write_str(name)
    }
}

impl FromStr for ReadStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "chunked-buffer" | "chunked" => Ok(ReadStrategy::ChunkedBuffer),
            "line-buffered" | "buffered-line" => Ok(ReadStrategy::LineBuffered),
            "unbuffered-line" | "unbuffered" => Ok(ReadStrategy::UnbufferedLine),
            _ => Err(Error::Configuration(format!("unknown read strategy: {s}"))),
        }
    }
}

/// A way of reading a source into a [`ScanContext`]
pub trait IngestionStrategy: Send + Sync {
    /// Read the whole source, feeding every token into the context
    fn scan(&self, reader: &mut dyn Read, ctx: &mut ScanContext<'_>) -> Result<()>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Result of scanning a source
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Accepted words in first-seen order
    pub table: FrequencyTable,
    /// Number of lines in the source
    pub line_count: u64,
}

/// Mutable state threaded through a scan
pub struct ScanContext<'a> {
    table: FrequencyTable,
    lines: LineCounter,
    bytes_read: u64,
    total_bytes: Option<u64>,
    cancel: Option<&'a CancelFlag>,
    observer: Option<&'a dyn ProgressObserver>,
}

impl<'a> ScanContext<'a> {
    /// Create a context for a source of the given size, if known
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            table: FrequencyTable::new(),
            lines: LineCounter::new(),
            bytes_read: 0,
            total_bytes,
            cancel: None,
            observer: None,
        }
    }

    /// Abort the scan before the next read once the flag is set
    pub fn with_cancel(mut self, cancel: &'a CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Report read progress to an observer
    pub fn with_observer(mut self, observer: &'a dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Fail with [`Error::Cancelled`] if cancellation was requested
    ///
    /// Strategies call this only between reads, never mid-token.
    pub fn check_cancelled(&self) -> Result<()> {
        match self.cancel {
            Some(flag) if flag.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Record that `count` more bytes were read
    pub fn advance(&mut self, count: usize) {
        self.bytes_read += count as u64;
        if let Some(observer) = self.observer {
            observer.on_bytes(self.bytes_read, self.total_bytes);
        }
    }

    /// Account for decoded text in the line count
    pub fn observe_text(&mut self, text: &str) {
        self.lines.observe(text);
    }

    /// Normalize a raw token and count it if it is a word
    pub fn accept_token(&mut self, raw: &str) {
        if let Some(word) = normalize(raw) {
            self.table.record(word);
        }
    }

    /// Normalize a batch of raw tokens and count the words among them
    pub fn accept_tokens<'t>(&mut self, raw: impl IntoIterator<Item = &'t str>) {
        self.table.update(raw.into_iter().filter_map(normalize));
    }

    /// Count a complete line, terminator included when present
    pub fn accept_line(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        self.lines.observe(&text);
        self.accept_tokens(tokenize(&text));
    }

    /// Bytes read so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Lines seen so far
    pub fn line_count(&self) -> u64 {
        self.lines.count()
    }

    /// Distinct words seen so far
    pub fn distinct_words(&self) -> usize {
        self.table.len()
    }

    /// Finish the scan
    pub fn into_outcome(self) -> ScanOutcome {
        ScanOutcome {
            line_count: self.lines.count(),
            table: self.table,
        }
    }
}

/// Scan a reader with the given strategy
pub fn scan_reader(
    reader: &mut dyn Read,
    strategy: ReadStrategy,
    config: &Config,
) -> Result<ScanOutcome> {
    let mut ctx = ScanContext::new(None);
    strategy.ingestor(config).scan(reader, &mut ctx)?;
    Ok(ctx.into_outcome())
}

/// Read into `buf`, retrying on interruption
pub(crate) fn read_block(reader: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
