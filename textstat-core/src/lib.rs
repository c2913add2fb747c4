//! Word-frequency statistics with a checksum-keyed result cache
//!
//! This crate computes line counts, word counts and a case-insensitive
//! frequency table for a text source (a local file or a downloaded URL), and
//! persists the result keyed by a checksum of the content so that processing
//! identical content again skips the scan.
//!
//! # Architecture
//!
//! - **Scanner**: pure `(chunk, carry_in) -> (tokens, carry_out)` whitespace
//!   tokenizer plus the punctuation/number normalizer
//! - **Strategies**: chunked, line-buffered and unbuffered-line readers that
//!   all feed the scanner and produce identical results
//! - **Aggregator**: first-seen ordered frequency table with case-folded lookup
//! - **Cache**: JSON metadata index plus one bincode payload per record
//! - **Pipeline**: [`TextStatistics`], which ties everything together and
//!   answers top-N queries
//!
//! # Example
//!
//! ```rust
//! use textstat_core::{Config, ReadStrategy, TextStatistics};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("hatter.txt");
//! std::fs::write(&path, "Twinkle, twinkle, little bat!\nHow I wonder what you're at!\n").unwrap();
//!
//! let config = Config::builder().cache_dir(dir.path().join("cache")).build().unwrap();
//! let mut stats = TextStatistics::with_config(config);
//!
//! let result = stats
//!     .process_file(path.to_str().unwrap(), true, ReadStrategy::ChunkedBuffer)
//!     .unwrap();
//! assert_eq!(result.line_count, 2);
//!
//! let top = stats.top_words(1).unwrap();
//! assert_eq!(top[0].word, "Twinkle");
//! assert_eq!(top[0].frequency, 2);
//! ```

pub mod aggregator;
pub mod binary;
pub mod cache;
pub mod checksum;
pub mod config;
pub mod error;
pub mod processor;
pub mod progress;
pub mod query;
pub mod scanner;
pub mod source;
pub mod strategy;
pub mod types;

pub use aggregator::FrequencyTable;
pub use binary::{BinaryClassifier, NulSentinelClassifier};
pub use cache::StatisticsCache;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use processor::TextStatistics;
pub use progress::{CancelFlag, ProcessingStage, ProgressObserver};
pub use query::QueryEngine;
pub use source::{Downloader, Source};
pub use strategy::{scan_reader, IngestionStrategy, ReadStrategy, ScanOutcome};
pub use types::{FileStatistics, WordFrequency};

#[cfg(feature = "download")]
pub use source::HttpDownloader;
