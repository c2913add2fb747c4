//! Error types for statistics processing

use thiserror::Error;
use uuid::Uuid;

/// Error type for every fallible textstat operation
#[derive(Debug, Error)]
pub enum Error {
    /// The source reference is malformed or does not point at a readable file
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// Binary content was detected before scanning
    #[error("{0} is not a text file")]
    NotText(String),

    /// The remote source could not be fetched
    #[error("failed to download {url}: {reason}")]
    DownloadFailed {
        /// The URL that was requested
        url: String,
        /// Why the download failed
        reason: String,
    },

    /// A query was issued before any file was processed
    #[error("no file processed, process a file from a URL or disk first")]
    NoFileProcessed,

    /// The processed file has no countable words
    #[error("no words in file")]
    NoWordsInFile,

    /// An index entry exists but its frequency payload is missing or empty
    #[error("cached frequency payload {id} is missing or empty")]
    CachePayloadCorrupt {
        /// Identifier of the index entry whose payload failed to load
        id: Uuid,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Processing was cancelled between two reads
    #[error("processing cancelled")]
    Cancelled,

    /// I/O failure while reading the source or writing the cache
    #[error("processing failed: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted index could not be read or written
    #[error("statistics index error: {0}")]
    Index(#[from] serde_json::Error),

    /// A frequency payload could not be encoded or decoded
    #[error("frequency payload error: {0}")]
    Payload(#[from] bincode::Error),
}

/// Result type for textstat operations
pub type Result<T> = std::result::Result<T, Error>;
