//! Data model shared by the pipeline, the cache and the queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A word and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordFrequency {
    /// The word as first seen in the text
    pub word: String,
    /// Number of occurrences, case-insensitively, always at least 1
    pub frequency: u64,
}

impl WordFrequency {
    /// Create a new entry
    pub fn new(word: impl Into<String>, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// Statistics computed for one source
///
/// `checksum` is the cache key. `id` addresses the separately stored
/// frequency payload; `frequencies` is `None` only while the record sits in
/// the persisted index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStatistics {
    /// Content checksum of the source bytes
    pub checksum: String,
    /// Identifier assigned when the record was created
    pub id: Uuid,
    /// File name of the source
    pub source_name: String,
    /// Number of lines in the source
    pub line_count: u64,
    /// Number of accepted words, duplicates included
    pub word_count: u64,
    /// Frequency table in first-seen order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<Vec<WordFrequency>>,
}

impl FileStatistics {
    /// Frequency table, empty when detached
    pub fn frequencies(&self) -> &[WordFrequency] {
        self.frequencies.as_deref().unwrap_or(&[])
    }

    /// Number of distinct words
    pub fn distinct_words(&self) -> usize {
        self.frequencies().len()
    }

    /// Case-insensitive frequency lookup
    pub fn frequency_of(&self, word: &str) -> Option<u64> {
        let key = word.to_lowercase();
        self.frequencies()
            .iter()
            .find(|entry| entry.word.to_lowercase() == key)
            .map(|entry| entry.frequency)
    }
}
