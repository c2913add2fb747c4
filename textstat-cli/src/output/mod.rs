//! Report formatting

use anyhow::Result;
use serde::Serialize;
use textstat_core::{FileStatistics, WordFrequency};

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Everything a formatter renders for one processed source
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    /// Name of the processed source
    pub source: String,
    /// Content checksum
    pub checksum: String,
    /// Cache record id
    pub id: String,
    /// Number of lines
    pub line_count: u64,
    /// Number of accepted words
    pub word_count: u64,
    /// Number of distinct words
    pub distinct_words: usize,
    /// Most frequent words, most frequent first
    pub top_words: Vec<WordFrequency>,
    /// Longest words, longest first
    pub longest_words: Vec<String>,
}

impl StatisticsReport {
    /// Build a report from statistics and query results
    pub fn new(
        stats: &FileStatistics,
        top_words: Vec<WordFrequency>,
        longest_words: Vec<String>,
    ) -> Self {
        Self {
            source: stats.source_name.clone(),
            checksum: stats.checksum.clone(),
            id: stats.id.to_string(),
            line_count: stats.line_count,
            word_count: stats.word_count,
            distinct_words: stats.distinct_words(),
            top_words,
            longest_words,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Render one report
    fn format_report(&mut self, report: &StatisticsReport) -> Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> Result<()>;
}

#[cfg(test)]
pub(crate) fn sample_report() -> StatisticsReport {
    StatisticsReport {
        source: "cat.txt".into(),
        checksum: "ab12".into(),
        id: "00000000-0000-0000-0000-000000000000".into(),
        line_count: 200,
        word_count: 3200,
        distinct_words: 14,
        top_words: vec![WordFrequency::new("mad", 600), WordFrequency::new("Oh", 200)],
        longest_words: vec!["You're".into(), "we're".into()],
    }
}
