//! Top-N queries over a completed frequency table

use crate::{
    error::{Error, Result},
    types::{FileStatistics, WordFrequency},
};

/// Read-only queries against the statistics of the last processed file
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    stats: Option<&'a FileStatistics>,
}

impl<'a> QueryEngine<'a> {
    /// Query the given statistics, or nothing if no file has been processed
    pub fn new(stats: Option<&'a FileStatistics>) -> Self {
        Self { stats }
    }

    /// The `n` most frequent words; ties keep first-seen order
    pub fn top_words(&self, n: usize) -> Result<Vec<WordFrequency>> {
        let mut entries: Vec<&WordFrequency> = self.table()?.iter().collect();
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        Ok(entries.into_iter().take(n).cloned().collect())
    }

    /// The `n` longest words by character count; ties keep first-seen order
    pub fn longest_words(&self, n: usize) -> Result<Vec<String>> {
        let mut entries: Vec<(usize, &str)> = self
            .table()?
            .iter()
            .map(|entry| (entry.word.chars().count(), entry.word.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(entries
            .into_iter()
            .take(n)
            .map(|(_, word)| word.to_string())
            .collect())
    }

    fn table(&self) -> Result<&'a [WordFrequency]> {
        let stats = self.stats.ok_or(Error::NoFileProcessed)?;
        match stats.frequencies.as_deref() {
            Some(table) if !table.is_empty() => Ok(table),
            _ => Err(Error::NoWordsInFile),
        }
    }
}
