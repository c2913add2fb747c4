//! Case-insensitive word frequency aggregation

use crate::types::WordFrequency;
use std::collections::HashMap;

/// Frequency table in first-seen order with a case-folded lookup index
///
/// Entry order is the tie-break for every query, so entries are only ever
/// appended.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<WordFrequency>,
    positions: HashMap<String, usize>,
    accepted: u64,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of a normalized word
    pub fn record(&mut self, word: &str) {
        self.accepted += 1;

        let key = word.to_lowercase();
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].frequency += 1,
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(WordFrequency::new(word, 1));
            }
        }
    }

    /// Count every word of a sequence
    pub fn update<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.record(word.as_ref());
        }
    }

    /// Number of accepted words, duplicates included
    pub fn word_count(&self) -> u64 {
        self.accepted
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no word has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[WordFrequency] {
        &self.entries
    }

    /// Consume the table, keeping first-seen order
    pub fn into_entries(self) -> Vec<WordFrequency> {
        self.entries
    }
}
