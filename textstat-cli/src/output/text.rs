//! Plain text output formatter

use super::{OutputFormatter, StatisticsReport};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - aligned summary followed by the word lists
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &StatisticsReport) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "Source:         {}", report.source)?;
        writeln!(w, "Checksum:       {}", report.checksum)?;
        writeln!(w, "Lines:          {}", report.line_count)?;
        writeln!(w, "Words:          {}", report.word_count)?;
        writeln!(w, "Distinct words: {}", report.distinct_words)?;

        if !report.top_words.is_empty() {
            let width = report
                .top_words
                .iter()
                .map(|e| e.word.chars().count())
                .max()
                .unwrap_or(0);
            writeln!(w)?;
            writeln!(w, "Most frequent words:")?;
            for entry in &report.top_words {
                writeln!(w, "  {:<width$}  {}", entry.word, entry.frequency)?;
            }
        }

        if !report.longest_words.is_empty() {
            writeln!(w)?;
            writeln!(w, "Longest words:")?;
            for word in &report.longest_words {
                writeln!(w, "  {word}")?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
