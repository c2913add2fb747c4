//! Markdown output formatter

use super::{OutputFormatter, StatisticsReport};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - summary list plus word tables
pub struct MarkdownFormatter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_report(&mut self, report: &StatisticsReport) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "# {}", report.source)?;
        writeln!(w)?;
        writeln!(w, "- **Lines:** {}", report.line_count)?;
        writeln!(w, "- **Words:** {}", report.word_count)?;
        writeln!(w, "- **Distinct words:** {}", report.distinct_words)?;
        writeln!(w, "- **Checksum:** `{}`", report.checksum)?;

        if !report.top_words.is_empty() {
            writeln!(w)?;
            writeln!(w, "## Most frequent words")?;
            writeln!(w)?;
            writeln!(w, "| Rank | Word | Frequency |")?;
            writeln!(w, "|-----:|------|----------:|")?;
            for (rank, entry) in report.top_words.iter().enumerate() {
                writeln!(w, "| {} | {} | {} |", rank + 1, escape(&entry.word), entry.frequency)?;
            }
        }

        if !report.longest_words.is_empty() {
            writeln!(w)?;
            writeln!(w, "## Longest words")?;
            writeln!(w)?;
            for (rank, word) in report.longest_words.iter().enumerate() {
                writeln!(w, "{}. {}", rank + 1, escape(word))?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn escape(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for ch in word.chars() {
        if matches!(ch, '|' | '*' | '_' | '`' | '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sample_report;

    #[test]
    fn test_markdown_report() {
        let mut formatter = MarkdownFormatter::new(Vec::new());
        formatter.format_report(&sample_report()).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.writer).unwrap();
        assert!(output.starts_with("# cat.txt"));
        assert!(output.contains("| 1 | mad | 600 |"));
        assert!(output.contains("1. You're"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a|b"), "a\\|b");
        assert_eq!(escape("snake_case"), "snake\\_case");
        assert_eq!(escape("can't"), "can't");
    }
}
