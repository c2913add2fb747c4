//! JSON output formatter

use super::{OutputFormatter, StatisticsReport};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - one pretty-printed report object
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_report(&mut self, report: &StatisticsReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::sample_report;

    #[test]
    fn test_json_report() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.format_report(&sample_report()).unwrap();
        formatter.finish().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(value["line_count"], 200);
        assert_eq!(value["distinct_words"], 14);
        assert_eq!(value["top_words"][0]["word"], "mad");
        assert_eq!(value["top_words"][0]["frequency"], 600);
        assert_eq!(value["longest_words"][0], "You're");
    }
}
