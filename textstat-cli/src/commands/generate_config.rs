//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("Configuration template written to {}", self.output.display());
        println!("Use it with: textstat process <SOURCE> --config {}", self.output.display());
        Ok(())
    }
}

/// Template content; every value shown is the built-in default
fn generate_template() -> String {
    r#"# textstat configuration
# Command-line flags take precedence over the values below.

[processing]
# Read strategy: "chunked-buffer", "line-buffered" or "unbuffered-line"
strategy = "chunked-buffer"

# Serve statistics for previously seen content from the cache
reuse_cache = true

# Bytes per read for the chunked strategy, in KB
chunk_size_kb = 16

[output]
# Report format: "text", "json" or "markdown"
format = "text"

# Number of most frequent words to report
top = 10

# Number of longest words to report
longest = 10

[cache]
# Directory holding statistics.json and the frequency payloads
# (default: ./TextStats, or $TEXTSTAT_CACHE_DIR when set)
# directory = "/var/cache/textstat"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let config: CliConfig = toml::from_str(&generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("textstat.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };
        args.execute().unwrap();

        let loaded = CliConfig::load(&output_path).unwrap();
        assert_eq!(loaded, CliConfig::default());
    }

    #[test]
    fn test_execute_reports_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            output: temp_dir.path().join("missing").join("textstat.toml"),
        };
        let error = args.execute().unwrap_err();
        assert!(error.to_string().contains("Failed to write"));
    }
}
