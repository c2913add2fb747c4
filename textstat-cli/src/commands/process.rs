//! Process command implementation

use crate::{
    config::CliConfig,
    error::CliError,
    output::{
        JsonFormatter, MarkdownFormatter, OutputFormatter, StatisticsReport, TextFormatter,
    },
    progress::ProgressReporter,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;
use textstat_core::{Config, Error, ReadStrategy, TextStatistics};

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Local path, file:// URL or http(s):// URL of the text
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// How the source is read
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Always scan, ignoring cached statistics
    #[arg(long)]
    pub no_cache: bool,

    /// Number of most frequent words to report
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Number of longest words to report
    #[arg(short, long, value_name = "N")]
    pub longest: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Cache directory
    #[arg(long, value_name = "DIR", env = "TEXTSTAT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Chunk size for the chunked strategy in KB
    #[arg(long, value_name = "KB")]
    pub chunk_kb: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Read strategies selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Fixed-size chunks with token carry-over
    Chunked,
    /// Buffered line-by-line reads
    LineBuffered,
    /// Line-by-line reads assembled from small raw reads
    UnbufferedLine,
}

impl From<StrategyArg> for ReadStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Chunked => ReadStrategy::ChunkedBuffer,
            StrategyArg::LineBuffered => ReadStrategy::LineBuffered,
            StrategyArg::UnbufferedLine => ReadStrategy::UnbufferedLine,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text
    Text,
    /// Pretty-printed JSON object
    Json,
    /// Markdown summary and tables
    Markdown,
}

/// Settings after merging the config file with command-line flags
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    strategy: ReadStrategy,
    reuse_cache: bool,
    top: usize,
    longest: usize,
    format: OutputFormat,
    cache_dir: Option<PathBuf>,
    chunk_size: usize,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting text processing");
        log::debug!("Arguments: {:?}", self);

        let settings = self.settings(&CliConfig::load_or_default(self.config.as_deref())?)?;
        let report = self.run(&settings)?;

        let mut formatter = self.formatter(settings.format)?;
        formatter
            .format_report(&report)
            .and_then(|()| formatter.finish())
            .map_err(|e| CliError::OutputError(e.to_string()))?;
        Ok(())
    }

    fn settings(&self, file: &CliConfig) -> Result<Settings> {
        let strategy = match self.strategy {
            Some(arg) => arg.into(),
            None => file
                .processing
                .strategy
                .parse::<ReadStrategy>()
                .map_err(CliError::from)?,
        };

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&file.output.format, true).map_err(|_| {
                CliError::ConfigError(format!("unknown output format: {}", file.output.format))
            })?,
        };

        let chunk_kb = self.chunk_kb.unwrap_or(file.processing.chunk_size_kb);

        Ok(Settings {
            strategy,
            reuse_cache: !self.no_cache && file.processing.reuse_cache,
            top: self.top.unwrap_or(file.output.top),
            longest: self.longest.unwrap_or(file.output.longest),
            format,
            cache_dir: self.cache_dir.clone().or_else(|| file.cache.directory.clone()),
            chunk_size: chunk_kb.saturating_mul(1024),
        })
    }

    fn run(&self, settings: &Settings) -> Result<StatisticsReport> {
        let mut builder = Config::builder().chunk_size(settings.chunk_size);
        if let Some(dir) = &settings.cache_dir {
            builder = builder.cache_dir(dir);
        }
        let config = builder.build().map_err(CliError::from)?;

        let reporter = Arc::new(ProgressReporter::new(self.quiet));
        let mut stats = TextStatistics::with_config(config).with_observer(reporter.clone());

        let result = stats.process_file(&self.source, settings.reuse_cache, settings.strategy);
        reporter.finish();
        let processed = result.map_err(CliError::from)?.clone();

        let top_words = allow_empty(stats.top_words(settings.top))?;
        let longest_words = allow_empty(stats.longest_words(settings.longest))?;
        Ok(StatisticsReport::new(&processed, top_words, longest_words))
    }

    fn formatter(&self, format: OutputFormat) -> Result<Box<dyn OutputFormatter>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| CliError::OutputError(format!("{}: {e}", path.display())))?;
                Ok(build_formatter(format, BufWriter::new(file)))
            }
            None => Ok(build_formatter(format, io::stdout())),
        }
    }
}

fn build_formatter<W>(format: OutputFormat, writer: W) -> Box<dyn OutputFormatter>
where
    W: io::Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// A file with no words still gets a report, just without word lists
fn allow_empty<T>(result: textstat_core::Result<Vec<T>>) -> Result<Vec<T>> {
    match result {
        Err(Error::NoWordsInFile) => Ok(Vec::new()),
        other => Ok(other.map_err(CliError::from)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ProcessArgs,
    }

    fn parse(args: &[&str]) -> ProcessArgs {
        let mut argv = vec!["textstat"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).args
    }

    #[test]
    fn test_defaults_come_from_config() {
        let args = parse(&["alice.txt"]);
        let settings = args.settings(&CliConfig::default()).unwrap();
        assert_eq!(
            settings,
            Settings {
                strategy: ReadStrategy::ChunkedBuffer,
                reuse_cache: true,
                top: 10,
                longest: 10,
                format: OutputFormat::Text,
                cache_dir: None,
                chunk_size: 16 * 1024,
            }
        );
    }

    #[test]
    fn test_flags_override_config() {
        let mut file = CliConfig::default();
        file.processing.strategy = "unbuffered-line".into();
        file.output.format = "markdown".into();
        file.output.top = 3;

        let args = parse(&[
            "alice.txt",
            "--strategy",
            "line-buffered",
            "-f",
            "json",
            "--no-cache",
            "--chunk-kb",
            "4",
        ]);
        let settings = args.settings(&file).unwrap();
        assert_eq!(settings.strategy, ReadStrategy::LineBuffered);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.top, 3);
        assert!(!settings.reuse_cache);
        assert_eq!(settings.chunk_size, 4096);
    }

    #[test]
    fn test_config_values_are_validated() {
        let mut file = CliConfig::default();
        file.processing.strategy = "mmap".into();
        assert!(parse(&["alice.txt"]).settings(&file).is_err());

        let mut file = CliConfig::default();
        file.output.format = "html".into();
        assert!(parse(&["alice.txt"]).settings(&file).is_err());
    }

    #[test]
    fn test_allow_empty() {
        let empty: textstat_core::Result<Vec<String>> = Err(Error::NoWordsInFile);
        assert!(allow_empty(empty).unwrap().is_empty());

        let unprocessed: textstat_core::Result<Vec<String>> = Err(Error::NoFileProcessed);
        assert!(allow_empty(unprocessed).is_err());
    }
}
