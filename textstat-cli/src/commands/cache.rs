//! Cache maintenance commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use textstat_core::{config::defaults, StatisticsCache};

/// Cache subcommands
#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// List cached statistics records
    List(CacheArgs),

    /// Remove every cached record
    Clear(CacheArgs),
}

/// Arguments shared by the cache subcommands
#[derive(Debug, Args)]
pub struct CacheArgs {
    /// Cache directory
    #[arg(long, value_name = "DIR", env = "TEXTSTAT_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

impl CacheArgs {
    fn cache(&self) -> StatisticsCache {
        let root = self
            .cache_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::CACHE_DIR));
        StatisticsCache::new(root)
    }
}

impl CacheCommands {
    /// Execute the cache command
    pub fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        match self {
            CacheCommands::List(args) => list(&args.cache(), &mut stdout.lock()),
            CacheCommands::Clear(args) => clear(&args.cache(), &mut stdout.lock()),
        }
    }
}

fn list(cache: &StatisticsCache, out: &mut dyn Write) -> Result<()> {
    let entries = cache
        .entries()
        .with_context(|| format!("Failed to read cache index in {}", cache.root().display()))?;

    if entries.is_empty() {
        writeln!(out, "No cached statistics in {}", cache.root().display())?;
        return Ok(());
    }

    for entry in &entries {
        writeln!(
            out,
            "{}  {}  lines: {}  words: {}  checksum: {}",
            entry.id, entry.source_name, entry.line_count, entry.word_count, entry.checksum
        )?;
    }
    writeln!(out, "{} cached record(s)", entries.len())?;
    Ok(())
}

fn clear(cache: &StatisticsCache, out: &mut dyn Write) -> Result<()> {
    let removed = cache
        .clear()
        .with_context(|| format!("Failed to clear cache in {}", cache.root().display()))?;
    log::info!("Cleared {removed} records from {}", cache.root().display());
    writeln!(out, "Removed {removed} cached record(s)")?;
    Ok(())
}
