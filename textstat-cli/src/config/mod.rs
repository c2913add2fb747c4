//! Configuration file support

use crate::error::{CliError, CliResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl CliConfig {
    /// Load a configuration file; missing keys take their defaults
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Processing-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Read strategy name
    pub strategy: String,

    /// Serve repeated content from the cache
    pub reuse_cache: bool,

    /// Chunk size for the chunked strategy (KB)
    pub chunk_size_kb: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            strategy: "chunked-buffer".to_string(),
            reuse_cache: true,
            chunk_size_kb: 16,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format
    pub format: String,

    /// Number of most frequent words to report
    pub top: usize,

    /// Number of longest words to report
    pub longest: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            top: 10,
            longest: 10,
        }
    }
}

/// Cache-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory (default: `TextStats` in the working directory)
    pub directory: Option<PathBuf>,
}
