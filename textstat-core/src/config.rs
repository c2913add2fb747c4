//! Configuration for statistics processing

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration constants
pub mod defaults {
    use std::time::Duration;

    /// Bytes per read for the chunked-buffer strategy (16KB)
    pub const CHUNK_SIZE: usize = 16 * 1024;

    /// Reader capacity for the line-buffered strategy (16KB)
    pub const LINE_BUFFER_SIZE: usize = 16 * 1024;

    /// Bytes per raw read for the unbuffered line strategy
    pub const UNBUFFERED_READ_SIZE: usize = 512;

    /// Prefix inspected by the binary-content check
    pub const BINARY_PROBE_LEN: usize = 8000;

    /// Consecutive NUL bytes that classify content as binary
    pub const BINARY_NUL_THRESHOLD: usize = 1;

    /// Directory holding the index, payloads and downloads
    pub const CACHE_DIR: &str = "TextStats";

    /// Timeout for fetching remote sources
    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

    /// Largest accepted read buffer or binary sniff length (1GB)
    pub const MAX_BUFFER_SIZE: usize = 1024 * 1024 * 1024;
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) chunk_size: usize,
    pub(crate) line_buffer_size: usize,
    pub(crate) unbuffered_read_size: usize,
    pub(crate) binary_probe_len: usize,
    pub(crate) binary_nul_threshold: usize,
    pub(crate) cache_dir: PathBuf,
    pub(crate) download_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            line_buffer_size: defaults::LINE_BUFFER_SIZE,
            unbuffered_read_size: defaults::UNBUFFERED_READ_SIZE,
            binary_probe_len: defaults::BINARY_PROBE_LEN,
            binary_nul_threshold: defaults::BINARY_NUL_THRESHOLD,
            cache_dir: PathBuf::from(defaults::CACHE_DIR),
            download_timeout: defaults::DOWNLOAD_TIMEOUT,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Bytes per read for the chunked-buffer strategy
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Reader capacity for the line-buffered strategy
    pub fn line_buffer_size(&self) -> usize {
        self.line_buffer_size
    }

    /// Bytes per raw read for the unbuffered line strategy
    pub fn unbuffered_read_size(&self) -> usize {
        self.unbuffered_read_size
    }

    /// Prefix length inspected by the binary classifier
    pub fn binary_probe_len(&self) -> usize {
        self.binary_probe_len
    }

    /// Consecutive NUL bytes that mark content as binary
    pub fn binary_nul_threshold(&self) -> usize {
        self.binary_nul_threshold
    }

    /// Root directory of the statistics cache
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Directory where remote sources are downloaded
    pub fn download_dir(&self) -> PathBuf {
        self.cache_dir.join("downloads")
    }

    /// Timeout for fetching remote sources
    pub fn download_timeout(&self) -> Duration {
        self.download_timeout
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        let sizes = [
            ("chunk_size", self.chunk_size),
            ("line_buffer_size", self.line_buffer_size),
            ("unbuffered_read_size", self.unbuffered_read_size),
            ("binary_probe_len", self.binary_probe_len),
            ("binary_nul_threshold", self.binary_nul_threshold),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(Error::Configuration(format!(
                    "{name} must be greater than 0"
                )));
            }
            if value > defaults::MAX_BUFFER_SIZE {
                return Err(Error::Configuration(format!(
                    "{name} must not exceed {} bytes",
                    defaults::MAX_BUFFER_SIZE
                )));
            }
        }

        if self.cache_dir.as_os_str().is_empty() {
            return Err(Error::Configuration("cache_dir must not be empty".into()));
        }

        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    chunk_size: Option<usize>,
    line_buffer_size: Option<usize>,
    unbuffered_read_size: Option<usize>,
    binary_probe_len: Option<usize>,
    binary_nul_threshold: Option<usize>,
    cache_dir: Option<PathBuf>,
    download_timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the line-buffered reader capacity in bytes
    pub fn line_buffer_size(mut self, bytes: usize) -> Self {
        self.line_buffer_size = Some(bytes);
        self
    }

    /// Set the raw read size of the unbuffered line strategy
    pub fn unbuffered_read_size(mut self, bytes: usize) -> Self {
        self.unbuffered_read_size = Some(bytes);
        self
    }

    /// Set how many leading bytes the binary check inspects
    pub fn binary_probe_len(mut self, bytes: usize) -> Self {
        self.binary_probe_len = Some(bytes);
        self
    }

    /// Set how many consecutive NUL bytes mark content as binary
    pub fn binary_nul_threshold(mut self, count: usize) -> Self {
        self.binary_nul_threshold = Some(count);
        self
    }

    /// Set the cache directory
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Set the download timeout
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }
        if let Some(size) = self.line_buffer_size {
            config.line_buffer_size = size;
        }
        if let Some(size) = self.unbuffered_read_size {
            config.unbuffered_read_size = size;
        }
        if let Some(len) = self.binary_probe_len {
            config.binary_probe_len = len;
        }
        if let Some(count) = self.binary_nul_threshold {
            config.binary_nul_threshold = count;
        }
        if let Some(dir) = self.cache_dir {
            config.cache_dir = dir;
        }
        if let Some(timeout) = self.download_timeout {
            config.download_timeout = timeout;
        }

        config.validate()?;
        Ok(config)
    }
}
