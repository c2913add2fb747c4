//! Processing pipeline: resolve, checksum, look up, scan, persist

use crate::{
    binary::{read_prefix, BinaryClassifier, NulSentinelClassifier},
    cache::StatisticsCache,
    checksum::file_checksum,
    config::Config,
    error::{Error, Result},
    progress::{CancelFlag, ProcessingStage, ProgressObserver},
    query::QueryEngine,
    source::{default_downloader, Downloader, Source},
    strategy::{ReadStrategy, ScanContext},
    types::{FileStatistics, WordFrequency},
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Computes, caches and queries word statistics for one source at a time
///
/// Holds the statistics of the last successful run; a failed run leaves them
/// untouched.
///
/// ```no_run
/// use textstat_core::{ReadStrategy, TextStatistics};
///
/// let mut stats = TextStatistics::new();
/// stats.process_file("alice.txt", true, ReadStrategy::ChunkedBuffer)?;
/// for entry in stats.top_words(10)? {
///     println!("{} {}", entry.word, entry.frequency);
/// }
/// # Ok::<(), textstat_core::Error>(())
/// ```
pub struct TextStatistics {
    config: Config,
    cache: StatisticsCache,
    downloader: Box<dyn Downloader>,
    classifier: Box<dyn BinaryClassifier>,
    observer: Option<Arc<dyn ProgressObserver>>,
    cancel: CancelFlag,
    current: Option<FileStatistics>,
}

impl Default for TextStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStatistics {
    /// Create a pipeline with the default configuration
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            cache: StatisticsCache::new(config.cache_dir()),
            downloader: default_downloader(config.download_timeout()),
            classifier: Box::new(NulSentinelClassifier::new(config.binary_nul_threshold())),
            observer: None,
            cancel: CancelFlag::new(),
            current: None,
            config,
        }
    }

    /// Replace the download collaborator
    pub fn with_downloader(mut self, downloader: impl Downloader + 'static) -> Self {
        self.downloader = Box::new(downloader);
        self
    }

    /// Replace the binary-content classifier
    pub fn with_classifier(mut self, classifier: impl BinaryClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Receive stage and byte progress notifications
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Flag that cancels a running scan between reads
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// The statistics cache used by this pipeline
    pub fn cache(&self) -> &StatisticsCache {
        &self.cache
    }

    /// Statistics of the last successfully processed file
    pub fn current(&self) -> Option<&FileStatistics> {
        self.current.as_ref()
    }

    /// Compute statistics for a source, reusing cached results when allowed
    pub fn process_file(
        &mut self,
        source: &str,
        reuse_cache: bool,
        strategy: ReadStrategy,
    ) -> Result<&FileStatistics> {
        let started = Instant::now();
        log::info!("Processing {source} with {strategy} (reuse cache: {reuse_cache})");

        self.enter(ProcessingStage::ResolvingSource);
        let source = Source::parse(source)?;
        let source_name = source.name();
        let path = self.resolve(&source)?;

        let prefix = read_prefix(&path, self.config.binary_probe_len())?;
        if self.classifier.looks_binary(&prefix) {
            return Err(Error::NotText(source_name));
        }

        self.enter(ProcessingStage::Checksumming);
        let checksum = file_checksum(&path)?;

        if reuse_cache {
            self.enter(ProcessingStage::CacheLookup);
            if let Some(cached) = self.cache.lookup(&checksum) {
                self.enter(ProcessingStage::CacheHit);
                log::info!("Returning saved statistics for {source_name}");
                self.enter(ProcessingStage::Done);
                let cached: &FileStatistics = self.current.insert(cached);
                return Ok(cached);
            }
        }

        let mut stats = self.scan(&path, checksum, source_name, strategy)?;

        self.enter(ProcessingStage::Persisting);
        self.cache.store(&mut stats)?;

        self.enter(ProcessingStage::Done);
        log::info!(
            "Processed {} in {:.3}s: {} lines, {} words, {} distinct",
            stats.source_name,
            started.elapsed().as_secs_f64(),
            stats.line_count,
            stats.word_count,
            stats.distinct_words()
        );
        let stats: &FileStatistics = self.current.insert(stats);
        Ok(stats)
    }

    /// The `n` most frequent words of the last processed file
    pub fn top_words(&self, n: usize) -> Result<Vec<WordFrequency>> {
        QueryEngine::new(self.current.as_ref()).top_words(n)
    }

    /// The `n` longest words of the last processed file
    pub fn longest_words(&self, n: usize) -> Result<Vec<String>> {
        QueryEngine::new(self.current.as_ref()).longest_words(n)
    }

    fn resolve(&self, source: &Source) -> Result<PathBuf> {
        let path = match source {
            Source::Local(path) => path.clone(),
            Source::Remote(url) => {
                let started = Instant::now();
                let path = self.downloader.download(url, &self.config.download_dir())?;
                log::info!(
                    "Downloaded {url} in {}ms",
                    started.elapsed().as_millis()
                );
                path
            }
        };

        if !path.is_file() {
            return Err(Error::InvalidSource(format!(
                "{} is not a readable file",
                path.display()
            )));
        }
        Ok(path)
    }

    fn scan(
        &self,
        path: &Path,
        checksum: String,
        source_name: String,
        strategy: ReadStrategy,
    ) -> Result<FileStatistics> {
        self.enter(ProcessingStage::Scanning);
        let started = Instant::now();
        let mut file = File::open(path)?;
        let total = file.metadata().ok().map(|m| m.len());

        let mut ctx = ScanContext::new(total).with_cancel(&self.cancel);
        if let Some(observer) = self.observer.as_deref() {
            ctx = ctx.with_observer(observer);
        }

        let ingestor = strategy.ingestor(&self.config);
        ingestor.scan(&mut file, &mut ctx)?;
        let outcome = ctx.into_outcome();
        log::debug!(
            "Scanned {} with {} in {:.3}s",
            source_name,
            ingestor.name(),
            started.elapsed().as_secs_f64()
        );

        self.enter(ProcessingStage::Aggregating);
        Ok(FileStatistics {
            checksum,
            id: Uuid::new_v4(),
            source_name,
            line_count: outcome.line_count,
            word_count: outcome.table.word_count(),
            frequencies: Some(outcome.table.into_entries()),
        })
    }

    fn enter(&self, stage: ProcessingStage) {
        log::debug!("Stage: {stage}");
        if let Some(observer) = &self.observer {
            observer.on_stage(stage);
        }
    }
}
