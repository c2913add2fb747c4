//! Progress reporting and cooperative cancellation

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stages a processing run moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStage {
    /// Turning the source reference into a local file
    ResolvingSource,
    /// Computing the content checksum
    Checksumming,
    /// Searching the statistics index
    CacheLookup,
    /// Statistics were found in the cache
    CacheHit,
    /// Reading and tokenizing the source
    Scanning,
    /// Building the statistics record
    Aggregating,
    /// Writing the record and payload to the cache
    Persisting,
    /// Statistics are available
    Done,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingStage::ResolvingSource => "resolving source",
            ProcessingStage::Checksumming => "checksumming",
            ProcessingStage::CacheLookup => "looking up cache",
            ProcessingStage::CacheHit => "cache hit",
            ProcessingStage::Scanning => "scanning",
            ProcessingStage::Aggregating => "aggregating",
            ProcessingStage::Persisting => "persisting",
            ProcessingStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Receives progress notifications from a processing run
pub trait ProgressObserver: Send + Sync {
    /// Called when the run enters a new stage
    fn on_stage(&self, _stage: ProcessingStage) {}

    /// Called after each read while scanning
    fn on_bytes(&self, _read: u64, _total: Option<u64>) {}
}

/// Shared flag used to cancel a run between reads
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear a previous request
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!flag.is_cancelled());

        clone.cancel();
        assert!(flag.is_cancelled());

        flag.reset();
        assert!(!clone.is_cancelled());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ProcessingStage::CacheLookup.to_string(), "looking up cache");
        assert_eq!(ProcessingStage::Done.to_string(), "done");
    }
}
