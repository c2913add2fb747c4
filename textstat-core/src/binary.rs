//! Binary-content detection

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Decides from a content prefix whether a source is binary
pub trait BinaryClassifier: Send + Sync {
    /// Whether the prefix looks like binary content
    fn looks_binary(&self, prefix: &[u8]) -> bool;
}

/// Flags content containing a run of consecutive NUL bytes
#[derive(Debug, Clone)]
pub struct NulSentinelClassifier {
    required_consecutive: usize,
}

impl NulSentinelClassifier {
    /// Classify as binary once `required_consecutive` NUL bytes appear in a row
    pub fn new(required_consecutive: usize) -> Self {
        Self {
            required_consecutive: required_consecutive.max(1),
        }
    }
}

impl Default for NulSentinelClassifier {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BinaryClassifier for NulSentinelClassifier {
    fn looks_binary(&self, prefix: &[u8]) -> bool {
        let mut run = 0;
        for &byte in prefix {
            if byte == 0 {
                run += 1;
                if run >= self.required_consecutive {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }
}

/// Read at most `limit` leading bytes of a file
pub fn read_prefix(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let mut prefix = Vec::with_capacity(limit.min(64 * 1024));
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut prefix)?;
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_text_is_not_binary() {
        let classifier = NulSentinelClassifier::default();
        assert!(!classifier.looks_binary(b"plain text\nwith lines\n"));
        assert!(!classifier.looks_binary(b""));
        assert!(!classifier.looks_binary("ünïcödé".as_bytes()));
    }

    #[test]
    fn test_single_nul_is_binary_by_default() {
        let classifier = NulSentinelClassifier::default();
        assert!(classifier.looks_binary(b"PK\x03\x04\x00\x00"));
    }

    #[test]
    fn test_consecutive_threshold() {
        let classifier = NulSentinelClassifier::new(3);
        assert!(!classifier.looks_binary(b"a\0\0b\0\0c"));
        assert!(classifier.looks_binary(b"a\0\0\0b"));
    }

    #[test]
    fn test_read_prefix_is_bounded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();

        assert_eq!(read_prefix(&path, 8000).unwrap().len(), 8000);
        assert_eq!(read_prefix(&path, 20_000).unwrap().len(), 10_000);
    }
}
