//! Checksum-keyed statistics cache
//!
//! Two independent resources live under the cache root: a small JSON index
//! of metadata records (`statistics.json`) and one bincode frequency payload
//! per record (`<id>/frequencies.bin`). Lookups only read the index plus the
//! payload of the matching record.
//!
//! The index is rewritten in full on every store. Writes are atomic per
//! file, but concurrent writers are not coordinated: when two processes
//! store at the same time the last index rewrite wins.

use crate::{
    error::{Error, Result},
    types::{FileStatistics, WordFrequency},
};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// File name of the metadata index
pub const INDEX_FILE: &str = "statistics.json";

/// File name of a frequency payload inside its record directory
pub const PAYLOAD_FILE: &str = "frequencies.bin";

/// Persistent store of computed statistics
#[derive(Debug, Clone)]
pub struct StatisticsCache {
    root: PathBuf,
}

impl StatisticsCache {
    /// Create a cache rooted at `root`; nothing is created until the first store
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the metadata index
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Path of the frequency payload for a record
    pub fn payload_path(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string()).join(PAYLOAD_FILE)
    }

    /// Every index record, without frequency payloads
    pub fn entries(&self) -> Result<Vec<FileStatistics>> {
        self.read_index()
    }

    /// Find statistics for content with the given checksum
    ///
    /// Records are tried in index order and the first one whose payload
    /// loads wins. A record with a missing, empty or unreadable payload is
    /// skipped, so a damaged entry behaves like a miss until a later rescan
    /// stores a healthy one.
    pub fn lookup(&self, checksum: &str) -> Option<FileStatistics> {
        let index = match self.read_index() {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Ignoring unreadable statistics index: {e}");
                return None;
            }
        };

        for mut entry in index.into_iter().filter(|entry| entry.checksum == checksum) {
            if entry.word_count == 0 {
                entry.frequencies = Some(Vec::new());
                return Some(entry);
            }

            match self.load_payload(entry.id) {
                Ok(frequencies) => {
                    entry.frequencies = Some(frequencies);
                    return Some(entry);
                }
                Err(e) => {
                    log::warn!("Ignoring cached statistics for {}: {e}", entry.source_name);
                }
            }
        }

        None
    }

    /// Load the frequency payload of a record
    pub fn load_payload(&self, id: Uuid) -> Result<Vec<WordFrequency>> {
        let file = match File::open(self.payload_path(id)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::CachePayloadCorrupt { id })
            }
            Err(e) => return Err(e.into()),
        };

        let frequencies: Vec<WordFrequency> = bincode::deserialize_from(BufReader::new(file))
            .map_err(|_| Error::CachePayloadCorrupt { id })?;
        if frequencies.is_empty() {
            return Err(Error::CachePayloadCorrupt { id });
        }

        Ok(frequencies)
    }

    /// Persist statistics: the payload first, then the record appended to the index
    ///
    /// `stats.frequencies` is detached while the record is written and
    /// restored afterwards, whether or not the store succeeded.
    pub fn store(&self, stats: &mut FileStatistics) -> Result<()> {
        let frequencies = stats.frequencies.take();
        let result = self.persist(stats, frequencies.as_deref());
        stats.frequencies = frequencies;
        result
    }

    fn persist(&self, record: &FileStatistics, frequencies: Option<&[WordFrequency]>) -> Result<()> {
        // read first so a corrupt index is reported instead of replaced
        let mut index = self.read_index()?;

        if let Some(frequencies) = frequencies.filter(|f| !f.is_empty()) {
            let path = self.payload_path(record.id);
            write_atomic(&path, |writer| {
                bincode::serialize_into(writer, frequencies)?;
                Ok(())
            })?;
        }

        index.push(record.clone());
        write_atomic(&self.index_path(), |writer| {
            serde_json::to_writer_pretty(writer, &index)?;
            Ok(())
        })?;

        log::debug!(
            "Stored statistics for {} ({} records in index)",
            record.source_name,
            index.len()
        );
        Ok(())
    }

    /// Remove the index and every payload it references, returning the record count
    pub fn clear(&self) -> Result<usize> {
        let index = self.read_index()?;
        for entry in &index {
            match fs::remove_dir_all(self.root.join(entry.id.to_string())) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }

        match fs::remove_file(self.index_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }

        Ok(index.len())
    }

    fn read_index(&self) -> Result<Vec<FileStatistics>> {
        let file = match File::open(self.index_path()) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if file.metadata()?.len() == 0 {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Write a file through a temporary sibling and rename it into place
fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
