//! RocksDB wrapper for wordhoard storage.
//!
//! Provides:
//! - Database open/close with column family setup
//! - Document content reads and writes
//! - Noise word persistence
//! - Postings and completion lookups
//! - Atomic per-document index batches

use rocksdb::{ColumnFamily, IteratorMode, Options, WriteBatch, DB};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use crate::batch::IndexBatch;
use crate::column_families::{
    build_cf_descriptors, ALL_CF_NAMES, CF_COMPLETIONS, CF_CONTENTS, CF_NOISE, CF_WORDS,
};
use crate::error::StorageError;
use wordhoard_types::Postings;

/// Main storage interface for wordhoard
pub struct Storage {
    db: DB,
}

impl Storage {
    /// Open storage at the given path, creating if necessary
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_background_jobs(4);

        let cf_descriptors = build_cf_descriptors();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        Ok(Self { db })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    // ==================== Content Methods ====================

    /// Store a document's text, replacing any previous content.
    pub fn put_content(&self, name: &str, text: &str) -> Result<(), StorageError> {
        let cf = self.cf(CF_CONTENTS)?;
        self.db.put_cf(&cf, name.as_bytes(), text.as_bytes())?;
        debug!(doc = name, bytes = text.len(), "Stored content");
        Ok(())
    }

    /// Get a document's text by name.
    pub fn get_content(&self, name: &str) -> Result<Option<String>, StorageError> {
        let cf = self.cf(CF_CONTENTS)?;
        match self.db.get_cf(&cf, name.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Encoding(format!("content of {}: {}", name, e))),
            None => Ok(None),
        }
    }

    // ==================== Noise Methods ====================

    /// Load every persisted noise word.
    pub fn load_noise_words(&self) -> Result<HashSet<String>, StorageError> {
        let cf = self.cf(CF_NOISE)?;
        let mut words = HashSet::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, _) = item?;
            let word = std::str::from_utf8(&key)
                .map_err(|e| StorageError::Encoding(format!("noise key: {}", e)))?;
            words.insert(word.to_string());
        }
        Ok(words)
    }

    /// Persist noise words in a single batch.
    pub fn put_noise_words<S: AsRef<str>>(&self, words: &[S]) -> Result<(), StorageError> {
        if words.is_empty() {
            return Ok(());
        }
        let cf = self.cf(CF_NOISE)?;
        let mut batch = WriteBatch::default();
        for word in words {
            batch.put_cf(&cf, word.as_ref().as_bytes(), b"");
        }
        self.db.write(batch)?;
        debug!(count = words.len(), "Stored noise words");
        Ok(())
    }

    // ==================== Index Methods ====================

    /// Get the postings for a word. Missing words yield empty postings.
    pub fn get_postings(&self, word: &str) -> Result<Postings, StorageError> {
        let cf = self.cf(CF_WORDS)?;
        match self.db.get_cf(&cf, word.as_bytes())? {
            Some(bytes) => Ok(Postings::from_bytes(&bytes)?),
            None => Ok(Postings::new()),
        }
    }

    /// Get the known words starting with `first`, sorted ascending.
    pub fn get_completions(&self, first: char) -> Result<Vec<String>, StorageError> {
        let cf = self.cf(CF_COMPLETIONS)?;
        let mut key = [0u8; 4];
        match self.db.get_cf(&cf, first.encode_utf8(&mut key).as_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    /// Apply an ingestion batch atomically.
    ///
    /// Postings and completions are written as merges so concurrent batches
    /// touching the same word or letter never overwrite each other.
    pub fn commit(&self, batch: IndexBatch) -> Result<(), StorageError> {
        if batch.is_empty() {
            return Ok(());
        }
        let contents_cf = self.cf(CF_CONTENTS)?;
        let words_cf = self.cf(CF_WORDS)?;
        let completions_cf = self.cf(CF_COMPLETIONS)?;

        let mut write = WriteBatch::default();

        if let Some((name, text)) = &batch.content {
            write.put_cf(&contents_cf, name.as_bytes(), text.as_bytes());
        }
        for (word, patch) in &batch.postings {
            write.merge_cf(&words_cf, word.as_bytes(), patch.to_bytes()?);
        }
        for (first, words) in &batch.completions {
            let mut key = [0u8; 4];
            let list: Vec<&String> = words.iter().collect();
            write.merge_cf(
                &completions_cf,
                first.encode_utf8(&mut key).as_bytes(),
                serde_json::to_vec(&list)?,
            );
        }

        self.db.write(write)?;
        debug!(
            postings = batch.postings.len(),
            completion_keys = batch.completions.len(),
            "Committed index batch"
        );
        Ok(())
    }

    // ==================== Maintenance Methods ====================

    /// Delete every key in every column family.
    pub fn clear(&self) -> Result<(), StorageError> {
        for cf_name in ALL_CF_NAMES {
            let cf = self.cf(cf_name)?;
            let mut batch = WriteBatch::default();
            let mut count = 0u64;
            for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
                let (key, _) = item?;
                batch.delete_cf(&cf, &key);
                count += 1;
            }
            if count > 0 {
                self.db.write(batch)?;
            }
            debug!(cf = cf_name, deleted = count, "Cleared column family");
        }
        info!("Cleared all collections");
        Ok(())
    }

    /// Flush all column families to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.flush_cf(&cf)?;
            }
        }
        Ok(())
    }

    /// Trigger full compaction on all column families.
    ///
    /// Compaction also folds pending merge operands into their base values.
    pub fn compact(&self) -> Result<(), StorageError> {
        info!("Starting full compaction");
        for cf_name in ALL_CF_NAMES {
            self.compact_cf(cf_name)?;
        }
        info!("Compaction complete");
        Ok(())
    }

    /// Trigger compaction on a specific column family.
    pub fn compact_cf(&self, cf_name: &str) -> Result<(), StorageError> {
        let cf = self.cf(cf_name)?;
        self.db.compact_range_cf(&cf, None::<&[u8]>, None::<&[u8]>);
        debug!("Compacted column family {}", cf_name);
        Ok(())
    }

    /// Get database statistics.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            document_count: self.count_cf_entries(self.cf(CF_CONTENTS)?)?,
            noise_word_count: self.count_cf_entries(self.cf(CF_NOISE)?)?,
            word_count: self.count_cf_entries(self.cf(CF_WORDS)?)?,
            completion_key_count: self.count_cf_entries(self.cf(CF_COMPLETIONS)?)?,
            disk_usage_bytes: self.get_disk_usage(),
        })
    }

    fn count_cf_entries(&self, cf: &ColumnFamily) -> Result<u64, StorageError> {
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    fn get_disk_usage(&self) -> u64 {
        let mut total_size = 0u64;
        if let Ok(entries) = std::fs::read_dir(self.db.path()) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }
}

/// Statistics about the storage.
#[derive(Debug, Default)]
pub struct StorageStats {
    /// Number of stored documents
    pub document_count: u64,
    /// Number of noise words
    pub noise_word_count: u64,
    /// Number of words in the inverted index (including words whose
    /// postings have become empty)
    pub word_count: u64,
    /// Number of first letters with completions
    pub completion_key_count: u64,
    /// Total disk usage in bytes
    pub disk_usage_bytes: u64,
}
