//! Per-document write batch.
//!
//! Collects everything one ingestion writes so [`Storage::commit`] can apply
//! it as a single RocksDB `WriteBatch`.
//!
//! [`Storage::commit`]: crate::Storage::commit

use std::collections::{BTreeMap, BTreeSet};

use wordhoard_types::{Occurrence, PostingsPatch};

/// Pending writes for one document ingestion.
#[derive(Debug, Default)]
pub struct IndexBatch {
    pub(crate) content: Option<(String, String)>,
    pub(crate) postings: BTreeMap<String, PostingsPatch>,
    pub(crate) completions: BTreeMap<char, BTreeSet<String>>,
}

impl IndexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a document's stored content.
    pub fn put_content(&mut self, name: &str, text: &str) {
        self.content = Some((name.to_string(), text.to_string()));
    }

    /// Set the occurrence of `word` in document `name`.
    pub fn upsert_occurrence(&mut self, word: &str, name: &str, occurrence: Occurrence) {
        self.postings
            .entry(word.to_string())
            .or_default()
            .compose(PostingsPatch::upsert(name, occurrence));
    }

    /// Drop document `name` from the postings of `word`.
    pub fn remove_occurrence(&mut self, word: &str, name: &str) {
        self.postings
            .entry(word.to_string())
            .or_default()
            .compose(PostingsPatch::remove(name));
    }

    /// Record `word` in the completion set for its first character.
    pub fn add_completion(&mut self, word: &str) {
        if let Some(first) = word.chars().next() {
            self.completions
                .entry(first)
                .or_default()
                .insert(word.to_string());
        }
    }

    /// Number of distinct words with a postings change.
    pub fn postings_len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.postings.is_empty() && self.completions.is_empty()
    }
}
