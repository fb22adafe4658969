//! Inverted index entry types.
//!
//! A word's [`Postings`] maps each document containing the word to an
//! [`Occurrence`]. Updates are expressed as a [`PostingsPatch`] so the
//! storage layer can fold them into the stored postings with a merge
//! instead of a read-modify-write.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How often and where a word first appears in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Number of occurrences, always >= 1
    pub count: u64,
    /// Byte offset of the raw token that produced the first occurrence
    pub first_offset: usize,
}

impl Occurrence {
    pub fn new(count: u64, first_offset: usize) -> Self {
        Self {
            count,
            first_offset,
        }
    }

    /// Record a later occurrence. The first offset never moves.
    pub fn record(&mut self) {
        self.count += 1;
    }
}

/// Document name -> occurrence for a single word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Postings(BTreeMap<String, Occurrence>);

impl Postings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc_name: String, occurrence: Occurrence) {
        self.0.insert(doc_name, occurrence);
    }

    pub fn get(&self, doc_name: &str) -> Option<&Occurrence> {
        self.0.get(doc_name)
    }

    pub fn contains(&self, doc_name: &str) -> bool {
        self.0.contains_key(doc_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate documents in ascending name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Occurrence> {
        self.0.iter()
    }

    /// Sum of counts over every document.
    pub fn total_count(&self) -> u64 {
        self.0.values().map(|o| o.count).sum()
    }

    /// Apply a patch: upserts overwrite, removals drop the document.
    pub fn apply(&mut self, patch: PostingsPatch) {
        for (doc_name, change) in patch.0 {
            match change {
                Some(occurrence) => {
                    self.0.insert(doc_name, occurrence);
                }
                None => {
                    self.0.remove(&doc_name);
                }
            }
        }
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl<'a> IntoIterator for &'a Postings {
    type Item = (&'a String, &'a Occurrence);
    type IntoIter = btree_map::Iter<'a, String, Occurrence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A pending change to one word's postings.
///
/// `Some` upserts the document's occurrence, `None` removes the document.
/// Patches compose: applying `a` then `b` equals applying `a.compose(b)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingsPatch(BTreeMap<String, Option<Occurrence>>);

impl PostingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that sets a single document's occurrence.
    pub fn upsert(doc_name: impl Into<String>, occurrence: Occurrence) -> Self {
        let mut patch = Self::new();
        patch.0.insert(doc_name.into(), Some(occurrence));
        patch
    }

    /// Patch that removes a single document.
    pub fn remove(doc_name: impl Into<String>) -> Self {
        let mut patch = Self::new();
        patch.0.insert(doc_name.into(), None);
        patch
    }

    /// Fold a later patch into this one; the later change wins per document.
    pub fn compose(&mut self, later: PostingsPatch) {
        self.0.extend(later.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
