//! Result types returned by the engine.

use serde::{Deserialize, Serialize};

/// A document matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document name
    pub name: String,
    /// Sum of occurrence counts over every matched query term
    pub score: u64,
    /// Lines holding a matched term, in document order, each ending in its
    /// newline
    pub lines: Vec<String>,
}

impl SearchResult {
    pub fn new(name: String, score: u64, lines: Vec<String>) -> Self {
        Self { name, score, lines }
    }
}

/// Summary of a single document ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Distinct words written to the inverted index for this document
    pub words_indexed: usize,
    /// Words whose entry for this document was dropped because the new
    /// content no longer contains them
    pub words_removed: usize,
}
