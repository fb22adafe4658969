//! # wordhoard-types
//!
//! Shared domain types for the wordhoard text index.
//!
//! This crate defines the data structures passed between the storage layer,
//! the indexing engine and the command-line front-end:
//! - Occurrences: per-document statistics for a single word
//! - Postings: the inverted index entry for a word
//! - Search results: ranked documents with excerpt lines
//! - Settings: Configuration types
//!
//! ## Usage
//!
//! ```rust
//! use wordhoard_types::{Occurrence, Postings};
//!
//! let mut postings = Postings::new();
//! postings.insert("notes.txt".to_string(), Occurrence::new(2, 14));
//! assert_eq!(postings.total_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod posting;
pub mod result;

pub use config::Settings;
pub use error::WordhoardError;
pub use posting::{Occurrence, Postings, PostingsPatch};
pub use result::{IngestStats, SearchResult};
