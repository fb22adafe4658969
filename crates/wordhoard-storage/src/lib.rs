//! Storage layer for wordhoard.
//!
//! Provides RocksDB-backed storage with:
//! - Column family isolation for the four collections (contents, noise,
//!   words, completions)
//! - Merge operators so per-word postings and per-letter completion sets
//!   are updated atomically without read-modify-write
//! - Atomic per-document writes via WriteBatch

pub mod batch;
pub mod column_families;
pub mod db;
pub mod error;
pub mod merge;

pub use batch::IndexBatch;
pub use db::{Storage, StorageStats};
pub use error::StorageError;
