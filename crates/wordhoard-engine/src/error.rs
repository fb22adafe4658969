//! Engine error types.

use thiserror::Error;
use wordhoard_storage::StorageError;

/// Errors that can occur during indexing and retrieval.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Document not found in the content store
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
