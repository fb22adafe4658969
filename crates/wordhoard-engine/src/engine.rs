//! Engine facade.
//!
//! Owns the storage handle, the normalizer and the noise cache, and exposes
//! the operations used by callers. `Engine` is `Send + Sync`; share it with
//! `Arc<Engine>` to serve concurrent requests.

use std::path::Path;

use tracing::info;
use wordhoard_storage::{Storage, StorageStats};
use wordhoard_types::{IngestStats, SearchResult};

use crate::error::EngineError;
use crate::noise::NoiseFilter;
use crate::normalizer::Normalizer;
use crate::{completion, indexer, search};

/// Full-text index over named documents.
pub struct Engine {
    storage: Storage,
    normalizer: Normalizer,
    noise: NoiseFilter,
}

impl Engine {
    /// Open (or create) the store at `path` and load the noise words.
    pub fn create(path: &Path) -> Result<Self, EngineError> {
        Self::with_normalizer(path, Normalizer::new())
    }

    /// Like [`Engine::create`] with a custom normalizer.
    pub fn with_normalizer(path: &Path, normalizer: Normalizer) -> Result<Self, EngineError> {
        let storage = Storage::open(path)?;
        let noise = NoiseFilter::load(&storage)?;
        info!(path = ?path, noise_words = noise.len(), "Engine ready");
        Ok(Self {
            storage,
            normalizer,
            noise,
        })
    }

    /// Flush and release the store.
    pub fn close(self) -> Result<(), EngineError> {
        self.storage.flush()?;
        info!("Engine closed");
        Ok(())
    }

    /// Erase all content, index, noise and completion state.
    pub fn clear(&self) -> Result<(), EngineError> {
        self.storage.clear()?;
        self.noise.reset();
        Ok(())
    }

    /// Register every word of `text` as noise. Returns the number of new words.
    pub fn add_noise_words(&self, text: &str) -> Result<usize, EngineError> {
        Ok(self
            .noise
            .add_noise_words(&self.storage, &self.normalizer, text)?)
    }

    pub fn is_noise(&self, word: &str) -> bool {
        self.noise.is_noise(word)
    }

    /// Store and index a document, superseding any earlier version.
    pub fn add_content(&self, name: &str, text: &str) -> Result<IngestStats, EngineError> {
        Ok(indexer::add_content(
            &self.storage,
            &self.normalizer,
            &self.noise,
            name,
            text,
        )?)
    }

    /// Stored text of a document.
    pub fn doc_content(&self, name: &str) -> Result<String, EngineError> {
        self.storage
            .get_content(name)?
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    /// All documents matching `query`, best first.
    pub fn find(&self, query: &str) -> Result<Vec<SearchResult>, EngineError> {
        search::find(&self.storage, &self.normalizer, &self.noise, query)
    }

    /// Completions for the word being typed at the end of `text`.
    pub fn complete(&self, text: &str) -> Result<Vec<String>, EngineError> {
        Ok(completion::complete(
            &self.storage,
            &self.normalizer,
            &self.noise,
            text,
        )?)
    }

    pub fn stats(&self) -> Result<StorageStats, EngineError> {
        Ok(self.storage.get_stats()?)
    }

    /// Compact one column family, or all of them.
    pub fn compact(&self, cf_name: Option<&str>) -> Result<(), EngineError> {
        match cf_name {
            Some(name) => self.storage.compact_cf(name)?,
            None => self.storage.compact()?,
        }
        Ok(())
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_engine() -> (Engine, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let engine = Engine::create(temp_dir.path()).unwrap();
        (engine, temp_dir)
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_doc_content_not_found() {
        let (engine, _temp) = create_test_engine();
        match engine.doc_content("nope") {
            Err(EngineError::NotFound(name)) => assert_eq!(name, "nope"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_clear_resets_noise_cache() {
        let (engine, _temp) = create_test_engine();
        engine.add_noise_words("the").unwrap();
        engine.add_content("doc", "the cat").unwrap();

        engine.clear().unwrap();

        assert!(!engine.is_noise("the"));
        assert!(engine.find("cat").unwrap().is_empty());
        assert!(matches!(
            engine.doc_content("doc"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_noise_survives_close_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let engine = Engine::create(temp_dir.path()).unwrap();
        engine.add_noise_words("and or").unwrap();
        engine.close().unwrap();

        let engine = Engine::create(temp_dir.path()).unwrap();
        assert!(engine.is_noise("and"));
        assert!(engine.is_noise("or"));
    }

    #[test]
    fn test_find_surfaces_missing_content() {
        let (engine, _temp) = create_test_engine();
        let mut batch = wordhoard_storage::IndexBatch::new();
        batch.upsert_occurrence("orphan", "ghost", wordhoard_types::Occurrence::new(1, 0));
        engine.storage.commit(batch).unwrap();

        match engine.find("orphan") {
            Err(EngineError::NotFound(name)) => assert_eq!(name, "ghost"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_compact_keeps_data() {
        let (engine, _temp) = create_test_engine();
        engine.add_content("doc", "compact me").unwrap();
        engine.compact(None).unwrap();
        engine.compact(Some("words")).unwrap();
        assert_eq!(engine.find("compact").unwrap().len(), 1);
        assert!(engine.compact(Some("bogus")).is_err());
    }
}
