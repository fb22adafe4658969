//! Noise word filter.
//!
//! The persisted noise set is loaded once when the engine opens and kept in
//! sync by writing through on every addition. Membership checks never touch
//! storage.

use std::collections::{BTreeSet, HashSet};
use std::sync::{RwLock, RwLockReadGuard};

use tracing::{debug, info};
use wordhoard_storage::{Storage, StorageError};

use crate::normalizer::Normalizer;

/// Engine-owned cache of the noise word set.
#[derive(Debug, Default)]
pub struct NoiseFilter {
    words: RwLock<HashSet<String>>,
}

impl NoiseFilter {
    /// Load the persisted noise words.
    pub fn load(storage: &Storage) -> Result<Self, StorageError> {
        let words = storage.load_noise_words()?;
        info!(count = words.len(), "Loaded noise words");
        Ok(Self {
            words: RwLock::new(words),
        })
    }

    /// Pure membership test against the cached set.
    pub fn is_noise(&self, word: &str) -> bool {
        self.read().contains(word)
    }

    /// Read access to the whole set, for filtering many words under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, HashSet<String>> {
        self.words.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Register every normalized word of `text` as noise.
    ///
    /// Only words not already known are written. Returns how many were added.
    /// Existing index entries for these words are left in place.
    pub fn add_noise_words(
        &self,
        storage: &Storage,
        normalizer: &Normalizer,
        text: &str,
    ) -> Result<usize, StorageError> {
        let mut words = self.words.write().unwrap_or_else(|e| e.into_inner());

        let fresh: BTreeSet<String> = normalizer
            .extract_words(text, |_| false)
            .into_iter()
            .map(|(word, _)| word)
            .filter(|word| !words.contains(word))
            .collect();

        if fresh.is_empty() {
            debug!("No new noise words");
            return Ok(0);
        }

        let fresh: Vec<String> = fresh.into_iter().collect();
        storage.put_noise_words(&fresh)?;
        let added = fresh.len();
        words.extend(fresh);

        info!(added = added, total = words.len(), "Added noise words");
        Ok(added)
    }

    /// Forget every cached noise word. Storage is left untouched.
    pub fn reset(&self) {
        self.words
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_add_and_check() {
        let (storage, _temp) = setup();
        let filter = NoiseFilter::load(&storage).unwrap();
        let normalizer = Normalizer::new();

        let added = filter
            .add_noise_words(&storage, &normalizer, "The, and A the")
            .unwrap();

        assert_eq!(added, 3);
        assert!(filter.is_noise("the"));
        assert!(filter.is_noise("and"));
        assert!(filter.is_noise("a"));
        assert!(!filter.is_noise("apple"));
    }

    #[test]
    fn test_add_is_idempotent() {
        let (storage, _temp) = setup();
        let filter = NoiseFilter::load(&storage).unwrap();
        let normalizer = Normalizer::new();

        filter.add_noise_words(&storage, &normalizer, "of to in").unwrap();
        let again = filter.add_noise_words(&storage, &normalizer, "of to in").unwrap();

        assert_eq!(again, 0);
        assert_eq!(filter.len(), 3);
        assert_eq!(storage.load_noise_words().unwrap().len(), 3);
    }

    #[test]
    fn test_reload_from_storage() {
        let (storage, _temp) = setup();
        let normalizer = Normalizer::new();
        NoiseFilter::load(&storage)
            .unwrap()
            .add_noise_words(&storage, &normalizer, "it's")
            .unwrap();

        let reloaded = NoiseFilter::load(&storage).unwrap();
        assert!(reloaded.is_noise("it"));
    }

    #[test]
    fn test_empty_text_adds_nothing() {
        let (storage, _temp) = setup();
        let filter = NoiseFilter::load(&storage).unwrap();
        let added = filter
            .add_noise_words(&storage, &Normalizer::new(), "  123 !! ")
            .unwrap();
        assert_eq!(added, 0);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_reset_clears_cache() {
        let (storage, _temp) = setup();
        let filter = NoiseFilter::load(&storage).unwrap();
        filter
            .add_noise_words(&storage, &Normalizer::new(), "the")
            .unwrap();
        filter.reset();
        assert!(!filter.is_noise("the"));
    }
}
