//! Indexing pipeline.
//!
//! Ingesting a document stores its content and, in the same write batch,
//! upserts its occurrence for every non-noise word, drops it from words its
//! previous content had but the new one lacks, and records the words for
//! completion.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};
use wordhoard_storage::{IndexBatch, Storage, StorageError};
use wordhoard_types::{IngestStats, Occurrence};

use crate::noise::NoiseFilter;
use crate::normalizer::Normalizer;

/// Append a newline unless the text already ends with one.
pub fn newline_terminated(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{}\n", text))
    }
}

/// Per-document word statistics from a single scan.
pub fn index_text(
    normalizer: &Normalizer,
    text: &str,
    is_noise: impl Fn(&str) -> bool,
) -> BTreeMap<String, Occurrence> {
    let mut index: BTreeMap<String, Occurrence> = BTreeMap::new();
    for (word, offset) in normalizer.extract_words(text, is_noise) {
        index
            .entry(word)
            .and_modify(Occurrence::record)
            .or_insert_with(|| Occurrence::new(1, offset));
    }
    index
}

/// Store and index a document, replacing whatever was stored under `name`.
pub fn add_content(
    storage: &Storage,
    normalizer: &Normalizer,
    noise: &NoiseFilter,
    name: &str,
    text: &str,
) -> Result<IngestStats, StorageError> {
    let content = newline_terminated(text);

    let index = {
        let noise_words = noise.read();
        index_text(normalizer, &content, |w| noise_words.contains(w))
    };

    let mut batch = IndexBatch::new();
    batch.put_content(name, &content);

    // Words of the old content are taken unfiltered so entries for words
    // that became noise since the last ingestion are dropped too.
    let stale: BTreeSet<String> = match storage.get_content(name)? {
        Some(previous) => normalizer
            .extract_words(&previous, |_| false)
            .into_iter()
            .map(|(word, _)| word)
            .filter(|word| !index.contains_key(word))
            .collect(),
        None => BTreeSet::new(),
    };
    for word in &stale {
        batch.remove_occurrence(word, name);
    }

    for (word, occurrence) in &index {
        batch.upsert_occurrence(word, name, *occurrence);
        batch.add_completion(word);
    }

    debug!(doc = name, words = batch.postings_len(), "Committing document");
    storage.commit(batch)?;

    let stats = IngestStats {
        words_indexed: index.len(),
        words_removed: stale.len(),
    };
    info!(
        doc = name,
        words_indexed = stats.words_indexed,
        words_removed = stats.words_removed,
        "Indexed document"
    );
    Ok(stats)
}
