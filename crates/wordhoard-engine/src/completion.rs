//! Prefix completion for a partially typed word.

use tracing::debug;
use wordhoard_storage::{Storage, StorageError};

use crate::noise::NoiseFilter;
use crate::normalizer::Normalizer;

/// The normalized word currently being typed, if any.
///
/// Text whose last character is not alphabetic has no word in progress.
/// Noise filtering is not applied: a prefix is not a finished word.
pub fn partial_word(normalizer: &Normalizer, text: &str) -> Option<String> {
    let last = text.chars().next_back()?;
    if !last.is_alphabetic() {
        return None;
    }
    let token = text.split_whitespace().next_back()?;
    normalizer.normalize(token)
}

/// Known words starting with the word in progress, sorted ascending.
pub fn complete(
    storage: &Storage,
    normalizer: &Normalizer,
    noise: &NoiseFilter,
    text: &str,
) -> Result<Vec<String>, StorageError> {
    let Some(prefix) = partial_word(normalizer, text) else {
        return Ok(Vec::new());
    };
    let Some(first) = prefix.chars().next() else {
        return Ok(Vec::new());
    };

    let noise_words = noise.read();
    let candidates: Vec<String> = storage
        .get_completions(first)?
        .into_iter()
        .filter(|word| word.starts_with(&prefix) && !noise_words.contains(word))
        .collect();

    debug!(prefix = %prefix, candidates = candidates.len(), "Completion lookup");
    Ok(candidates)
}
