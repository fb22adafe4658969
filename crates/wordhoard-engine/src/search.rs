//! Ranked multi-term search with line excerpts.
//!
//! A document's score is the sum of its occurrence counts over every matched
//! query term. Its excerpt is every line holding an occurrence of a matched
//! term, in document order and without repeats. Lines with a term's first
//! occurrence are always among them.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;
use wordhoard_storage::Storage;
use wordhoard_types::SearchResult;

use crate::error::EngineError;
use crate::noise::NoiseFilter;
use crate::normalizer::Normalizer;

#[derive(Debug, Default)]
struct DocumentMatch {
    score: u64,
    terms: HashSet<String>,
    offsets: BTreeSet<usize>,
}

/// Normalized, de-duplicated, non-noise query terms.
pub fn query_terms(normalizer: &Normalizer, noise: &NoiseFilter, query: &str) -> HashSet<String> {
    let noise_words = noise.read();
    normalizer
        .extract_words(query, |w| noise_words.contains(w))
        .into_iter()
        .map(|(word, _)| word)
        .collect()
}

/// Run a query and return every matching document, best first.
pub fn find(
    storage: &Storage,
    normalizer: &Normalizer,
    noise: &NoiseFilter,
    query: &str,
) -> Result<Vec<SearchResult>, EngineError> {
    let terms = query_terms(normalizer, noise, query);
    if terms.is_empty() {
        debug!(query = query, "Query has no searchable terms");
        return Ok(Vec::new());
    }

    let mut matches: BTreeMap<String, DocumentMatch> = BTreeMap::new();
    for term in &terms {
        let postings = storage.get_postings(term)?;
        for (doc_name, occurrence) in &postings {
            let entry = matches.entry(doc_name.clone()).or_default();
            entry.score += occurrence.count;
            entry.terms.insert(term.clone());
            entry.offsets.insert(occurrence.first_offset);
        }
    }

    let mut results = Vec::with_capacity(matches.len());
    for (name, mut found) in matches {
        let content = storage
            .get_content(&name)?
            .ok_or_else(|| EngineError::NotFound(name.clone()))?;
        found.offsets.extend(
            normalizer
                .extract_words(&content, |w| !found.terms.contains(w))
                .into_iter()
                .map(|(_, offset)| offset),
        );
        let lines = excerpt_lines(&content, found.offsets);
        results.push(SearchResult::new(name, found.score, lines));
    }

    rank(&mut results);
    debug!(
        query = query,
        terms = terms.len(),
        results = results.len(),
        "Search complete"
    );
    Ok(results)
}

/// Sort by descending score, then ascending document name.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
}

/// Byte offset of the start of the line containing `offset`.
fn line_start(content: &str, offset: usize) -> usize {
    content[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Lines containing the given offsets, each once, in document order.
///
/// Each line keeps its trailing newline. Offsets that do not fall on a
/// character boundary of `content` are ignored.
pub fn excerpt_lines(content: &str, offsets: impl IntoIterator<Item = usize>) -> Vec<String> {
    let starts: BTreeSet<usize> = offsets
        .into_iter()
        .filter(|&offset| content.is_char_boundary(offset))
        .map(|offset| line_start(content, offset))
        .collect();

    starts
        .into_iter()
        .map(|start| {
            let end = content[start..]
                .find('\n')
                .map_or(content.len(), |i| start + i + 1);
            content[start..end].to_string()
        })
        .collect()
}
