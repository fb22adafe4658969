//! RocksDB merge operators for the words and completions column families.
//!
//! Concurrent ingestions touching the same word only ever issue merges, so
//! RocksDB serializes them per key and no update is lost.
//!
//! Malformed values are logged and skipped: returning `None` from a full
//! merge would surface as a corruption error on every later read of the key.

use std::collections::BTreeSet;

use rocksdb::MergeOperands;
use tracing::warn;
use wordhoard_types::{Postings, PostingsPatch};

/// Fold postings patches onto an existing postings value.
pub fn fold_postings<'a>(
    key: &[u8],
    existing: Option<&[u8]>,
    operands: impl IntoIterator<Item = &'a [u8]>,
) -> Postings {
    let mut postings = match existing.map(Postings::from_bytes) {
        Some(Ok(postings)) => postings,
        Some(Err(e)) => {
            warn!(key = %String::from_utf8_lossy(key), error = %e, "Discarding malformed postings");
            Postings::new()
        }
        None => Postings::new(),
    };

    for operand in operands {
        match PostingsPatch::from_bytes(operand) {
            Ok(patch) => postings.apply(patch),
            Err(e) => {
                warn!(key = %String::from_utf8_lossy(key), error = %e, "Skipping malformed postings patch")
            }
        }
    }
    postings
}

/// Compose a run of postings patches into one patch, later patches winning.
pub fn compose_patches<'a>(
    key: &[u8],
    operands: impl IntoIterator<Item = &'a [u8]>,
) -> PostingsPatch {
    let mut patch = PostingsPatch::new();
    for operand in operands {
        match PostingsPatch::from_bytes(operand) {
            Ok(later) => patch.compose(later),
            Err(e) => {
                warn!(key = %String::from_utf8_lossy(key), error = %e, "Skipping malformed postings patch")
            }
        }
    }
    patch
}

/// Union an existing word list with any number of word list operands.
///
/// Output is sorted ascending with no duplicates.
pub fn union_words<'a>(
    key: &[u8],
    existing: Option<&'a [u8]>,
    operands: impl IntoIterator<Item = &'a [u8]>,
) -> Vec<String> {
    let mut words = BTreeSet::new();
    for bytes in existing.into_iter().chain(operands) {
        match serde_json::from_slice::<Vec<String>>(bytes) {
            Ok(list) => words.extend(list),
            Err(e) => {
                warn!(key = %String::from_utf8_lossy(key), error = %e, "Skipping malformed completion list")
            }
        }
    }
    words.into_iter().collect()
}

pub(crate) fn postings_full_merge(
    key: &[u8],
    existing: Option<&[u8]>,
    operands: &MergeOperands,
) -> Option<Vec<u8>> {
    fold_postings(key, existing, operands.iter()).to_bytes().ok()
}

pub(crate) fn postings_partial_merge(
    key: &[u8],
    _existing: Option<&[u8]>,
    operands: &MergeOperands,
) -> Option<Vec<u8>> {
    compose_patches(key, operands.iter()).to_bytes().ok()
}

pub(crate) fn completions_merge(
    key: &[u8],
    existing: Option<&[u8]>,
    operands: &MergeOperands,
) -> Option<Vec<u8>> {
    serde_json::to_vec(&union_words(key, existing, operands.iter())).ok()
}
