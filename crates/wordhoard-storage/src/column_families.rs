//! Column family definitions for RocksDB.
//!
//! Each column family holds one logical collection:
//! - contents: Raw document text keyed by document name (Zstd compressed)
//! - noise: Noise words, presence only
//! - words: Inverted index postings per normalized word (merge operator)
//! - completions: Known words grouped by first letter (merge operator)

use rocksdb::{ColumnFamilyDescriptor, Options};

use crate::merge::{completions_merge, postings_full_merge, postings_partial_merge};

/// Column family name for document contents
pub const CF_CONTENTS: &str = "contents";

/// Column family name for noise words
pub const CF_NOISE: &str = "noise";

/// Column family name for the inverted index
pub const CF_WORDS: &str = "words";

/// Column family name for the completion index
pub const CF_COMPLETIONS: &str = "completions";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_CONTENTS, CF_NOISE, CF_WORDS, CF_COMPLETIONS];

/// Create column family options for contents (large values, compressed)
fn contents_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Create column family options for words (postings patches merged in place)
fn words_options() -> Options {
    let mut opts = Options::default();
    opts.set_merge_operator(
        "wordhoard.postings",
        postings_full_merge,
        postings_partial_merge,
    );
    opts
}

/// Create column family options for completions (set-union merge)
fn completions_options() -> Options {
    let mut opts = Options::default();
    opts.set_merge_operator_associative("wordhoard.completions", completions_merge);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_CONTENTS, contents_options()),
        ColumnFamilyDescriptor::new(CF_NOISE, Options::default()),
        ColumnFamilyDescriptor::new(CF_WORDS, words_options()),
        ColumnFamilyDescriptor::new(CF_COMPLETIONS, completions_options()),
    ]
}
