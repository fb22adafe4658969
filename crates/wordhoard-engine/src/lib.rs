//! # wordhoard-engine
//!
//! Full-text indexing and retrieval over named text documents.
//!
//! This crate builds a persistent inverted index over normalized words and
//! answers two kinds of query: ranked multi-term search with line excerpts,
//! and prefix completion of a partially typed word.
//!
//! ## Features
//! - Whitespace tokenization with a pluggable [`Stemmer`]
//! - Persisted noise words, cached in memory
//! - Term-frequency scoring with deterministic tie-breaking
//! - Re-ingestion replaces a document's previous index entries
//!
//! ## Usage
//!
//! ```no_run
//! use wordhoard_engine::Engine;
//!
//! let engine = Engine::create(std::path::Path::new("./data"))?;
//! engine.add_noise_words("the a an")?;
//! engine.add_content("notes.txt", "The quick brown fox\njumps over the dog")?;
//!
//! for result in engine.find("fox dog")? {
//!     println!("{} ({})", result.name, result.score);
//! }
//! assert_eq!(engine.complete("qu")?, vec!["quick"]);
//! # Ok::<(), wordhoard_engine::EngineError>(())
//! ```

pub mod completion;
pub mod engine;
pub mod error;
pub mod indexer;
pub mod noise;
pub mod normalizer;
pub mod search;

pub use engine::Engine;
pub use error::EngineError;
pub use noise::NoiseFilter;
pub use normalizer::{tokenize, Normalizer, PossessiveStemmer, Stemmer, Token};
pub use search::excerpt_lines;
pub use wordhoard_types::{IngestStats, Occurrence, SearchResult};
