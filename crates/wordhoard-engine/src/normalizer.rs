//! Tokenization and word normalization.
//!
//! Text is split on whitespace into raw tokens that remember their byte
//! offset. A token becomes an index key by lowercasing it, running it
//! through a [`Stemmer`] and keeping only `[a-z]`.

use std::borrow::Cow;
use std::fmt;

/// A whitespace-delimited slice of the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token exactly as it appears in the text
    pub raw: &'a str,
    /// Byte offset of the token start
    pub offset: usize,
}

/// Split text into maximal runs of non-whitespace characters.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    raw: &text[s..i],
                    offset: s,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            raw: &text[s..],
            offset: s,
        });
    }
    tokens
}

/// Reduces a lowercased token before non-letters are stripped.
pub trait Stemmer: Send + Sync {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Strips a trailing possessive `'s`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PossessiveStemmer;

impl Stemmer for PossessiveStemmer {
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(token.strip_suffix("'s").unwrap_or(token))
    }
}

/// Turns raw text into normalized index words.
pub struct Normalizer {
    stemmer: Box<dyn Stemmer>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Normalizer with the possessive-stripping stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(PossessiveStemmer)
    }

    pub fn with_stemmer(stemmer: impl Stemmer + 'static) -> Self {
        Self {
            stemmer: Box::new(stemmer),
        }
    }

    /// Normalize a single token. Returns `None` when nothing alphabetic is left.
    pub fn normalize(&self, token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        let word: String = self
            .stemmer
            .stem(&lower)
            .chars()
            .filter(|c| c.is_ascii_lowercase())
            .collect();
        if word.is_empty() {
            None
        } else {
            Some(word)
        }
    }

    /// Extract `(word, offset)` pairs in document order, skipping noise.
    ///
    /// The offset is where the raw token started, not the normalized word.
    pub fn extract_words(
        &self,
        text: &str,
        is_noise: impl Fn(&str) -> bool,
    ) -> Vec<(String, usize)> {
        tokenize(text)
            .into_iter()
            .filter_map(|token| {
                self.normalize(token.raw)
                    .filter(|word| !is_noise(word))
                    .map(|word| (word, token.offset))
            })
            .collect()
    }
}
