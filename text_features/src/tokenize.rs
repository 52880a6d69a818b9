//! Word extraction for review documents.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// ASCII punctuation replaced by spaces before splitting.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Splits documents into lowercase words, dropping punctuation, short
/// words and (optionally) stopwords and digits.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
    strip_digits: bool,
}

impl Tokenizer {
    /// A tokenizer keeping every word longer than two characters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the given words after lowercasing.
    pub fn with_stopwords(mut self, stopwords: HashSet<String>) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Treats digits like punctuation.
    pub fn strip_digits(mut self) -> Self {
        self.strip_digits = true;
        self
    }

    /// The words of `text`: lowercased, punctuation replaced by spaces,
    /// keeping only words longer than two characters that are not
    /// stopwords.
    pub fn words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let cleaned: String = lowered
            .chars()
            .map(|c| {
                if PUNCTUATION.contains(c) || (self.strip_digits && c.is_ascii_digit()) {
                    ' '
                } else {
                    c
                }
            })
            .collect();
        cleaned
            .split_whitespace()
            .filter(|w| w.chars().count() > 2 && !self.stopwords.contains(*w))
            .map(str::to_owned)
            .collect()
    }
}

/// Loads a whitespace-separated stopword listing.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.split_whitespace().map(str::to_owned).collect())
}
