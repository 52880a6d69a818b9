//! The word list mapping vocabulary terms to feature indices.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{FeatureError, Result};

/// An ordered vocabulary: every word owns one feature index.
///
/// Built from corpus word counts or loaded from a listing file; the word
/// order on disk is the feature order of every split built against it.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// The `n` most frequent words of `counts`, listed alphabetically.
    ///
    /// Frequency picks the words, the alphabet orders them; ties at the
    /// cutoff break alphabetically as well so the selection is
    /// deterministic.
    pub fn from_counts(counts: &HashMap<String, usize>, n: usize) -> Self {
        let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);

        let mut words: Vec<String> = ranked.into_iter().map(|(w, _)| w.clone()).collect();
        words.sort();
        Self::from_words(words)
    }

    fn from_words(words: Vec<String>) -> Self {
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, index }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Feature index of `word`, if it is part of the vocabulary.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Word owning feature `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// All words in feature order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Writes the listing, one word per line.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for word in &self.words {
            writeln!(out, "{word}")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Loads a listing written by [`Vocabulary::save`].
    pub fn load(path: &Path) -> Result<Self> {
        Self::read_from(BufReader::new(File::open(path)?))
    }

    fn read_from<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        if words.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }
        Ok(Self::from_words(words))
    }
}
