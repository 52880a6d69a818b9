//! Corpus preparation for the sentiment classifiers.
//!
//! Turns directories of movie-review text files into the dense feature
//! matrices and label vectors the classifiers consume: tokenization,
//! vocabulary building, bag-of-words extraction and gzip split files.

pub mod bow;
pub mod dataset;
pub mod error;
pub mod tokenize;
pub mod vocabulary;

pub use error::{FeatureError, Result};
pub use tokenize::Tokenizer;
pub use vocabulary::Vocabulary;
