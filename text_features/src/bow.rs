use ndarray::Array1;

use crate::vocabulary::Vocabulary;

/// Bag-of-words representation of one tokenized document.
///
/// One count per vocabulary term; words outside the vocabulary are
/// ignored.
pub fn bag_of_words(words: &[String], voc: &Vocabulary) -> Array1<f64> {
    let mut bow = Array1::zeros(voc.len());
    for word in words {
        if let Some(i) = voc.index_of(word) {
            bow[i] += 1.0;
        }
    }
    bow
}
