//! Labeled split assembly and on-disk persistence.
//!
//! A split is a `(X, Y)` pair: bag-of-words rows for every document under
//! a directory's `pos/` and `neg/` folders, labeled 1 and 0. On disk a
//! split is gzip-compressed dense text, one example per row with the label
//! as the final column.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::bow::bag_of_words;
use crate::error::{FeatureError, Result};
use crate::tokenize::Tokenizer;
use crate::vocabulary::Vocabulary;

/// Files under `dir`, sorted by name so feature rows are deterministic.
fn document_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.retain(|p| p.is_file());
    paths.sort();
    Ok(paths)
}

/// Word counts across every document under the `pos` and `neg`
/// subdirectories of `root`.
pub fn corpus_counts(root: &Path, tok: &Tokenizer) -> Result<HashMap<String, usize>> {
    let mut counts = HashMap::new();
    for class in ["pos", "neg"] {
        for path in document_paths(&root.join(class))? {
            let text = fs::read_to_string(&path)?;
            for word in tok.words(&text) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }
    Ok(counts)
}

/// Builds the features and labels of one split directory.
///
/// Documents under `pos/` become rows labeled 1, documents under `neg/`
/// rows labeled 0, in sorted filename order.
///
/// # Errors
/// Fails on unreadable files or when the directories hold no documents.
pub fn load_split_dir(
    root: &Path,
    voc: &Vocabulary,
    tok: &Tokenizer,
) -> Result<(Array2<f64>, Array1<f64>)> {
    let mut rows: Vec<Array1<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();
    for (class, label) in [("pos", 1.0), ("neg", 0.0)] {
        for path in document_paths(&root.join(class))? {
            let text = fs::read_to_string(&path)?;
            rows.push(bag_of_words(&tok.words(&text), voc));
            labels.push(label);
        }
    }
    if rows.is_empty() {
        return Err(FeatureError::EmptySplit);
    }

    let mut flat = Vec::with_capacity(rows.len() * voc.len());
    for row in &rows {
        flat.extend(row.iter().copied());
    }
    let x = Array2::from_shape_vec((rows.len(), voc.len()), flat).unwrap();
    info!(
        "assembled {} documents with {} features from {}",
        x.nrows(),
        x.ncols(),
        root.display()
    );
    Ok((x, Array1::from(labels)))
}

/// Writes a split as gzip-compressed dense text.
///
/// One row per example: the features in scientific notation, the label as
/// the final column.
///
/// # Errors
/// Fails when `y` does not hold one label per row of `x`, or on IO errors.
pub fn save_split(path: &Path, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(FeatureError::ShapeMismatch {
            what: "labels",
            got: y.len(),
            expected: x.nrows(),
        });
    }
    let mut out = GzEncoder::new(BufWriter::new(File::create(path)?), Compression::default());
    for (row, &label) in x.outer_iter().zip(y.iter()) {
        for v in row.iter() {
            write!(out, "{v:.18e} ")?;
        }
        writeln!(out, "{label:.18e}")?;
    }
    out.finish()?;
    Ok(())
}

/// Loads a split written by [`save_split`].
pub fn load_split(path: &Path) -> Result<(Array2<f64>, Array1<f64>)> {
    read_rows(BufReader::new(GzDecoder::new(File::open(path)?)))
}

fn read_rows<R: BufRead>(reader: R) -> Result<(Array2<f64>, Array1<f64>)> {
    let mut flat: Vec<f64> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();
    let mut width: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut values: Vec<f64> = Vec::new();
        for token in line.split_whitespace() {
            let v = token.parse().map_err(|_| FeatureError::MalformedSplit {
                line: i + 1,
                reason: "not a number",
            })?;
            values.push(v);
        }
        let label = match values.pop() {
            Some(v) if !values.is_empty() => v,
            _ => {
                return Err(FeatureError::MalformedSplit {
                    line: i + 1,
                    reason: "expected features and a label",
                })
            }
        };
        match width {
            None => width = Some(values.len()),
            Some(w) if w != values.len() => {
                return Err(FeatureError::MalformedSplit {
                    line: i + 1,
                    reason: "ragged row",
                })
            }
            Some(_) => {}
        }
        flat.extend(values);
        labels.push(label);
    }

    let cols = width.ok_or(FeatureError::EmptySplit)?;
    let x = Array2::from_shape_vec((labels.len(), cols), flat).unwrap();
    Ok((x, Array1::from(labels)))
}
