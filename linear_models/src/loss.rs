//! Loss functions for binary classifiers.

use ndarray::ArrayView1;

use crate::check::{check_labels, check_shapes, ArgShape, ArgSpec};
use crate::error::Result;

const PAIR: [ArgSpec; 2] = [ArgSpec::Array(&['m']), ArgSpec::Array(&['m'])];

/// Average cross entropy between binary labels and probability estimates.
///
/// Only the branch selected by each label contributes, so a zero
/// probability on the selected branch yields `-ln 0 = inf` rather than a
/// `0 · ln 0` NaN.
///
/// # Errors
/// Fails when the vectors disagree in length or `y` is not binary.
pub fn binary_cross_entropy(y: ArrayView1<'_, f64>, p: ArrayView1<'_, f64>) -> Result<f64> {
    check_shapes(&PAIR, &[ArgShape::vector(&y), ArgShape::vector(&p)])?;
    let y = check_labels(y, Some(2))?;

    let mut e = 0.0;
    for (&label, &prob) in y.iter().zip(p.iter()) {
        e -= if label == 1 { prob.ln() } else { (1.0 - prob).ln() };
    }
    Ok(e / y.len() as f64)
}

/// Average hinge loss between binary labels and raw scores.
///
/// Each example contributes `max(0, 1 - (2·label - 1)·logit)`: zero once
/// its margin is satisfied, growing linearly with the violation otherwise.
///
/// # Errors
/// Fails when the vectors disagree in length or `labels` is not binary.
pub fn hinge_loss(labels: ArrayView1<'_, f64>, logits: ArrayView1<'_, f64>) -> Result<f64> {
    check_shapes(&PAIR, &[ArgShape::vector(&labels), ArgShape::vector(&logits)])?;
    let labels = check_labels(labels, Some(2))?;

    let total: f64 = labels
        .iter()
        .zip(logits.iter())
        .map(|(&label, &logit)| (1.0 - f64::from(2 * label - 1) * logit).max(0.0))
        .sum();
    Ok(total / labels.len() as f64)
}
