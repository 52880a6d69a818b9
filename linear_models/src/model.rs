use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::check::{check_shapes, ArgShape, ArgSpec};
use crate::error::Result;

/// A trained binary linear classifier: weight vector plus scalar bias.
///
/// Trainers build one and return it by value; inference and the loss
/// helpers only ever read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// Per-feature weights, one entry per feature column.
    pub w: Array1<f64>,
    /// Scalar bias added to every score.
    pub b: f64,
}

impl LinearModel {
    pub fn new(w: Array1<f64>, b: f64) -> Self {
        Self { w, b }
    }

    /// A model of `n` zero weights and zero bias.
    pub fn zeros(n: usize) -> Self {
        Self::new(Array1::zeros(n), 0.0)
    }

    /// Number of features the model scores.
    pub fn num_features(&self) -> usize {
        self.w.len()
    }

    /// Raw decision scores `X·w + b`, one per row of `x`.
    ///
    /// This is the forward pass shared by every classifier in the crate;
    /// probability and hard-label transforms are layered on top of it.
    ///
    /// # Errors
    /// Fails when `x` is not `m × n` for the model's `n` weights.
    pub fn scores(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        check_shapes(
            &[
                ArgSpec::Array(&['m', 'n']),
                ArgSpec::Array(&['n']),
                ArgSpec::Scalar,
            ],
            &[
                ArgShape::matrix(&x),
                ArgShape::vector(&self.w.view()),
                ArgShape::Scalar,
            ],
        )?;
        Ok(x.dot(&self.w) + self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn scores_are_row_dot_products_plus_bias() {
        let model = LinearModel::new(arr1(&[1.0, -2.0]), 0.5);
        let x = arr2(&[[3.0, 1.0], [0.0, 0.0], [-1.0, 2.0]]);
        let s = model.scores(x.view()).unwrap();
        assert_eq!(s, arr1(&[1.5, 0.5, -4.5]));
    }

    #[test]
    fn column_count_must_match_weight_length() {
        let model = LinearModel::zeros(3);
        let x = arr2(&[[1.0, 2.0]]);
        assert!(model.scores(x.view()).is_err());
    }
}
