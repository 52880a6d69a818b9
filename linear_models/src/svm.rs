//! Binary linear SVM trained by fixed-step subgradient descent.

use log::debug;
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::check::{check_labels, check_shapes, ArgShape, ArgSpec};
use crate::error::Result;
use crate::model::LinearModel;

/// Estimator minimizing L2-regularized hinge loss.
///
/// The `{0, 1}` labels are remapped to `{-1, +1}`; each of the fixed
/// `steps` iterations applies the hinge subgradient, which is nonzero
/// only on rows whose margin is violated.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    lambda: f64,
    learning_rate: f64,
    steps: usize,
    init: Option<LinearModel>,
}

impl LinearSvm {
    /// A new estimator with the given regularization coefficient,
    /// learning rate `1e-3` and `1000` steps.
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            learning_rate: 1e-3,
            steps: 1000,
            init: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Starts training from the given model instead of zeros.
    pub fn with_init(mut self, init: LinearModel) -> Self {
        self.init = Some(init);
        self
    }

    /// Fits `(w, b)` to the given features and binary labels.
    ///
    /// # Errors
    /// Fails before the first iteration when the shapes disagree or the
    /// labels are not binary.
    pub fn fit(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<LinearModel> {
        let init_w = self.init.as_ref().map(|m| m.w.view());
        check_shapes(
            &[
                ArgSpec::Array(&['m', 'n']),
                ArgSpec::Array(&['m']),
                ArgSpec::Maybe(&['n']),
                ArgSpec::Scalar,
            ],
            &[
                ArgShape::matrix(&x),
                ArgShape::vector(&y),
                ArgShape::maybe_vector(init_w.as_ref()),
                ArgShape::Scalar,
            ],
        )?;
        let y = check_labels(y, Some(2))?;

        let (rows, cols) = x.dim();
        let m = rows as f64;
        // Margin-side labels in {-1, +1}.
        let c = y.mapv(|v| f64::from(2 * v - 1));
        let mut model = match &self.init {
            Some(init) => init.clone(),
            None => LinearModel::zeros(cols),
        };

        for step in 0..self.steps {
            let logits = model.scores(x)?;
            // Subgradient of the hinge w.r.t. the logit: -c on violated
            // margins, zero elsewhere.
            let mask: Array1<f64> = c
                .iter()
                .zip(logits.iter())
                .map(|(&ci, &li)| if ci * li < 1.0 { -ci } else { 0.0 })
                .collect();

            let grad_w = mask.dot(&x) / m + &model.w * self.lambda;
            let grad_b = mask.mean().unwrap_or(0.0);

            model.w.scaled_add(-self.learning_rate, &grad_w);
            model.b -= self.learning_rate * grad_b;

            if (step + 1) % 100 == 0 {
                debug!("svm step {}/{}", step + 1, self.steps);
            }
        }
        Ok(model)
    }
}

/// Hard labels and raw scores for each row of `x`.
///
/// The label is 1 exactly when the score is positive; the scores are
/// returned alongside for margin inspection and loss evaluation.
///
/// # Errors
/// Fails when the shapes disagree.
pub fn predict(
    model: &LinearModel,
    x: ArrayView2<'_, f64>,
) -> Result<(Array1<i32>, Array1<f64>)> {
    let logits = model.scores(x)?;
    let labels = logits.mapv(|v| i32::from(v > 0.0));
    Ok((labels, logits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use ndarray::{arr1, arr2};

    #[test]
    fn zero_steps_returns_the_initial_model_unchanged() {
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0]);
        let init = LinearModel::new(arr1(&[1.5, -0.5]), -0.25);
        let model = LinearSvm::new(0.1)
            .with_steps(0)
            .with_init(init.clone())
            .fit(x.view(), y.view())
            .unwrap();
        assert_eq!(model, init);
    }

    #[test]
    fn one_step_from_zero_matches_the_subgradient() {
        // Zero scores violate both margins, so the mask is -C = [-1, 1]:
        //   grad_w = mask @ X / 2 = [-0.5, 0.5]
        //   grad_b = mean(mask)   = 0
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0]);
        let model = LinearSvm::new(0.0)
            .with_learning_rate(0.1)
            .with_steps(1)
            .fit(x.view(), y.view())
            .unwrap();
        assert!((model.w[0] - 0.05).abs() < 1e-12);
        assert!((model.w[1] + 0.05).abs() < 1e-12);
        assert_eq!(model.b, 0.0);
    }

    #[test]
    fn satisfied_margins_produce_no_update_without_regularization() {
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0]);
        let init = LinearModel::new(arr1(&[2.0, -2.0]), 0.0);
        let model = LinearSvm::new(0.0)
            .with_steps(10)
            .with_init(init.clone())
            .fit(x.view(), y.view())
            .unwrap();
        assert_eq!(model, init);
    }

    #[test]
    fn predict_returns_binary_labels_and_the_raw_scores() {
        let model = LinearModel::new(arr1(&[1.0, -1.0]), 0.0);
        let x = arr2(&[[2.0, 0.0], [0.0, 2.0], [1.0, 1.0]]);
        let (labels, logits) = predict(&model, x.view()).unwrap();
        assert_eq!(labels, arr1(&[1, 0, 0]));
        assert_eq!(logits, arr1(&[2.0, -2.0, 0.0]));
        assert!(labels.iter().all(|&l| l == 0 || l == 1));
    }

    #[test]
    fn training_separates_a_separable_batch() {
        let x = arr2(&[[1.0, 0.0], [2.0, 1.0], [0.0, 1.0], [1.0, 3.0]]);
        let y = arr1(&[1.0, 1.0, 0.0, 0.0]);
        let model = LinearSvm::new(0.0)
            .with_learning_rate(0.1)
            .with_steps(500)
            .fit(x.view(), y.view())
            .unwrap();
        let (labels, _) = predict(&model, x.view()).unwrap();
        assert_eq!(labels.mapv(f64::from), y);
    }

    #[test]
    fn row_count_mismatch_fails_before_training() {
        let x = arr2(&[[0.0; 3]; 5]);
        let y = arr1(&[0.0; 4]);
        let err = LinearSvm::new(0.0).fit(x.view(), y.view()).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch { label: 'm', first: 5, second: 4 }
        );
    }
}
