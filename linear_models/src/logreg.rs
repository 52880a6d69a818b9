//! Binary logistic regression trained by fixed-step gradient descent.

use log::debug;
use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::activation::sigmoid;
use crate::check::{check_labels, check_shapes, ArgShape, ArgSpec};
use crate::error::Result;
use crate::model::LinearModel;

/// Regularization penalty applied to the weight gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Penalty {
    /// Ridge term `2λw`.
    #[default]
    L2,
    /// Lasso term `λ·sign(w)`.
    L1,
}

/// Estimator minimizing regularized cross entropy.
///
/// Training runs exactly `steps` gradient-descent iterations; there is no
/// convergence detection and no early stopping. Each step computes the
/// predicted probabilities, the gradient of the regularized loss, and moves
/// `(w, b)` against it by the learning rate.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    lambda: f64,
    learning_rate: f64,
    steps: usize,
    penalty: Penalty,
    init: Option<LinearModel>,
}

impl LogisticRegression {
    /// A new estimator with the given regularization coefficient,
    /// learning rate `1e-3`, `1000` steps and the L2 penalty.
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            learning_rate: 1e-3,
            steps: 1000,
            penalty: Penalty::L2,
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

    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
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
        let yf = y.mapv(f64::from);
        let mut model = match &self.init {
            Some(init) => init.clone(),
            None => LinearModel::zeros(cols),
        };

        for step in 0..self.steps {
            let p = sigmoid(model.scores(x)?.view());
            let residual = &p - &yf;

            let grad_w = residual.dot(&x) / m + self.penalty_term(&model.w);
            let grad_b = residual.mean().unwrap_or(0.0);

            model.w.scaled_add(-self.learning_rate, &grad_w);
            model.b -= self.learning_rate * grad_b;

            if (step + 1) % 100 == 0 {
                debug!("logreg step {}/{}", step + 1, self.steps);
            }
        }
        Ok(model)
    }

    fn penalty_term(&self, w: &Array1<f64>) -> Array1<f64> {
        match self.penalty {
            Penalty::L2 => w * (2.0 * self.lambda),
            // sign(0) must stay 0 so untouched weights draw no penalty.
            Penalty::L1 => w.mapv(|v| if v == 0.0 { 0.0 } else { v.signum() * self.lambda }),
        }
    }
}

/// Probability estimates for the positive class, one per row of `x`.
///
/// # Errors
/// Fails when the shapes disagree.
pub fn predict_proba(model: &LinearModel, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    Ok(sigmoid(model.scores(x)?.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::loss::binary_cross_entropy;
    use ndarray::{arr1, arr2};

    #[test]
    fn zero_steps_returns_the_initial_model_unchanged() {
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0]);
        let init = LinearModel::new(arr1(&[0.25, -0.75]), 0.5);
        let model = LogisticRegression::new(0.1)
            .with_steps(0)
            .with_init(init.clone())
            .fit(x.view(), y.view())
            .unwrap();
        assert_eq!(model, init);
    }

    #[test]
    fn one_step_from_zero_moves_against_the_gradient() {
        // With zero weights every probability is 0.5, so the residual is
        // [-0.5, 0.5, -0.5] and:
        //   grad_w = residual @ X / 3 = [-1/3, 0]
        //   grad_b = mean(residual)   = -1/6
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let before = predict_proba(&LinearModel::zeros(2), x.view()).unwrap();
        assert!(before.iter().all(|&p| p == 0.5));

        let model = LogisticRegression::new(0.0)
            .with_learning_rate(0.1)
            .with_steps(1)
            .fit(x.view(), y.view())
            .unwrap();

        assert!((model.w[0] - 0.1 / 3.0).abs() < 1e-12);
        assert!(model.w[1].abs() < 1e-12);
        assert!((model.b - 0.1 / 6.0).abs() < 1e-12);

        // The step must reduce the cross entropy on this batch.
        let after = predict_proba(&model, x.view()).unwrap();
        let e0 = binary_cross_entropy(y.view(), before.view()).unwrap();
        let e1 = binary_cross_entropy(y.view(), after.view()).unwrap();
        assert!(e1 < e0);
    }

    #[test]
    fn probabilities_stay_in_the_open_unit_interval() {
        let x = arr2(&[[5.0, 0.0], [0.0, 5.0], [-5.0, -5.0]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let model = LogisticRegression::new(0.01)
            .with_steps(50)
            .fit(x.view(), y.view())
            .unwrap();
        let p = predict_proba(&model, x.view()).unwrap();
        assert!(p.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn l1_penalty_leaves_zero_weights_untouched() {
        // sign(0) is 0, so one step from zero init must match the
        // unregularized step no matter how large lambda is.
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let plain = LogisticRegression::new(0.0)
            .with_learning_rate(0.1)
            .with_steps(1)
            .fit(x.view(), y.view())
            .unwrap();
        let l1 = LogisticRegression::new(100.0)
            .with_penalty(Penalty::L1)
            .with_learning_rate(0.1)
            .with_steps(1)
            .fit(x.view(), y.view())
            .unwrap();
        assert_eq!(plain, l1);
    }

    #[test]
    fn row_count_mismatch_fails_before_training() {
        let x = arr2(&[[0.0; 3]; 5]);
        let y = arr1(&[0.0; 4]);
        let err = LogisticRegression::new(0.0).fit(x.view(), y.view()).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch { label: 'm', first: 5, second: 4 }
        );
    }

    #[test]
    fn init_weight_length_must_match_feature_count() {
        let x = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let y = arr1(&[0.0, 1.0]);
        let err = LogisticRegression::new(0.0)
            .with_init(LinearModel::zeros(3))
            .fit(x.view(), y.view())
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch { label: 'n', first: 2, second: 3 }
        );
    }

    #[test]
    fn out_of_range_label_is_rejected() {
        let x = arr2(&[[1.0], [2.0]]);
        let y = arr1(&[0.0, 2.0]);
        let err = LogisticRegression::new(0.0).fit(x.view(), y.view()).unwrap_err();
        assert_eq!(err, ModelError::LabelRange { max: 1, got: 2 });
    }
}
