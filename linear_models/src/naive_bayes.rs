//! Multinomial Naive Bayes for binary bag-of-words classification.
//!
//! Training is closed form: per-class feature counts with add-one
//! smoothing become log-probability ratios, so the fitted model is the
//! same `(w, b)` pair the iterative trainers produce and shares their
//! inference primitive.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::check::{check_labels, check_shapes, ArgShape, ArgSpec};
use crate::error::Result;
use crate::model::LinearModel;

/// Fits the closed-form estimator to features and binary labels.
///
/// Per class, the feature columns are summed over the class's rows, one is
/// added to every column, and the result is normalized to a distribution.
/// Then `w = ln p_pos - ln p_neg` and `b = ln prior_pos - ln prior_neg`
/// with the empirical class frequencies as priors. The priors are not
/// smoothed: a class with no training rows yields an infinite bias.
///
/// # Errors
/// Fails when the shapes disagree or the labels are not binary.
pub fn fit(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<LinearModel> {
    check_shapes(
        &[ArgSpec::Array(&['m', 'n']), ArgSpec::Array(&['m'])],
        &[ArgShape::matrix(&x), ArgShape::vector(&y)],
    )?;
    let y = check_labels(y, Some(2))?;

    let n = x.ncols();
    // Column sums per class, starting from one for the add-one smoothing.
    let mut pos = Array1::<f64>::ones(n);
    let mut neg = Array1::<f64>::ones(n);
    for (row, &label) in x.outer_iter().zip(y.iter()) {
        if label == 1 {
            pos += &row;
        } else {
            neg += &row;
        }
    }
    let pos = &pos / pos.sum();
    let neg = &neg / neg.sum();
    let w = pos.mapv(f64::ln) - neg.mapv(f64::ln);

    let pos_prior = y.mapv(f64::from).mean().unwrap_or(0.0);
    let neg_prior = 1.0 - pos_prior;
    let b = pos_prior.ln() - neg_prior.ln();

    Ok(LinearModel::new(w, b))
}

/// Predicted labels, 1 exactly when the score is positive.
///
/// # Errors
/// Fails when the shapes disagree.
pub fn predict(model: &LinearModel, x: ArrayView2<'_, f64>) -> Result<Array1<i32>> {
    Ok(model.scores(x)?.mapv(|v| i32::from(v > 0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use ndarray::{arr1, arr2};

    #[test]
    fn exclusive_features_get_opposite_weights() {
        // Feature 0 appears only in the positive class, feature 1 only in
        // the negative one. Smoothed distributions are [2/3, 1/3] and
        // [1/3, 2/3], so w = [ln 2, -ln 2]; balanced classes give b = 0.
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0]);
        let model = fit(x.view(), y.view()).unwrap();
        let ln2 = 2.0f64.ln();
        assert!((model.w[0] - ln2).abs() < 1e-12);
        assert!((model.w[1] + ln2).abs() < 1e-12);
        assert!(model.b.abs() < 1e-12);
    }

    #[test]
    fn unbalanced_classes_shift_the_bias() {
        let x = arr2(&[[1.0], [1.0], [1.0], [1.0]]);
        let y = arr1(&[1.0, 1.0, 1.0, 0.0]);
        let model = fit(x.view(), y.view()).unwrap();
        // priors 3/4 and 1/4: b = ln 3
        assert!((model.b - 3.0f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn predict_recovers_the_training_labels_on_separated_counts() {
        let x = arr2(&[[3.0, 0.0], [2.0, 1.0], [0.0, 4.0], [1.0, 2.0]]);
        let y = arr1(&[1.0, 1.0, 0.0, 0.0]);
        let model = fit(x.view(), y.view()).unwrap();
        let labels = predict(&model, x.view()).unwrap();
        assert_eq!(labels.mapv(f64::from), y);
    }

    #[test]
    fn label_vector_length_must_match_rows() {
        let x = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let y = arr1(&[1.0, 0.0, 1.0]);
        let err = fit(x.view(), y.view()).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch { label: 'm', first: 2, second: 3 }
        );
    }
}
