use ndarray::ArrayView1;

use crate::check::{check_shapes, ArgShape, ArgSpec};
use crate::error::Result;

/// Fraction of positions where predicted and expected labels agree.
///
/// # Errors
/// Fails when the vectors disagree in length.
pub fn accuracy(predicted: ArrayView1<'_, i32>, expected: ArrayView1<'_, i32>) -> Result<f64> {
    check_shapes(
        &[ArgSpec::Array(&['m']), ArgSpec::Array(&['m'])],
        &[ArgShape::vector(&predicted), ArgShape::vector(&expected)],
    )?;
    let hits = predicted
        .iter()
        .zip(expected.iter())
        .filter(|(p, e)| p == e)
        .count();
    Ok(hits as f64 / predicted.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn counts_agreements() {
        let predicted = arr1(&[1, 0, 1, 1]);
        let expected = arr1(&[1, 1, 1, 0]);
        assert_eq!(accuracy(predicted.view(), expected.view()).unwrap(), 0.5);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let predicted = arr1(&[1, 0]);
        let expected = arr1(&[1]);
        assert!(accuracy(predicted.view(), expected.view()).is_err());
    }
}
