use ndarray::{Array1, ArrayView1};

/// Elementwise logistic sigmoid `1 / (1 + e^-z)`.
///
/// Defined for any real input; large magnitudes saturate towards 0 or 1
/// instead of overflowing.
pub fn sigmoid(z: ArrayView1<'_, f64>) -> Array1<f64> {
    z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}
