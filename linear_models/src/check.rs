//! Precondition checks shared by every estimator in the crate.
//!
//! Shape contracts are written as data rather than parsed from a string:
//! each argument is described by an [`ArgSpec`] whose dimension labels tie
//! sizes together across arguments. [`check_shapes`] runs the whole contract
//! before any numeric routine touches the data.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{ModelError, Result};

/// Label naming one symbolic dimension (e.g. `'m'` rows, `'n'` columns).
pub type Dim = char;

/// Constraint on a single argument of a shape contract.
#[derive(Debug, Clone, Copy)]
pub enum ArgSpec {
    /// The argument must be a plain scalar.
    Scalar,
    /// The argument must be an array with exactly one size per label.
    /// Arguments sharing a label must agree on the bound size.
    Array(&'static [Dim]),
    /// Like [`ArgSpec::Array`], but the argument may be absent, in which
    /// case its checks are skipped entirely.
    Maybe(&'static [Dim]),
}

/// Observed shape of an argument, as supplied by the caller.
#[derive(Debug, Clone)]
pub enum ArgShape {
    /// A plain scalar value.
    Scalar,
    /// An array with the given concrete sizes, one per dimension.
    Shape(Vec<usize>),
    /// No argument was supplied.
    Absent,
}

impl ArgShape {
    /// Shape of a two-dimensional array.
    pub fn matrix<A>(x: &ArrayView2<'_, A>) -> Self {
        ArgShape::Shape(vec![x.nrows(), x.ncols()])
    }

    /// Shape of a one-dimensional array.
    pub fn vector<A>(x: &ArrayView1<'_, A>) -> Self {
        ArgShape::Shape(vec![x.len()])
    }

    /// Shape of an optional one-dimensional array.
    pub fn maybe_vector<A>(x: Option<&ArrayView1<'_, A>>) -> Self {
        match x {
            Some(v) => Self::vector(v),
            None => ArgShape::Absent,
        }
    }
}

/// Verifies a full shape contract.
///
/// Fails with [`ModelError::ArgumentCount`] when `specs` and `args` differ
/// in length, [`ModelError::Rank`] or [`ModelError::ScalarExpected`] when an
/// argument has the wrong dimensionality, and
/// [`ModelError::DimensionMismatch`] when two arguments disagree on the size
/// bound to a shared label. No side effects on success.
pub fn check_shapes(specs: &[ArgSpec], args: &[ArgShape]) -> Result<()> {
    if specs.len() != args.len() {
        return Err(ModelError::ArgumentCount {
            expected: specs.len(),
            got: args.len(),
        });
    }

    // Contracts bind at most a handful of labels.
    let mut bound: Vec<(Dim, usize)> = Vec::new();

    for (spec, arg) in specs.iter().zip(args) {
        let (labels, sizes) = match (spec, arg) {
            (ArgSpec::Maybe(_), ArgShape::Absent) => continue,
            (ArgSpec::Scalar, ArgShape::Scalar) => continue,
            (ArgSpec::Scalar, _) => return Err(ModelError::ScalarExpected),
            (ArgSpec::Array(labels) | ArgSpec::Maybe(labels), ArgShape::Shape(sizes)) => {
                (labels, sizes)
            }
            // A scalar or missing value has rank zero as far as the
            // contract is concerned.
            (ArgSpec::Array(labels) | ArgSpec::Maybe(labels), _) => {
                return Err(ModelError::Rank {
                    expected: labels.len(),
                    got: 0,
                })
            }
        };

        if labels.len() != sizes.len() {
            return Err(ModelError::Rank {
                expected: labels.len(),
                got: sizes.len(),
            });
        }

        for (&label, &size) in labels.iter().zip(sizes) {
            match bound.iter().find(|(l, _)| *l == label) {
                Some(&(_, first)) if first != size => {
                    return Err(ModelError::DimensionMismatch {
                        label,
                        first,
                        second: size,
                    })
                }
                Some(_) => {}
                None => bound.push((label, size)),
            }
        }
    }

    Ok(())
}

/// Validates class labels and converts them to integers.
///
/// Non-integer values are accepted only when their fractional part is zero.
/// Negative labels are rejected, as is any label `>= nclasses` when a class
/// count is given. The input is never mutated.
pub fn check_labels(y: ArrayView1<'_, f64>, nclasses: Option<usize>) -> Result<Array1<i32>> {
    if y.iter().any(|v| v.fract() != 0.0) {
        return Err(ModelError::FractionalValues("labels"));
    }
    let labels = y.mapv(|v| v as i32);
    if labels.iter().any(|&v| v < 0) {
        return Err(ModelError::NegativeValues("labels"));
    }
    if let Some(nclasses) = nclasses {
        let max = labels.iter().copied().max().unwrap_or(0);
        if max >= nclasses as i32 {
            return Err(ModelError::LabelRange {
                max: nclasses as i32 - 1,
                got: max,
            });
        }
    }
    Ok(labels)
}

/// Validates a categorical feature matrix and converts it to integers.
///
/// Same integer and non-negativity contract as [`check_labels`], applied to
/// every entry of `x`.
pub fn check_categorical(x: ArrayView2<'_, f64>) -> Result<Array2<i32>> {
    if x.iter().any(|v| v.fract() != 0.0) {
        return Err(ModelError::FractionalValues("categorical data"));
    }
    let data = x.mapv(|v| v as i32);
    if data.iter().any(|&v| v < 0) {
        return Err(ModelError::NegativeValues("categorical data"));
    }
    Ok(data)
}
