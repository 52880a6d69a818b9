use std::fmt;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors produced by the validation gate that runs before any numeric work.
///
/// The variants fall into three groups: a malformed check specification
/// (always a caller bug), a violated shape contract, and label or categorical
/// values outside their domain.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A shape specification and the supplied argument list differ in length.
    ArgumentCount {
        /// Number of arguments the specification describes.
        expected: usize,
        /// Number of arguments actually supplied.
        got: usize,
    },

    /// An array has the wrong number of dimensions.
    Rank { expected: usize, got: usize },

    /// Two occurrences of the same dimension label bind to different sizes.
    DimensionMismatch {
        /// The label shared by the disagreeing arguments.
        label: char,
        /// Size bound on first occurrence.
        first: usize,
        /// Size observed afterwards.
        second: usize,
    },

    /// A scalar was required but an array was supplied.
    ScalarExpected,

    /// Values expected to be integers carry a fractional part.
    FractionalValues(&'static str),

    /// Values expected to be non-negative are negative.
    NegativeValues(&'static str),

    /// A label exceeds the permitted class range.
    LabelRange {
        /// Largest label the class count permits.
        max: i32,
        /// The violating label.
        got: i32,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ArgumentCount { expected, got } => {
                write!(f, "not enough arguments (expected {expected}, got {got})")
            }
            ModelError::Rank { expected, got } => {
                write!(
                    f,
                    "expected an array of {expected} dimensions ({got} dimensions found)"
                )
            }
            ModelError::DimensionMismatch { label, first, second } => {
                write!(
                    f,
                    "dimensions do not agree for '{label}' (got {first} and {second})"
                )
            }
            ModelError::ScalarExpected => write!(f, "scalar value expected"),
            ModelError::FractionalValues(what) => write!(f, "{what} must be integers"),
            ModelError::NegativeValues(what) => write!(f, "{what} cannot be negative"),
            ModelError::LabelRange { max, got } => {
                write!(f, "invalid labels (maximum is {max}, got {got})")
            }
        }
    }
}

impl std::error::Error for ModelError {}
