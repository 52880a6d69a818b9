use std::fmt;
use std::io;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors produced while preparing corpus data.
#[derive(Debug)]
pub enum FeatureError {
    /// An underlying file could not be read or written.
    Io(io::Error),

    /// A split file row could not be parsed.
    MalformedSplit {
        /// 1-based row of the offending line.
        line: usize,
        reason: &'static str,
    },

    /// A split file contained no rows at all.
    EmptySplit,

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        /// Human-readable context for the mismatch.
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// A vocabulary listing contained no words.
    EmptyVocabulary,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::Io(e) => write!(f, "io error: {e}"),
            FeatureError::MalformedSplit { line, reason } => {
                write!(f, "malformed split data at line {line}: {reason}")
            }
            FeatureError::EmptySplit => write!(f, "split data contains no rows"),
            FeatureError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            FeatureError::EmptyVocabulary => write!(f, "vocabulary contains no words"),
        }
    }
}

impl std::error::Error for FeatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FeatureError {
    fn from(e: io::Error) -> Self {
        FeatureError::Io(e)
    }
}
