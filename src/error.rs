use std::num::ParseFloatError;
use thiserror::Error;

/// Errors produced while loading vocabularies or scoring vectors.
#[derive(Debug, Error)]
pub enum SimplifyError {
    /// Two vectors of different lengths were compared.
    #[error("vectors have different lengths: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// A vector with no components was compared or loaded.
    #[error("vector has no components")]
    EmptyVector,

    /// Cosine similarity against a vector with (near-)zero magnitude.
    #[error("cosine similarity is undefined for a zero-magnitude vector")]
    ZeroMagnitude,

    /// A vocabulary that must have entries has none.
    #[error("vocabulary contains no entries")]
    EmptyVocabulary,

    /// A vector component could not be parsed as a number.
    #[error("line {line}: bad vector component: {source}")]
    ParseFloat {
        line: usize,
        source: ParseFloatError,
    },

    /// A vector's component count differs from the rest of the file.
    #[error("line {line}: vector for '{word}' has {found} components, expected {expected}")]
    DimensionMismatch {
        line: usize,
        word: String,
        found: usize,
        expected: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimplifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SimplifyError::LengthMismatch(3, 4);
        assert_eq!(err.to_string(), "vectors have different lengths: 3 vs 4");

        let err = SimplifyError::DimensionMismatch {
            line: 7,
            word: "cat".into(),
            found: 2,
            expected: 3,
        };
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("'cat'"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimplifyError>();
    }
}
