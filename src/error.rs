//! Error types for the dysbiosis-index library.

use std::fmt;
use thiserror::Error;

/// Which membership group an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Increased,
    Decreased,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Increased => write!(f, "increased"),
            Group::Decreased => write!(f, "decreased"),
        }
    }
}

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum DysbiosisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is not present")]
    MissingKey(String),

    #[error("None of the {0} items were found")]
    EmptyGroup(Group),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Duplicate sample ID '{0}'")]
    DuplicateSample(String),

    #[error("Duplicate observation ID '{0}'")]
    DuplicateObservation(String),

    #[error("Invalid abundance value {value} at row {row}, column {col}")]
    InvalidAbundance { value: f64, row: usize, col: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, DysbiosisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DysbiosisError::MissingKey("taxonomy".to_string());
        assert_eq!(err.to_string(), "taxonomy is not present");

        let err = DysbiosisError::EmptyGroup(Group::Increased);
        assert_eq!(err.to_string(), "None of the increased items were found");

        let err = DysbiosisError::EmptyGroup(Group::Decreased);
        assert_eq!(err.to_string(), "None of the decreased items were found");
    }
}
