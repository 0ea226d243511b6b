//! Dataset error types
//!
//! Every error here is fatal: a dataset that fails to load aborts startup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and preprocessing the dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Source file could not be opened or read
    #[error("Failed to read dataset {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header lacks one or more required columns
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Numeric cell could not be parsed
    #[error("Line {line}: invalid number in column '{column}': {value:?}")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    /// Flag cell is neither "Yes" nor "No"
    #[error("Line {line}: invalid flag in column '{column}': {value:?}")]
    InvalidFlag {
        line: u64,
        column: String,
        value: String,
    },

    /// Cell bytes are not valid in the configured encoding
    #[error("Line {line}: invalid UTF-8 in column '{column}'")]
    InvalidEncoding { line: u64, column: String },

    /// Required cell is empty
    #[error("Line {line}: missing value in column '{column}'")]
    MissingValue { line: u64, column: String },

    /// Resort names must be unique
    #[error("Line {line}: duplicate resort '{name}' (first seen on line {first_line})")]
    DuplicateResort {
        name: String,
        line: u64,
        first_line: u64,
    },

    /// Source contained a header but no rows
    #[error("Dataset contains no resorts")]
    Empty,
}

/// Result type alias for dataset operations
pub type DataLoadResult<T> = Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataLoadError::MissingColumns(vec!["Price".to_string(), "Country".to_string()]);
        assert_eq!(err.to_string(), "Missing required columns: Price, Country");

        let err = DataLoadError::DuplicateResort {
            name: "Hemsedal".to_string(),
            line: 9,
            first_line: 2,
        };
        assert_eq!(
            err.to_string(),
            "Line 9: duplicate resort 'Hemsedal' (first seen on line 2)"
        );
    }
}
