//! Query error types
//!
//! Defines the error conditions of per-interaction queries. None of these are
//! fatal: callers reject the request and keep their previous output.

use thiserror::Error;

/// Errors that can occur during filter and lookup operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Requested column is not a plottable metric of this dataset
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// No resort carries the requested name
    #[error("Resort not found: {0}")]
    ResortNotFound(String),

    /// Input parameter out of its domain
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
