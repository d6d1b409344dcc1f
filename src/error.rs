//! Error types for the cadop registry pipeline.
//!
//! This module defines a hierarchy of error types following best practices:
//!
//! - [`ConvertError`] - CSV conversion errors
//! - [`StoreError`] - data file loading errors
//! - [`QueryError`] - filter/lookup errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Conversion Errors
// =============================================================================

/// Errors during CSV to JSON conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the source bytes.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Invalid CSV content.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors while loading the operator collection from disk.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing JSON file does not exist.
    #[error("Data file not found: {}", .0.display())]
    Missing(PathBuf),

    /// Failed to read the backing file.
    #[error("Failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds malformed JSON or an unexpected shape.
    #[error("Corrupt data file: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors from the query engine.
///
/// Both variants are ordinary outcomes, not transport failures: the boundary
/// layer decides which status code and message each one maps to.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The loaded collection contained no records at all.
    #[error("No records loaded from the data source")]
    EmptyCollection,

    /// The filter conjunction matched zero records.
    #[error("No records matched the supplied filters")]
    NoMatch,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_missing_names_path() {
        let err = StoreError::Missing(PathBuf::from("/data/Relatorio_cadop.json"));
        assert!(err.to_string().contains("Relatorio_cadop.json"));
    }

    #[test]
    fn test_store_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(err.to_string().contains("Corrupt data file"));
    }

    #[test]
    fn test_query_error_variants_distinct() {
        assert_ne!(QueryError::EmptyCollection, QueryError::NoMatch);
        assert!(QueryError::NoMatch.to_string().contains("filters"));
    }
}
