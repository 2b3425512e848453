//! Error types for SchemaForge
//!
//! This module provides unified error handling across the compiler: diagram
//! loading, schema validation, dependency ordering, configuration and output
//! writing.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for SchemaForge
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The diagram contains no element classified as a table
    #[error("No tables found in the diagram. Classify at least one class as 'Table'.")]
    NoTables,

    /// Foreign keys form a cycle, so no creation order exists
    #[error("Circular foreign-key dependency between tables: {}", tables.join(", "))]
    DependencyCycle { tables: Vec<String> },

    // ========================================================================
    // Diagram Errors
    // ========================================================================
    /// Diagram document could not be parsed
    #[error("Failed to parse diagram '{path}': {message}")]
    DiagramParse { path: PathBuf, message: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Check if this error is a validation error.
    ///
    /// Validation errors are reported to the user and abort compilation
    /// before any file is written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_)
                | EngineError::NoTables
                | EngineError::DependencyCycle { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::Io(_)
                | EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = EngineError::validation("Name is required");
        assert!(err.is_validation());
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_no_tables_is_validation() {
        let err = EngineError::NoTables;
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("No tables found"));
    }

    #[test]
    fn test_dependency_cycle_lists_tables() {
        let err = EngineError::DependencyCycle {
            tables: vec!["Order".to_string(), "Invoice".to_string()],
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Circular foreign-key dependency between tables: Order, Invoice"
        );
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EngineError = io_err.into();
        assert!(err.is_io());
        assert!(!err.is_validation());
    }
}
