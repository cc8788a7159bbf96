//! Error types for mssql-classgen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for mssql-classgen operations
pub type Result<T> = std::result::Result<T, ClassgenError>;

/// Errors that can occur during class generation
#[derive(Error, Debug)]
pub enum ClassgenError {
    #[error("Failed to parse table metadata: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("The output directory '{}' was not found", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<sqlparser::parser::ParserError> for ClassgenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        ClassgenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for ClassgenError {
    fn from(err: config::ConfigError) -> Self {
        ClassgenError::ConfigError(err.to_string())
    }
}
