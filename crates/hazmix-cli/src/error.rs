//! Error types for the CLI application.

use hazmix_engine::{AnalysisError, ErrorResponse};
use hazmix_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis failed
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// Reference store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CliError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Analysis(e) => e.code(),
            CliError::Store(_) => "STORE_UNAVAILABLE",
            CliError::InvalidInput(_) | CliError::Serialization(_) => "INVALID_INPUT",
            CliError::NotFound(_) => "NOT_FOUND",
            CliError::Config(_) | CliError::Toml(_) => "CONFIG_ERROR",
            CliError::Io(_) => "IO_ERROR",
        }
    }

    /// Serializable form for JSON output
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            CliError::Analysis(e) => ErrorResponse::from(e),
            other => ErrorResponse {
                code: other.code().to_string(),
                message: other.to_string(),
                chemical_ids: None,
            },
        }
    }
}
