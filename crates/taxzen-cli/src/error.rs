//! Error types for the CLI application.

use std::path::PathBuf;
use taxzen_extractor::AnalysisError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An input file could not be read
    #[error("Cannot read {}: {source}", path.display())]
    ReadFile {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The analysis pipeline failed
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Raw model text behind a normalization failure, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            CliError::Analysis(e) => e.raw_response(),
            _ => None,
        }
    }
}
