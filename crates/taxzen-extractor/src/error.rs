//! Error types for the Analyzer

use taxzen_domain::ExternalServiceError;
use taxzen_normalizer::NormalizationError;
use thiserror::Error;

/// Errors that fail a whole analysis request
///
/// Per-file extraction failures never appear here; they become error
/// entries of the batch.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The request itself is unusable (no files, missing manual fields)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion service failed or the request timed out
    #[error(transparent)]
    Service(#[from] ExternalServiceError),

    /// The model's answer could not be normalized
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// The extraction batch could not be rendered into the prompt
    #[error("Failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Raw model text behind a normalization failure, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::Normalization(e) => e.raw_response(),
            _ => None,
        }
    }
}
