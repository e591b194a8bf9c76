//! Error taxonomy shared across the pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to extract content from a single file
///
/// Local to one file: the orchestrator turns it into an error entry of the
/// batch and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document structure could not be read
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The OCR engine failed or found no usable text
    #[error("Recognition failure: {0}")]
    RecognitionFailure(String),
}

/// Discriminant of [`ExtractionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionErrorKind {
    /// See [`ExtractionError::MalformedDocument`]
    MalformedDocument,
    /// See [`ExtractionError::RecognitionFailure`]
    RecognitionFailure,
}

impl ExtractionError {
    /// Get the error kind
    pub fn kind(&self) -> ExtractionErrorKind {
        match self {
            ExtractionError::MalformedDocument(_) => ExtractionErrorKind::MalformedDocument,
            ExtractionError::RecognitionFailure(_) => ExtractionErrorKind::RecognitionFailure,
        }
    }
}

/// Failure of the completion service
///
/// Fatal to the request. No fallback value is ever substituted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalServiceError {
    /// Service unreachable, overloaded, or returned a server error
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// The call (or the whole request) exceeded its time budget
    #[error("Completion service timed out")]
    Timeout,

    /// Credential missing or rejected
    #[error("Completion service rejected credentials: {0}")]
    AuthFailure(String),

    /// Response body could not be understood
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Discriminant of [`ExternalServiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalServiceErrorKind {
    /// See [`ExternalServiceError::Unavailable`]
    Unavailable,
    /// See [`ExternalServiceError::Timeout`]
    Timeout,
    /// See [`ExternalServiceError::AuthFailure`]
    AuthFailure,
    /// See [`ExternalServiceError::MalformedResponse`]
    MalformedResponse,
}

impl ExternalServiceError {
    /// Get the error kind
    pub fn kind(&self) -> ExternalServiceErrorKind {
        match self {
            ExternalServiceError::Unavailable(_) => ExternalServiceErrorKind::Unavailable,
            ExternalServiceError::Timeout => ExternalServiceErrorKind::Timeout,
            ExternalServiceError::AuthFailure(_) => ExternalServiceErrorKind::AuthFailure,
            ExternalServiceError::MalformedResponse(_) => ExternalServiceErrorKind::MalformedResponse,
        }
    }

    /// Whether retrying the same call could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExternalServiceError::Unavailable(_) | ExternalServiceError::Timeout
        )
    }
}
