//! Normalizer error types

use thiserror::Error;

/// Errors that can occur while normalizing a model response
///
/// All variants except `EmptyResponse` keep the raw model text so the
/// failure can be diagnosed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// The model returned nothing but whitespace
    #[error("Empty response from model")]
    EmptyResponse,

    /// The text is not JSON
    #[error("Invalid JSON in model response: {message}")]
    InvalidJson {
        /// Parser message
        message: String,
        /// Text as received
        raw: String,
    },

    /// The JSON does not have the expected shape
    #[error("Response does not match expected schema at {path}: {message}")]
    SchemaMismatch {
        /// JSON path of the offending value (e.g. `$.top_recommendations[1]`)
        path: String,
        /// What was wrong
        message: String,
        /// Text as received
        raw: String,
    },
}

/// Discriminant of [`NormalizationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizationErrorKind {
    /// See [`NormalizationError::EmptyResponse`]
    EmptyResponse,
    /// See [`NormalizationError::InvalidJson`]
    InvalidJson,
    /// See [`NormalizationError::SchemaMismatch`]
    SchemaMismatch,
}

impl NormalizationError {
    /// Get the error kind
    pub fn kind(&self) -> NormalizationErrorKind {
        match self {
            NormalizationError::EmptyResponse => NormalizationErrorKind::EmptyResponse,
            NormalizationError::InvalidJson { .. } => NormalizationErrorKind::InvalidJson,
            NormalizationError::SchemaMismatch { .. } => NormalizationErrorKind::SchemaMismatch,
        }
    }

    /// The model text that caused the failure, if retained
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            NormalizationError::EmptyResponse => None,
            NormalizationError::InvalidJson { raw, .. } => Some(raw),
            NormalizationError::SchemaMismatch { raw, .. } => Some(raw),
        }
    }
}
