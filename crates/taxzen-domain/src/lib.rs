//! TaxZen Domain Layer
//!
//! This crate contains the data model shared by every other TaxZen crate.
//! It defines the fundamental concepts, the error taxonomy, and the trait
//! interfaces for the external services the pipeline depends upon.
//!
//! ## Key Concepts
//!
//! - **UploadedFile**: one document as received from the caller (name, declared type, bytes)
//! - **ExtractionStrategy**: which extractor handles a file, chosen by [`classify`]
//! - **ExtractionBatch**: ordered per-file extraction outcomes, one per input file
//! - **TaxInsight**: the normalized, display-ready answer from the model
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data and classification logic only
//! - Infrastructure implementations (LLM clients, OCR engines) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod extraction;
pub mod insight;
pub mod strategy;
pub mod traits;

// Re-exports for convenience
pub use document::{AnalysisId, UploadedFile};
pub use error::{
    ExternalServiceError, ExternalServiceErrorKind, ExtractionError, ExtractionErrorKind,
};
pub use extraction::{ExtractionBatch, ExtractionKind, ExtractionPayload, ExtractionResult, TabularRow};
pub use insight::{InsightValue, Recommendation, TaxInsight, NOT_AVAILABLE};
pub use strategy::{classify, ExtractionStrategy};
pub use traits::{CompletionProvider, OcrEngine};
