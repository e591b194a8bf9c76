//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the services
//! it calls. Infrastructure implementations live in other crates and are
//! injected at construction time.

use crate::error::{ExternalServiceError, ExtractionError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for LLM completion services
///
/// Implemented by the infrastructure layer (taxzen-llm)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, ExternalServiceError>;

    /// Short name for logs (e.g. "openai")
    fn name(&self) -> &str {
        "llm"
    }
}

#[async_trait]
impl<T: CompletionProvider + ?Sized> CompletionProvider for Arc<T> {
    async fn complete(&self, prompt: &str) -> Result<String, ExternalServiceError> {
        (**self).complete(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Trait for optical character recognition engines
///
/// Blocking; callers run it off the async executor.
/// Implemented by the extraction layer (taxzen-extractor)
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a raster image
    fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError>;

    /// Short name for logs (e.g. "tesseract")
    fn name(&self) -> &str {
        "ocr"
    }
}
