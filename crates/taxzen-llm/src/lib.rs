//! TaxZen Completion Provider Layer
//!
//! Pluggable completion clients behind the `CompletionProvider` trait from
//! `taxzen-domain`.
//!
//! # Providers
//!
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `OllamaProvider`: Local Ollama API integration
//! - `MockProvider`: Deterministic mock for testing
//!
//! Every provider reports failures as `ExternalServiceError`; nothing here
//! substitutes a default answer for a failed call.
//!
//! # Examples
//!
//! ```
//! use taxzen_llm::MockProvider;
//! use taxzen_domain::CompletionProvider;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let provider = MockProvider::new("{\"total_taxable_income\": 1}");
//! let result = provider.complete("test prompt").await.unwrap();
//! assert_eq!(result, "{\"total_taxable_income\": 1}");
//! # });
//! ```

#![warn(missing_docs)]

pub mod config;
mod http;
pub mod ollama;
pub mod openai;
mod retry;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use taxzen_domain::{CompletionProvider, ExternalServiceError};

pub use config::{ProviderConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Clones share call count and recorded prompts.
///
/// # Examples
///
/// ```
/// use taxzen_llm::MockProvider;
/// use taxzen_domain::{CompletionProvider, ExternalServiceError};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.complete("prompt1").await.unwrap(), "response1");
///
/// let failing = MockProvider::default().with_failure(ExternalServiceError::Timeout);
/// assert!(failing.complete("anything").await.is_err());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failure: Option<ExternalServiceError>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failure: None,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), response.into());
    }

    /// Fail every call with the given error
    pub fn with_failure(mut self, error: ExternalServiceError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sleep before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// The most recent prompt received, if any
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.last_prompt).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ExternalServiceError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *lock(&self.last_prompt) = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let response = lock(&self.responses).get(prompt).cloned();
        Ok(response.unwrap_or_else(|| self.default_response.clone()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// A panic while holding the lock cannot leave the map half-written
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
