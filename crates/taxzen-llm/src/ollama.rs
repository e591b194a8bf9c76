//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API, for running a model
//! locally instead of sending tax documents to a hosted service.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use taxzen_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3");
//! ```

use crate::http::{status_error, transport_error};
use crate::retry::with_retry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taxzen_domain::{CompletionProvider, ExternalServiceError};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the timeout for a single call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay before the first retry
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    async fn generate_once(
        &self,
        url: &str,
        request: &OllamaGenerateRequest<'_>,
    ) -> Result<String, ExternalServiceError> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ExternalServiceError::Unavailable(format!(
                "Model not available: {}",
                self.model
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json::<OllamaGenerateResponse>()
            .await
            .map(|r| r.response)
            .map_err(|e| {
                ExternalServiceError::MalformedResponse(format!("Failed to parse response: {}", e))
            })
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ExternalServiceError> {
        let url = format!("{}/api/generate", self.endpoint.trim_end_matches('/'));
        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!(provider = "ollama", model = %self.model, "Sending generate request");

        with_retry("ollama", self.max_retries, self.retry_backoff, || {
            self.generate_once(&url, &request)
        })
        .await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OllamaProvider {
        OllamaProvider::new(server.uri(), "llama3").with_retry_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama2");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama2");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "mistral");
    }

    #[test]
    fn test_ollama_provider_with_max_retries() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama2").with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[tokio::test]
    async fn test_ollama_generate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({"model": "llama3", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3",
                "response": "{}",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(provider(&server).complete("prompt").await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_ollama_missing_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        match provider(&server).complete("prompt").await {
            Err(ExternalServiceError::Unavailable(msg)) => assert!(msg.contains("llama3")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ollama_server_error_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let result = provider(&server).with_max_retries(2).complete("prompt").await;
        assert!(matches!(result, Err(ExternalServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Use invalid endpoint to trigger error
        let provider = OllamaProvider::new("http://127.0.0.1:9", "llama2").with_max_retries(1);

        let result = provider.complete("test").await;
        assert!(matches!(result, Err(ExternalServiceError::Unavailable(_))));
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama2");
        if let Ok(response) = provider.complete("Say 'hello' and nothing else").await {
            assert!(!response.is_empty());
        }
    }
}
