//! OpenAI Provider Implementation
//!
//! Sends the prompt as a single user message to an OpenAI-compatible
//! `chat/completions` endpoint and returns the first choice's content.
//!
//! # Features
//!
//! - Bearer-token authentication
//! - Configurable base URL, model, and token limit
//! - Retry logic with exponential backoff for transient failures
//! - Per-call timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use taxzen_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("https://api.openai.com/v1", "sk-...", "gpt-4")
//!     .with_max_tokens(1024);
//! ```

use crate::http::{status_error, transport_error};
use crate::retry::with_retry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taxzen_domain::{CompletionProvider, ExternalServiceError};

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default completion token limit
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default timeout for a single call (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API root, e.g. "https://api.openai.com/v1"
    /// - `api_key`: bearer credential
    /// - `model`: model name, e.g. "gpt-4"
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(1),
        }
    }

    /// Set the completion token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the timeout for a single call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Model this provider asks for
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_once(&self, url: &str, request: &ChatRequest<'_>) -> Result<String, ExternalServiceError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body = response.text().await.map_err(transport_error)?;
        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ExternalServiceError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ExternalServiceError::MalformedResponse(
                    "Response contained no message content".to_string(),
                )
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ExternalServiceError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            provider = "openai",
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending chat completion request"
        );

        with_retry("openai", self.max_retries, self.retry_backoff, || {
            self.send_once(&url, &request)
        })
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(server.uri(), "sk-test", "gpt-4")
            .with_retry_backoff(Duration::from_millis(1))
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_openai_provider_creation() {
        let provider = OpenAiProvider::new(DEFAULT_BASE_URL, "sk-x", DEFAULT_MODEL);
        assert_eq!(provider.model(), "gpt-4");
        assert_eq!(provider.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.name(), "openai");
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{\"a\": 1}")))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server).complete("hello").await;
        assert_eq!(result.unwrap(), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_failure_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server).complete("hello").await;
        match result {
            Err(ExternalServiceError::AuthFailure(msg)) => {
                assert!(msg.contains("Incorrect API key"));
            }
            other => panic!("Expected AuthFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_retried_then_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(3)
            .mount(&server)
            .await;

        let result = provider(&server).with_max_retries(3).complete("hello").await;
        assert!(matches!(result, Err(ExternalServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_server_error_recovers_on_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .mount(&server)
            .await;

        let result = provider(&server).complete("hello").await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_gateway_timeout_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(504))
            .mount(&server)
            .await;

        let result = provider(&server).with_max_retries(1).complete("hello").await;
        assert_eq!(result.unwrap_err(), ExternalServiceError::Timeout);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let result = provider(&server)
            .with_timeout(Duration::from_millis(50))
            .with_max_retries(1)
            .complete("hello")
            .await;
        assert_eq!(result.unwrap_err(), ExternalServiceError::Timeout);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server).complete("hello").await;
        assert!(matches!(result, Err(ExternalServiceError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = provider(&server).complete("hello").await;
        assert!(matches!(result, Err(ExternalServiceError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        // Nothing listens on port 9 (discard) in test environments
        let provider = OpenAiProvider::new("http://127.0.0.1:9", "sk-test", "gpt-4")
            .with_max_retries(1);

        let result = provider.complete("hello").await;
        assert!(matches!(result, Err(ExternalServiceError::Unavailable(_))));
    }
}
