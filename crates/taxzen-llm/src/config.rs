//! Completion provider configuration
//!
//! Selects a provider and carries its connection settings. Built once at
//! startup into a shared `Arc<dyn CompletionProvider>`.

use crate::{ollama, openai, OllamaProvider, OpenAiProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use taxzen_domain::CompletionProvider;

/// Which completion service to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    #[default]
    OpenAi,
    /// Local Ollama server
    Ollama,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => f.write_str("openai"),
            ProviderKind::Ollama => f.write_str("ollama"),
        }
    }
}

/// Configuration for the completion provider (`[completion]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider to use
    pub provider: ProviderKind,

    /// API root; the provider's default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer credential (OpenAI only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Completion token limit
    pub max_tokens: u32,

    /// Timeout for a single call (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, counting the first
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            endpoint: None,
            api_key: None,
            model: openai::DEFAULT_MODEL.to_string(),
            max_tokens: openai::DEFAULT_MAX_TOKENS,
            timeout_secs: openai::DEFAULT_TIMEOUT_SECS,
            max_retries: openai::DEFAULT_MAX_RETRIES,
        }
    }
}

impl ProviderConfig {
    /// Endpoint to use, falling back to the provider's default
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderKind::OpenAi) => openai::DEFAULT_BASE_URL,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_ENDPOINT,
        }
    }

    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("completion.model must not be empty".to_string());
        }
        if self.endpoint().trim().is_empty() {
            return Err("completion.endpoint must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("completion.max_tokens must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("completion.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Construct the configured provider
    ///
    /// Fails before any request is made if the configuration is invalid or
    /// an OpenAI provider has no credential.
    pub fn build(&self) -> Result<Arc<dyn CompletionProvider>, String> {
        self.validate()?;

        match self.provider {
            ProviderKind::OpenAi => {
                let api_key = self
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| {
                        "OpenAI API key is not configured (set completion.api_key or OPENAI_API_KEY)"
                            .to_string()
                    })?;
                let provider = OpenAiProvider::new(self.endpoint(), api_key, &self.model)
                    .with_max_tokens(self.max_tokens)
                    .with_timeout(self.timeout())
                    .with_max_retries(self.max_retries);
                Ok(Arc::new(provider))
            }
            ProviderKind::Ollama => {
                let provider = OllamaProvider::new(self.endpoint(), &self.model)
                    .with_timeout(self.timeout())
                    .with_max_retries(self.max_retries);
                Ok(Arc::new(provider))
            }
        }
    }
}
