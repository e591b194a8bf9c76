//! Integration tests for taxzen-llm
//!
//! Providers are built from TOML configuration and exercised against a
//! local mock server.

use serde_json::json;
use taxzen_domain::{CompletionProvider, ExternalServiceError};
use taxzen_llm::{ProviderConfig, ProviderKind};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(toml_str: &str) -> ProviderConfig {
    toml::from_str(toml_str).unwrap()
}

#[tokio::test]
async fn test_openai_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-config"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "max_tokens": 256})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"top_recommendations\": []}"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = config(&format!(
        r#"
        provider = "openai"
        endpoint = "{}"
        api_key = "sk-config"
        model = "gpt-4o-mini"
        max_tokens = 256
        "#,
        server.uri()
    ))
    .build()
    .unwrap();

    assert_eq!(provider.name(), "openai");
    assert_eq!(
        provider.complete("analyze").await.unwrap(),
        "{\"top_recommendations\": []}"
    );
}

#[tokio::test]
async fn test_ollama_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"model": "llama3", "stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3",
            "response": "{}",
            "done": true
        })))
        .mount(&server)
        .await;

    let cfg = config(&format!(
        r#"
        provider = "ollama"
        endpoint = "{}"
        model = "llama3"
        "#,
        server.uri()
    ));
    assert_eq!(cfg.provider, ProviderKind::Ollama);

    let provider = cfg.build().unwrap();
    assert_eq!(provider.complete("analyze").await.unwrap(), "{}");
}

#[tokio::test]
async fn test_rejected_key_surfaces_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = config(&format!(
        r#"
        endpoint = "{}"
        api_key = "sk-wrong"
        "#,
        server.uri()
    ))
    .build()
    .unwrap();

    match provider.complete("analyze").await {
        Err(ExternalServiceError::AuthFailure(msg)) => {
            assert!(msg.contains("Incorrect API key"))
        }
        other => panic!("Expected AuthFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_attempt_config_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let provider = config(&format!(
        r#"
        endpoint = "{}"
        api_key = "sk-test"
        max_retries = 1
        "#,
        server.uri()
    ))
    .build()
    .unwrap();

    assert!(matches!(
        provider.complete("analyze").await,
        Err(ExternalServiceError::Unavailable(_))
    ));
}

#[test]
fn test_missing_key_fails_before_any_request() {
    let err = match config("provider = \"openai\"").build() {
        Err(e) => e,
        Ok(_) => panic!("Expected a configuration error"),
    };
    assert!(err.contains("API key"));
}
