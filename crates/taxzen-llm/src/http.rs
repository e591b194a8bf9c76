//! Mapping of HTTP outcomes onto `ExternalServiceError`

use reqwest::StatusCode;
use serde::Deserialize;
use taxzen_domain::ExternalServiceError;

/// Longest slice of an error body carried into a message
const MAX_BODY_CHARS: usize = 200;

/// `{"error": {"message": ...}}` as returned by OpenAI-compatible servers
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Classify a non-success response
pub(crate) fn status_error(status: StatusCode, body: &str) -> ExternalServiceError {
    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => truncate(body),
    };
    let message = format!("HTTP {}: {}", status.as_u16(), detail);

    match status.as_u16() {
        401 | 403 => ExternalServiceError::AuthFailure(message),
        408 | 504 => ExternalServiceError::Timeout,
        _ => ExternalServiceError::Unavailable(message),
    }
}

/// Classify a transport-level failure
pub(crate) fn transport_error(error: reqwest::Error) -> ExternalServiceError {
    if error.is_timeout() {
        ExternalServiceError::Timeout
    } else {
        ExternalServiceError::Unavailable(format!("Request failed: {}", error))
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_CHARS {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(MAX_BODY_CHARS).collect();
        format!("{}...", head)
    }
}
