//! Response normalization entry point

use crate::schema::{to_insight, Mismatch};
use crate::{NormalizationError, NormalizationMode};
use serde_json::Value;
use taxzen_domain::TaxInsight;

/// Turns raw completion text into a [`TaxInsight`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseNormalizer {
    mode: NormalizationMode,
}

impl ResponseNormalizer {
    /// Create a normalizer for the given mode
    pub fn new(mode: NormalizationMode) -> Self {
        Self { mode }
    }

    /// The configured mode
    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    /// Parse, validate, and coerce one model response
    ///
    /// # Errors
    ///
    /// - `EmptyResponse` for empty or whitespace-only text
    /// - `InvalidJson` if the text (minus one markdown code fence) is not JSON
    /// - `SchemaMismatch` if the JSON does not fit the insight schema
    pub fn normalize(&self, raw: &str) -> Result<TaxInsight, NormalizationError> {
        if raw.trim().is_empty() {
            return Err(NormalizationError::EmptyResponse);
        }

        let body = strip_code_fence(raw);
        let value: Value = serde_json::from_str(body).map_err(|e| NormalizationError::InvalidJson {
            message: e.to_string(),
            raw: raw.to_string(),
        })?;

        let insight = to_insight(&value, self.mode).map_err(|Mismatch { path, message }| {
            NormalizationError::SchemaMismatch {
                path,
                message,
                raw: raw.to_string(),
            }
        })?;

        tracing::debug!(
            mode = %self.mode,
            recommendations = insight.top_recommendations.len(),
            categories = insight.detailed_breakdown.len(),
            "Normalized model response"
        );

        Ok(insight)
    }
}

/// Normalize with a one-off normalizer
pub fn normalize(raw: &str, mode: NormalizationMode) -> Result<TaxInsight, NormalizationError> {
    ResponseNormalizer::new(mode).normalize(raw)
}

/// Remove one surrounding markdown code fence, if present
///
/// The info string on the opening fence (`json`) is dropped with it.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return text;
    };

    match inner.find('\n') {
        Some(newline) => &inner[newline + 1..],
        None => text,
    }
}
