//! Configuration for the Analyzer

use crate::ocr::{DisabledOcr, TesseractOcr};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use taxzen_domain::OcrEngine;
use taxzen_normalizer::NormalizationMode;

/// Which OCR engine handles image uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// The `tesseract` command-line tool
    #[default]
    Tesseract,
    /// No OCR; every image becomes an error entry
    Disabled,
}

/// OCR settings (`[analysis.ocr]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine to use
    pub engine: OcrEngineKind,

    /// Executable name or path
    pub command: String,

    /// Recognition language model
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::Tesseract,
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

impl OcrConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.engine == OcrEngineKind::Tesseract {
            if self.command.trim().is_empty() {
                return Err("analysis.ocr.command must not be empty".to_string());
            }
            if self.language.trim().is_empty() {
                return Err("analysis.ocr.language must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Construct the configured engine
    pub fn build(&self) -> Arc<dyn OcrEngine> {
        match self.engine {
            OcrEngineKind::Tesseract => Arc::new(
                TesseractOcr::new(&self.command).with_language(&self.language),
            ),
            OcrEngineKind::Disabled => Arc::new(DisabledOcr),
        }
    }
}

/// Configuration for the Analyzer (`[analysis]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Extractions allowed to run at once
    pub max_concurrent_extractions: usize,

    /// Budget for a whole request, extraction through normalization (seconds)
    pub request_timeout_secs: u64,

    /// How numeric leaves of the answer are rendered
    pub normalization_mode: NormalizationMode,

    /// OCR settings
    pub ocr: OcrConfig,
}

impl AnalyzerConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_extractions == 0 {
            return Err("analysis.max_concurrent_extractions must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("analysis.request_timeout_secs must be greater than 0".to_string());
        }
        self.ocr.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_extractions: 4,
            request_timeout_secs: 180,
            normalization_mode: NormalizationMode::Currency,
            ocr: OcrConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(180));
        assert_eq!(config.normalization_mode, NormalizationMode::Currency);
    }

    #[test]
    fn test_invalid_concurrency() {
        let mut config = AnalyzerConfig::default();
        config.max_concurrent_extractions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = AnalyzerConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ocr_settings_only_checked_for_tesseract() {
        let mut config = AnalyzerConfig::default();
        config.ocr.language = String::new();
        assert!(config.validate().is_err());

        config.ocr.engine = OcrEngineKind::Disabled;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AnalyzerConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = AnalyzerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml(
            r#"
            normalization_mode = "numeric"

            [ocr]
            engine = "disabled"
            "#,
        )
        .unwrap();
        assert_eq!(config.normalization_mode, NormalizationMode::Numeric);
        assert_eq!(config.ocr.engine, OcrEngineKind::Disabled);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.max_concurrent_extractions, 4);
    }

    #[test]
    fn test_build_engines() {
        assert_eq!(OcrConfig::default().build().name(), "tesseract");
        let disabled = OcrConfig {
            engine: OcrEngineKind::Disabled,
            ..Default::default()
        };
        assert_eq!(disabled.build().name(), "disabled");
    }
}
