//! OCR engines for image uploads

use std::io::Write;
use std::process::Command;
use taxzen_domain::{ExtractionError, OcrEngine};

/// Runs the `tesseract` command on a temporary copy of the image
///
/// Equivalent to `tesseract <file> stdout -l <language>`.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    command: String,
    language: String,
}

impl TesseractOcr {
    /// Create an engine invoking `command` with the English model
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: "eng".to_string(),
        }
    }

    /// Set the recognition language (e.g. "eng", "eng+spa")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let mut file = tempfile::Builder::new()
            .prefix("taxzen-ocr-")
            .tempfile()
            .map_err(|e| {
                ExtractionError::RecognitionFailure(format!("Failed to create temp file: {}", e))
            })?;
        file.write_all(image)
            .and_then(|_| file.flush())
            .map_err(|e| {
                ExtractionError::RecognitionFailure(format!("Failed to write temp file: {}", e))
            })?;

        let output = Command::new(&self.command)
            .arg(file.path())
            .args(["stdout", "-l", self.language.as_str()])
            .output()
            .map_err(|e| {
                ExtractionError::RecognitionFailure(format!(
                    "Failed to launch {}: {}",
                    self.command, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::RecognitionFailure(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(ExtractionError::RecognitionFailure(
                "No text recognized in image".to_string(),
            ));
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Engine for deployments without OCR; always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOcr;

impl OcrEngine for DisabledOcr {
    fn recognize(&self, _image: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::RecognitionFailure("OCR is disabled".to_string()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
