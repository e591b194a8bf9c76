//! PDF text-layer extraction

use std::panic;
use taxzen_domain::ExtractionError;

/// Decode the embedded text of a PDF document
///
/// Documents without a text layer (scans) decode to empty text. A panic
/// inside the decoder is reported as a malformed document.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::MalformedDocument(format!(
            "Failed to read PDF: {}",
            e
        ))),
        Err(_) => {
            tracing::warn!("PDF decoder panicked");
            Err(ExtractionError::MalformedDocument(
                "PDF decoder failed on this document".to_string(),
            ))
        }
    }
}
