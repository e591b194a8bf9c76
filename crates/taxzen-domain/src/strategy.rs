//! Format classification - choosing an extractor from a declared content type

use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type for PDF documents
pub const MIME_PDF: &str = "application/pdf";

/// MIME type for comma-separated values
pub const MIME_CSV: &str = "text/csv";

/// Legacy Excel MIME type, handled as delimited text
pub const MIME_MS_EXCEL: &str = "application/vnd.ms-excel";

/// OOXML workbook MIME type
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Macro-enabled OOXML workbook MIME type
pub const MIME_XLSM: &str = "application/vnd.ms-excel.sheet.macroEnabled.12";

/// The extractor variant responsible for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Text layer of a PDF document
    Pdf,

    /// Optical character recognition over a raster image
    OcrImage,

    /// Delimited text with a header row
    Csv,

    /// First sheet of an OOXML workbook
    Spreadsheet,

    /// Bytes decoded as UTF-8 text
    RawText,
}

impl ExtractionStrategy {
    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::Pdf => "pdf",
            ExtractionStrategy::OcrImage => "ocr_image",
            ExtractionStrategy::Csv => "csv",
            ExtractionStrategy::Spreadsheet => "spreadsheet",
            ExtractionStrategy::RawText => "raw_text",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a declared content type to the strategy that extracts it
///
/// Parameters (`; charset=...`) and surrounding whitespace are ignored and
/// matching is ASCII case-insensitive. Total over all inputs: anything not
/// recognized is treated as raw text.
///
/// # Examples
///
/// ```
/// use taxzen_domain::{classify, ExtractionStrategy};
///
/// assert_eq!(classify("application/pdf"), ExtractionStrategy::Pdf);
/// assert_eq!(classify("image/png"), ExtractionStrategy::OcrImage);
/// assert_eq!(classify("text/csv; charset=utf-8"), ExtractionStrategy::Csv);
/// assert_eq!(classify("application/octet-stream"), ExtractionStrategy::RawText);
/// ```
pub fn classify(declared_mime_type: &str) -> ExtractionStrategy {
    let essence = declared_mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == MIME_PDF {
        ExtractionStrategy::Pdf
    } else if essence.starts_with("image/") {
        ExtractionStrategy::OcrImage
    } else if essence == MIME_CSV || essence == MIME_MS_EXCEL {
        ExtractionStrategy::Csv
    } else if essence == MIME_XLSX || essence.eq_ignore_ascii_case(MIME_XLSM) {
        ExtractionStrategy::Spreadsheet
    } else {
        ExtractionStrategy::RawText
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority_rules() {
        assert_eq!(classify("application/pdf"), ExtractionStrategy::Pdf);
        assert_eq!(classify("image/jpeg"), ExtractionStrategy::OcrImage);
        assert_eq!(classify("image/"), ExtractionStrategy::OcrImage);
        assert_eq!(classify("text/csv"), ExtractionStrategy::Csv);
        assert_eq!(classify("application/vnd.ms-excel"), ExtractionStrategy::Csv);
        assert_eq!(classify(MIME_XLSX), ExtractionStrategy::Spreadsheet);
        assert_eq!(classify(MIME_XLSM), ExtractionStrategy::Spreadsheet);
        assert_eq!(classify("text/plain"), ExtractionStrategy::RawText);
    }

    #[test]
    fn test_classify_ignores_case_and_parameters() {
        assert_eq!(classify("Application/PDF"), ExtractionStrategy::Pdf);
        assert_eq!(classify("  text/csv ; charset=utf-8"), ExtractionStrategy::Csv);
        assert_eq!(classify("IMAGE/PNG"), ExtractionStrategy::OcrImage);
    }

    #[test]
    fn test_classify_unknown_is_raw_text() {
        assert_eq!(classify(""), ExtractionStrategy::RawText);
        assert_eq!(classify("application/json"), ExtractionStrategy::RawText);
        assert_eq!(classify("pdf"), ExtractionStrategy::RawText);
        // prefix-only rule applies to images alone
        assert_eq!(classify("application/pdf-x"), ExtractionStrategy::RawText);
    }

    #[test]
    fn test_strategy_serializes_snake_case() {
        let json = serde_json::to_string(&ExtractionStrategy::OcrImage).unwrap();
        assert_eq!(json, "\"ocr_image\"");
        assert_eq!(ExtractionStrategy::RawText.to_string(), "raw_text");
    }
}
