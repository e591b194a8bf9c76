//! Extractor dispatch - one variant per extraction strategy

use crate::{delimited, pdf, spreadsheet};
use std::fmt;
use std::sync::Arc;
use taxzen_domain::{
    classify, ExtractionError, ExtractionPayload, ExtractionResult, ExtractionStrategy, OcrEngine,
    UploadedFile,
};
use tracing::{debug, warn};

/// The extractor selected for a file
///
/// Blocking: spreadsheet parsing and OCR may take a while, so async callers
/// run [`Extractor::extract`] on the blocking pool.
#[derive(Clone)]
pub enum Extractor {
    /// Text layer of a PDF
    Pdf,
    /// Recognition through the injected engine
    OcrImage(Arc<dyn OcrEngine>),
    /// Delimited text with a header row
    Csv,
    /// First sheet of a workbook
    Spreadsheet,
    /// Lossy UTF-8 decoding
    RawText,
}

impl Extractor {
    /// Build the extractor for a strategy
    pub fn for_strategy(strategy: ExtractionStrategy, ocr: &Arc<dyn OcrEngine>) -> Self {
        match strategy {
            ExtractionStrategy::Pdf => Extractor::Pdf,
            ExtractionStrategy::OcrImage => Extractor::OcrImage(Arc::clone(ocr)),
            ExtractionStrategy::Csv => Extractor::Csv,
            ExtractionStrategy::Spreadsheet => Extractor::Spreadsheet,
            ExtractionStrategy::RawText => Extractor::RawText,
        }
    }

    /// The strategy this extractor implements
    pub fn strategy(&self) -> ExtractionStrategy {
        match self {
            Extractor::Pdf => ExtractionStrategy::Pdf,
            Extractor::OcrImage(_) => ExtractionStrategy::OcrImage,
            Extractor::Csv => ExtractionStrategy::Csv,
            Extractor::Spreadsheet => ExtractionStrategy::Spreadsheet,
            Extractor::RawText => ExtractionStrategy::RawText,
        }
    }

    /// Extract the content of one document
    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractionPayload, ExtractionError> {
        match self {
            Extractor::Pdf => pdf::extract_text(bytes).map(ExtractionPayload::Text),
            Extractor::OcrImage(engine) => engine.recognize(bytes).map(ExtractionPayload::Text),
            Extractor::Csv => delimited::parse_rows(bytes).map(ExtractionPayload::Tabular),
            Extractor::Spreadsheet => {
                spreadsheet::first_sheet_rows(bytes).map(ExtractionPayload::Tabular)
            }
            Extractor::RawText => Ok(ExtractionPayload::Text(
                String::from_utf8_lossy(bytes).into_owned(),
            )),
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::OcrImage(engine) => write!(f, "OcrImage({})", engine.name()),
            other => f.write_str(other.strategy().as_str()),
        }
    }
}

/// Classify and extract one file, recording a failure as an error entry
pub fn extract_file(file: &UploadedFile, ocr: &Arc<dyn OcrEngine>) -> ExtractionResult {
    let strategy = classify(&file.declared_mime_type);
    let extractor = Extractor::for_strategy(strategy, ocr);

    match extractor.extract(&file.bytes) {
        Ok(payload) => {
            debug!(
                file = %file.name,
                strategy = %strategy,
                kind = payload.kind().as_str(),
                "Extracted file"
            );
            ExtractionResult {
                source_name: file.name.clone(),
                strategy,
                payload,
            }
        }
        Err(e) => {
            warn!(file = %file.name, strategy = %strategy, error = %e, "Extraction failed");
            ExtractionResult::error(file.name.clone(), strategy, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::pdf_with_text;
    use crate::ocr::DisabledOcr;
    use taxzen_domain::{ExtractionKind, TabularRow};

    struct FixedOcr(&'static str);

    impl OcrEngine for FixedOcr {
        fn recognize(&self, _image: &[u8]) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    fn disabled() -> Arc<dyn OcrEngine> {
        Arc::new(DisabledOcr)
    }

    #[test]
    fn test_strategy_roundtrip() {
        let ocr = disabled();
        for strategy in [
            ExtractionStrategy::Pdf,
            ExtractionStrategy::OcrImage,
            ExtractionStrategy::Csv,
            ExtractionStrategy::Spreadsheet,
            ExtractionStrategy::RawText,
        ] {
            assert_eq!(Extractor::for_strategy(strategy, &ocr).strategy(), strategy);
        }
    }

    #[test]
    fn test_raw_text_never_fails() {
        let payload = Extractor::RawText.extract(b"W-2 \xff wages").unwrap();
        assert_eq!(payload, ExtractionPayload::Text("W-2 \u{FFFD} wages".to_string()));
    }

    #[test]
    fn test_ocr_uses_injected_engine() {
        let ocr: Arc<dyn OcrEngine> = Arc::new(FixedOcr("Form 1099-INT"));
        let extractor = Extractor::for_strategy(ExtractionStrategy::OcrImage, &ocr);
        assert_eq!(
            extractor.extract(b"png").unwrap(),
            ExtractionPayload::Text("Form 1099-INT".to_string())
        );
    }

    #[test]
    fn test_extract_file_pdf() {
        let file = UploadedFile::new("w2.pdf", "application/pdf", pdf_with_text("Income: 50000"));
        let result = extract_file(&file, &disabled());
        assert_eq!(result.source_name, "w2.pdf");
        assert_eq!(result.strategy, ExtractionStrategy::Pdf);
        match result.payload {
            ExtractionPayload::Text(text) => assert!(text.contains("50000")),
            other => panic!("Expected text payload, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_file_csv() {
        let file = UploadedFile::new("income.csv", "text/csv", b"a,b\n1,2\n".to_vec());
        let result = extract_file(&file, &disabled());
        assert_eq!(
            result.payload,
            ExtractionPayload::Tabular(vec![TabularRow::from(vec![("a", "1"), ("b", "2")])])
        );
    }

    #[test]
    fn test_extract_file_failure_becomes_error_entry() {
        let file = UploadedFile::new("scan.png", "image/png", b"not an image".to_vec());
        let result = extract_file(&file, &disabled());
        assert_eq!(result.kind(), ExtractionKind::Error);
        assert_eq!(result.strategy, ExtractionStrategy::OcrImage);
        assert_eq!(
            result.payload,
            ExtractionPayload::Error(ExtractionError::RecognitionFailure(
                "OCR is disabled".to_string()
            ))
        );
    }

    #[test]
    fn test_debug_names_engine() {
        let ocr: Arc<dyn OcrEngine> = Arc::new(DisabledOcr);
        assert_eq!(format!("{:?}", Extractor::OcrImage(ocr)), "OcrImage(disabled)");
        assert_eq!(format!("{:?}", Extractor::Csv), "csv");
    }
}
