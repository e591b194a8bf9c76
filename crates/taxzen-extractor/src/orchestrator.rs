//! Extraction Orchestrator - fans files out to extractors and reassembles the batch

use crate::extractor::extract_file;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use taxzen_domain::{
    classify, ExtractionBatch, ExtractionError, ExtractionResult, ExtractionStrategy, OcrEngine,
    UploadedFile,
};
use tokio::task::{self, JoinError};
use tracing::{info, warn};

/// Default number of extractions allowed to run at once
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Runs every file of a request through its extractor
///
/// Extractions run on the blocking pool, at most `max_concurrent` at a time.
/// The batch always has one entry per input file, in input order.
#[derive(Clone)]
pub struct ExtractionOrchestrator {
    ocr: Arc<dyn OcrEngine>,
    max_concurrent: usize,
}

impl ExtractionOrchestrator {
    /// Create an orchestrator using the given OCR engine for images
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self {
            ocr,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set the extraction concurrency limit (minimum 1)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Get the extraction concurrency limit
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Extract every file, preserving input order
    ///
    /// Never fails: a file that cannot be extracted, or whose extraction task
    /// dies, becomes an error entry at its index.
    pub async fn run(&self, files: Vec<UploadedFile>) -> ExtractionBatch {
        let file_count = files.len();

        let results: Vec<ExtractionResult> = stream::iter(files)
            .map(|file| {
                let ocr = Arc::clone(&self.ocr);
                async move {
                    let name = file.name.clone();
                    let strategy = classify(&file.declared_mime_type);
                    match task::spawn_blocking(move || extract_file(&file, &ocr)).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(file = %name, strategy = %strategy, error = %e, "Extraction task failed");
                            ExtractionResult::error(name, strategy, lost_task_error(strategy, &e))
                        }
                    }
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let batch = ExtractionBatch::new(results);
        info!(
            files = file_count,
            errors = batch.error_count(),
            "Extraction batch complete"
        );
        batch
    }
}

fn lost_task_error(strategy: ExtractionStrategy, e: &JoinError) -> ExtractionError {
    let reason = if e.is_panic() {
        "extractor crashed"
    } else {
        "extraction was cancelled"
    };
    match strategy {
        ExtractionStrategy::OcrImage => ExtractionError::RecognitionFailure(reason.to_string()),
        _ => ExtractionError::MalformedDocument(reason.to_string()),
    }
}
