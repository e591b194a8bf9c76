//! TaxZen Extractor
//!
//! Turns uploaded tax documents into a normalized [`TaxInsight`].
//!
//! # Overview
//!
//! Each uploaded file is classified by its declared content type and handed
//! to the matching extractor (PDF text layer, OCR, CSV, spreadsheet, or raw
//! text). The ordered extraction batch is rendered into a single prompt, sent
//! once to the completion service, and the answer is normalized into the
//! fixed insight schema.
//!
//! # Architecture
//!
//! ```text
//! Files → Orchestrator → Extractors → Batch → Prompt → LLM → Normalizer → TaxInsight
//! ```
//!
//! A file that cannot be read never fails the request: it becomes an error
//! entry of the batch, and the model sees it. Completion and normalization
//! failures fail the whole request.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use taxzen_domain::UploadedFile;
//! use taxzen_extractor::{Analyzer, AnalyzerConfig};
//! use taxzen_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(MockProvider::new(r#"{"total_taxable_income": 50000}"#));
//! let analyzer = Analyzer::from_config(provider, &AnalyzerConfig::default())?;
//!
//! let files = vec![UploadedFile::new("w2.txt", "text/plain", b"Income: 50000".to_vec())];
//! let insight = analyzer.analyze(files).await?;
//!
//! println!("Taxable income: {}", insight.total_taxable_income);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
pub mod delimited;
mod error;
mod extractor;
mod manual;
pub mod ocr;
mod orchestrator;
pub mod pdf;
mod prompt;
pub mod spreadsheet;

#[cfg(test)]
mod fixtures;

pub use analyzer::{Analyzer, PreparedAnalysis};
pub use config::{AnalyzerConfig, OcrConfig, OcrEngineKind};
pub use error::AnalysisError;
pub use extractor::{extract_file, Extractor};
pub use manual::{ManualTaxData, MANUAL_SOURCE_NAME};
pub use ocr::{DisabledOcr, TesseractOcr};
pub use orchestrator::{ExtractionOrchestrator, DEFAULT_MAX_CONCURRENT};
pub use prompt::PromptBuilder;
