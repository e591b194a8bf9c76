//! The Analyzer - one request from uploaded files to a normalized insight

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::manual::ManualTaxData;
use crate::orchestrator::ExtractionOrchestrator;
use crate::prompt::PromptBuilder;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use taxzen_domain::{
    AnalysisId, CompletionProvider, ExternalServiceError, ExtractionBatch, OcrEngine, TaxInsight,
    UploadedFile,
};
use taxzen_normalizer::{NormalizationMode, ResponseNormalizer};
use tokio::time::timeout;
use tracing::{debug, info, info_span, warn, Instrument};

/// Extraction results and the prompt they produce, without calling the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedAnalysis {
    /// Per-file extraction outcomes, in input order
    pub batch: ExtractionBatch,

    /// The prompt that would be sent to the completion service
    pub prompt: String,
}

/// Runs the pipeline: extract, build prompt, complete, normalize
///
/// Collaborators are injected once and shared; the Analyzer holds no state
/// across requests. An Analyzer built with [`Analyzer::for_extraction`] has
/// no completion provider and only serves `extract` and `prepare`.
pub struct Analyzer {
    provider: Option<Arc<dyn CompletionProvider>>,
    orchestrator: ExtractionOrchestrator,
    normalizer: ResponseNormalizer,
    request_timeout: Duration,
}

impl Analyzer {
    /// Create an Analyzer from its collaborators
    ///
    /// The configuration is taken as is; use [`Analyzer::from_config`] to
    /// validate it first.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        ocr: Arc<dyn OcrEngine>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self::with_provider(Some(provider), ocr, config)
    }

    /// Create an Analyzer that extracts and prepares prompts but never
    /// calls a completion service
    pub fn extraction_only(ocr: Arc<dyn OcrEngine>, config: &AnalyzerConfig) -> Self {
        Self::with_provider(None, ocr, config)
    }

    fn with_provider(
        provider: Option<Arc<dyn CompletionProvider>>,
        ocr: Arc<dyn OcrEngine>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self {
            provider,
            orchestrator: ExtractionOrchestrator::new(ocr)
                .with_max_concurrent(config.max_concurrent_extractions),
            normalizer: ResponseNormalizer::new(config.normalization_mode),
            request_timeout: config.request_timeout(),
        }
    }

    /// Validate the configuration and build the configured OCR engine
    pub fn from_config(
        provider: Arc<dyn CompletionProvider>,
        config: &AnalyzerConfig,
    ) -> Result<Self, AnalysisError> {
        config.validate().map_err(AnalysisError::Config)?;
        Ok(Self::new(provider, config.ocr.build(), config))
    }

    /// Validate the configuration and build an extraction-only Analyzer
    pub fn for_extraction(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate().map_err(AnalysisError::Config)?;
        Ok(Self::extraction_only(config.ocr.build(), config))
    }

    /// Whether `analyze` can reach a completion service
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Budget for a whole request
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// How numeric leaves of the answer are rendered
    pub fn normalization_mode(&self) -> NormalizationMode {
        self.normalizer.mode()
    }

    /// Analyze uploaded documents
    ///
    /// Unreadable files do not fail the request; they reach the model as
    /// error entries. Completion and normalization failures do.
    pub async fn analyze(&self, files: Vec<UploadedFile>) -> Result<TaxInsight, AnalysisError> {
        ensure_files(&files)?;
        self.provider()?;
        let id = AnalysisId::new();

        self.within_timeout(async move {
            info!(files = files.len(), "Starting analysis");
            let batch = self.orchestrator.run(files).await;
            self.complete_and_normalize(&batch).await
        })
        .instrument(info_span!("analysis", id = %id))
        .await
    }

    /// Extract documents without calling the model
    pub async fn extract(&self, files: Vec<UploadedFile>) -> Result<ExtractionBatch, AnalysisError> {
        ensure_files(&files)?;
        let id = AnalysisId::new();

        self.within_timeout(async move { Ok(self.orchestrator.run(files).await) })
            .instrument(info_span!("extraction", id = %id))
            .await
    }

    /// Extract documents and build the prompt, without calling the model
    pub async fn prepare(&self, files: Vec<UploadedFile>) -> Result<PreparedAnalysis, AnalysisError> {
        ensure_files(&files)?;
        let id = AnalysisId::new();

        self.within_timeout(async move {
            let batch = self.orchestrator.run(files).await;
            let prompt = PromptBuilder::new(&batch).build()?;
            Ok(PreparedAnalysis { batch, prompt })
        })
        .instrument(info_span!("preparation", id = %id))
        .await
    }

    /// Analyze a batch assembled elsewhere
    pub async fn analyze_batch(&self, batch: &ExtractionBatch) -> Result<TaxInsight, AnalysisError> {
        if batch.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "No extraction results to analyze".to_string(),
            ));
        }
        self.provider()?;
        let id = AnalysisId::new();

        self.within_timeout(self.complete_and_normalize(batch))
            .instrument(info_span!("analysis", id = %id))
            .await
    }

    /// Analyze manually entered figures
    pub async fn analyze_manual(&self, data: ManualTaxData) -> Result<TaxInsight, AnalysisError> {
        let batch = data.into_batch()?;
        self.analyze_batch(&batch).await
    }

    async fn complete_and_normalize(&self, batch: &ExtractionBatch) -> Result<TaxInsight, AnalysisError> {
        let provider = self.provider()?;
        let prompt = PromptBuilder::new(batch).build()?;

        debug!(provider = provider.name(), "Requesting completion");
        let raw = provider.complete(&prompt).await?;
        debug!(chars = raw.len(), "Completion received");

        let insight = self.normalizer.normalize(&raw).map_err(|e| {
            warn!(error = %e, "Model response could not be normalized");
            e
        })?;

        info!(
            recommendations = insight.top_recommendations.len(),
            mode = %self.normalizer.mode(),
            "Analysis complete"
        );
        Ok(insight)
    }

    fn provider(&self) -> Result<&Arc<dyn CompletionProvider>, AnalysisError> {
        self.provider.as_ref().ok_or_else(|| {
            AnalysisError::Config("No completion provider configured".to_string())
        })
    }

    async fn within_timeout<T>(
        &self,
        work: impl Future<Output = Result<T, AnalysisError>>,
    ) -> Result<T, AnalysisError> {
        match timeout(self.request_timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Request timed out"
                );
                Err(ExternalServiceError::Timeout.into())
            }
        }
    }
}

fn ensure_files(files: &[UploadedFile]) -> Result<(), AnalysisError> {
    if files.is_empty() {
        return Err(AnalysisError::InvalidInput("No files provided".to_string()));
    }
    Ok(())
}
