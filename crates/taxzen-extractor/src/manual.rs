//! Manually entered tax figures

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use taxzen_domain::{ExtractionBatch, ExtractionResult, ExtractionStrategy};

/// Source name of the synthetic extraction built from manual figures
pub const MANUAL_SOURCE_NAME: &str = "manual-entry";

/// Figures typed in by the user instead of uploaded documents
///
/// Values are free text ("85,000", "$12k") and are passed to the model as
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualTaxData {
    /// Total income
    pub income: String,

    /// Total deductions
    pub deductions: String,

    /// Proceeds or gains from stock sales
    pub stock_sales: String,
}

impl ManualTaxData {
    /// Create manual data from the three figures
    pub fn new(
        income: impl Into<String>,
        deductions: impl Into<String>,
        stock_sales: impl Into<String>,
    ) -> Self {
        Self {
            income: income.into(),
            deductions: deductions.into(),
            stock_sales: stock_sales.into(),
        }
    }

    /// Check that every figure is present
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fields = [&self.income, &self.deductions, &self.stock_sales];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AnalysisError::InvalidInput(
                "Missing required tax data.".to_string(),
            ));
        }
        Ok(())
    }

    /// The figures as a single text extraction
    pub fn to_extraction(&self) -> ExtractionResult {
        ExtractionResult::text(
            MANUAL_SOURCE_NAME,
            ExtractionStrategy::RawText,
            format!(
                "Income: {}\nDeductions: {}\nStock Sales: {}",
                self.income.trim(),
                self.deductions.trim(),
                self.stock_sales.trim()
            ),
        )
    }

    /// Validate and wrap the figures in a one-entry batch
    pub fn into_batch(self) -> Result<ExtractionBatch, AnalysisError> {
        self.validate()?;
        Ok(ExtractionBatch::new(vec![self.to_extraction()]))
    }
}
