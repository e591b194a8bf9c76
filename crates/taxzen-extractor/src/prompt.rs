//! LLM prompt engineering for tax analysis

use taxzen_domain::ExtractionBatch;
use tracing::debug;

/// Builds the analysis prompt for an extraction batch
///
/// Deterministic: the same batch always yields the same prompt, byte for
/// byte. Error entries are embedded like any other entry so the model knows
/// which documents could not be read.
pub struct PromptBuilder<'a> {
    batch: &'a ExtractionBatch,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(batch: &'a ExtractionBatch) -> Self {
        Self { batch }
    }

    /// Build the complete analysis prompt
    ///
    /// Fails only if the batch cannot be rendered as JSON.
    pub fn build(&self) -> Result<String, serde_json::Error> {
        let mut prompt = String::new();

        // 1. Task and target shape
        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(TARGET_SHAPE);
        prompt.push_str("\n\n");

        // 2. The documents
        prompt.push_str(&format!(
            "Extracted documents ({} file{}):\n",
            self.batch.len(),
            if self.batch.len() == 1 { "" } else { "s" }
        ));
        prompt.push_str("---\n");
        prompt.push_str(&serde_json::to_string_pretty(self.batch)?);
        prompt.push_str("\n---\n\n");

        // 3. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        debug!(files = self.batch.len(), chars = prompt.len(), "Built analysis prompt");
        Ok(prompt)
    }
}

const ANALYSIS_INSTRUCTIONS: &str = r#"You are a tax analysis assistant. Analyze the tax documents below and estimate the taxpayer's total taxable income and tax owed, then recommend the strategies with the largest tax savings.

Rules:
- Each document is given as an object with "source" (file name), "format", "kind" and "content"
- "content" is plain text, an array of rows keyed by column name, or, when "kind" is "error", the reason the document could not be read
- Do not invent figures for documents that could not be read; mention them in a recommendation if they matter
- Use plain numbers for amounts (no currency symbols or thousands separators)
- Use "N/A" for any amount that cannot be determined from the documents
- List the most valuable recommendations first"#;

const TARGET_SHAPE: &str = r#"Respond with a JSON object of exactly this shape:
{
  "total_taxable_income": <number-or-"N/A">,
  "estimated_tax_owed": <number-or-"N/A">,
  "top_recommendations": [ {"strategy": <string>, "impact": <number-or-string>}, ... ],
  "detailed_breakdown": {
    "income_sources": { <string>: <number-or-"N/A">, ... },
    "deductions": { <string>: <number-or-"N/A">, ... },
    "credits": { <string>: <number-or-"N/A">, ... }
  }
}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Return ONLY the JSON object, with no markdown code blocks and no explanations.";
