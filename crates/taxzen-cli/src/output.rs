//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
    Table,
};
use taxzen_domain::{ExtractionBatch, ExtractionPayload, ExtractionStrategy, TaxInsight};
use taxzen_extractor::PreparedAnalysis;

/// Longest text excerpt shown in the batch table.
const EXCERPT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis result.
    pub fn format_insight(&self, insight: &TaxInsight) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(insight)?),
            OutputFormat::Table => Ok(self.format_insight_table(insight)),
        }
    }

    fn format_insight_table(&self, insight: &TaxInsight) -> String {
        let mut sections = Vec::new();

        let mut summary = Builder::default();
        summary.push_record(["Total taxable income".to_string(), insight.total_taxable_income.to_string()]);
        summary.push_record(["Estimated tax owed".to_string(), insight.estimated_tax_owed.to_string()]);
        let mut summary = summary.build();
        summary.with(Style::rounded());
        sections.push(summary.to_string());

        if insight.top_recommendations.is_empty() {
            sections.push(self.colorize("No recommendations.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Strategy", "Impact"]);
            for (i, rec) in insight.top_recommendations.iter().enumerate() {
                builder.push_record([(i + 1).to_string(), rec.strategy.clone(), rec.impact.to_string()]);
            }
            sections.push(self.colorize("Top recommendations", "cyan"));
            sections.push(styled(builder.build()));
        }

        let items: usize = insight.detailed_breakdown.values().map(|fields| fields.len()).sum();
        if items > 0 {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Item", "Amount"]);
            for (category, fields) in &insight.detailed_breakdown {
                for (item, value) in fields {
                    builder.push_record([category.clone(), item.clone(), value.to_string()]);
                }
            }
            sections.push(self.colorize("Detailed breakdown", "cyan"));
            sections.push(styled(builder.build()));
        }

        sections.join("\n")
    }

    /// Format extraction results.
    pub fn format_batch(&self, batch: &ExtractionBatch) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(batch)?),
            OutputFormat::Table => Ok(self.format_batch_table(batch)),
        }
    }

    fn format_batch_table(&self, batch: &ExtractionBatch) -> String {
        if batch.is_empty() {
            return self.colorize("No documents.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Source", "Format", "Kind", "Content"]);
        for (i, result) in batch.iter().enumerate() {
            let content = match &result.payload {
                ExtractionPayload::Text(text) => excerpt(text),
                ExtractionPayload::Tabular(rows) => format!("{} row(s)", rows.len()),
                ExtractionPayload::Error(e) => self.colorize(&e.to_string(), "red"),
            };
            builder.push_record([
                (i + 1).to_string(),
                result.source_name.clone(),
                result.strategy.to_string(),
                result.kind().as_str().to_string(),
                content,
            ]);
        }

        let mut out = styled(builder.build());
        let errors = batch.error_count();
        if errors > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} of {} document(s) could not be read",
                errors,
                batch.len()
            )));
        }
        out
    }

    /// Format a dry run: the extraction results and the prompt.
    pub fn format_prepared(&self, prepared: &PreparedAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(prepared)?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}\n{}",
                self.format_batch_table(&prepared.batch),
                self.colorize("Prompt", "cyan"),
                prepared.prompt
            )),
        }
    }

    /// Format content type classifications.
    pub fn format_classifications(&self, entries: &[(String, ExtractionStrategy)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<_> = entries
                    .iter()
                    .map(|(mime, strategy)| json!({"content_type": mime, "strategy": strategy}))
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Content type", "Strategy"]);
                for (mime, strategy) in entries {
                    builder.push_record([mime.clone(), strategy.to_string()]);
                }
                Ok(styled(builder.build()))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// First line of the text, shortened, with the total length.
fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    let first_line = trimmed.lines().next().unwrap_or_default();
    let mut short: String = first_line.chars().take(EXCERPT_CHARS).collect();
    if short.chars().count() < trimmed.chars().count() {
        short.push('…');
    }
    format!("{} ({} chars)", short, trimmed.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use taxzen_domain::{ExtractionError, ExtractionResult, InsightValue, Recommendation, TabularRow};

    fn sample_insight() -> TaxInsight {
        let mut deductions = BTreeMap::new();
        deductions.insert("standard".to_string(), InsightValue::Text("$13,850.00".to_string()));
        let mut breakdown = BTreeMap::new();
        breakdown.insert("deductions".to_string(), deductions);

        TaxInsight {
            total_taxable_income: InsightValue::Text("$50,000.00".to_string()),
            estimated_tax_owed: InsightValue::NotAvailable,
            top_recommendations: vec![Recommendation {
                strategy: "Max out 401(k)".to_string(),
                impact: InsightValue::Text("$2,000.00".to_string()),
            }],
            detailed_breakdown: breakdown,
        }
    }

    fn sample_batch() -> ExtractionBatch {
        ExtractionBatch::new(vec![
            ExtractionResult::text("w2.pdf", ExtractionStrategy::Pdf, "Income: 50000\nEmployer: Acme"),
            ExtractionResult::tabular(
                "gains.csv",
                ExtractionStrategy::Csv,
                vec![TabularRow::from(vec![("a", "1")]), TabularRow::from(vec![("a", "2")])],
            ),
            ExtractionResult::error(
                "scan.png",
                ExtractionStrategy::OcrImage,
                ExtractionError::RecognitionFailure("OCR is disabled".to_string()),
            ),
        ])
    }

    #[test]
    fn test_insight_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_insight(&sample_insight()).unwrap();
        assert!(output.contains("Total taxable income"));
        assert!(output.contains("$50,000.00"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Max out 401(k)"));
        assert!(output.contains("standard"));
    }

    #[test]
    fn test_insight_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_insight(&sample_insight()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["estimated_tax_owed"], "N/A");
        assert_eq!(value["top_recommendations"][0]["impact"], "$2,000.00");
    }

    #[test]
    fn test_insight_without_recommendations() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_insight(&TaxInsight::empty()).unwrap();
        assert!(output.contains("No recommendations."));
        assert!(!output.contains("Detailed breakdown"));
    }

    #[test]
    fn test_batch_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_batch(&sample_batch()).unwrap();
        assert!(output.contains("Income: 50000"));
        assert!(output.contains("2 row(s)"));
        assert!(output.contains("Recognition failure: OCR is disabled"));
        assert!(output.contains("1 of 3 document(s) could not be read"));
    }

    #[test]
    fn test_batch_json_is_array() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_batch(&sample_batch()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(|a| a.len()), Some(3));
        assert_eq!(value[2]["kind"], "error");
    }

    #[test]
    fn test_classifications() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_classifications(&[("image/png".to_string(), ExtractionStrategy::OcrImage)])
            .unwrap();
        assert!(output.contains("\"strategy\": \"ocr_image\""));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short (5 chars)");
        let long = "x".repeat(100);
        assert!(excerpt(&long).starts_with(&"x".repeat(60)));
        assert!(excerpt(&long).contains('…'));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
