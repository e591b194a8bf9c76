//! Estimate command implementation.

use super::build_analyzer;
use crate::cli::EstimateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use taxzen_extractor::ManualTaxData;

/// Execute the estimate command.
pub async fn execute_estimate(args: EstimateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let data = manual_data(args);

    // Reject incomplete figures before any credentials are needed
    data.validate()?;

    let analyzer = build_analyzer(config)?;
    let insight = analyzer.analyze_manual(data).await?;
    println!("{}", formatter.format_insight(&insight)?);

    Ok(())
}

fn manual_data(args: EstimateArgs) -> ManualTaxData {
    ManualTaxData::new(
        args.income.unwrap_or_default(),
        args.deductions.unwrap_or_default(),
        args.stock_sales.unwrap_or_default(),
    )
}
