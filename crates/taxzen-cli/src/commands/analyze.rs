//! Analyze command implementation.

use super::{build_analyzer, build_extraction_analyzer};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::files::load_files;
use crate::output::Formatter;
use taxzen_domain::UploadedFile;
use taxzen_extractor::PreparedAnalysis;

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let files = load_files(&args.files, args.content_type.as_deref())?;

    if args.dry_run {
        let prepared = prepare(files, config).await?;
        println!("{}", formatter.format_prepared(&prepared)?);
        return Ok(());
    }

    let analyzer = build_analyzer(config)?;
    let insight = analyzer.analyze(files).await?;
    println!("{}", formatter.format_insight(&insight)?);

    Ok(())
}

/// Extract and build the prompt without a completion provider.
async fn prepare(files: Vec<UploadedFile>, config: &Config) -> Result<PreparedAnalysis> {
    let analyzer = build_extraction_analyzer(config)?;
    Ok(analyzer.prepare(files).await?)
}
