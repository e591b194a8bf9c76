//! Extract command implementation.

use super::build_extraction_analyzer;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::files::load_files;
use crate::output::Formatter;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let files = load_files(&args.files, args.content_type.as_deref())?;
    let batch = build_extraction_analyzer(config)?.extract(files).await?;

    println!("{}", formatter.format_batch(&batch)?);

    Ok(())
}
