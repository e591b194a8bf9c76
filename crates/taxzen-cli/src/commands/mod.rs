//! Command implementations.

pub mod analyze;
pub mod classify;
pub mod config;
pub mod estimate;
pub mod extract;

pub use self::analyze::execute_analyze;
pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::estimate::execute_estimate;
pub use self::extract::execute_extract;

use crate::config::Config;
use crate::error::{CliError, Result};
use taxzen_extractor::Analyzer;

/// Build the full pipeline, including the completion provider.
pub(crate) fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let provider = config.completion.build().map_err(CliError::Config)?;
    Ok(Analyzer::from_config(provider, &config.analysis)?)
}

/// Build the pipeline without a completion provider; needs no credentials.
pub(crate) fn build_extraction_analyzer(config: &Config) -> Result<Analyzer> {
    Ok(Analyzer::for_extraction(&config.analysis)?)
}
