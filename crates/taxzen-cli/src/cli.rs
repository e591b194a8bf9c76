//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use taxzen_normalizer::NormalizationMode;

/// TaxZen - AI-assisted analysis of tax documents.
#[derive(Debug, Parser)]
#[command(name = "taxzen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// How amounts in the answer are rendered (overrides configuration)
    #[arg(short, long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// OpenAI API key (overrides configuration)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// Normalization mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Plain numbers
    Numeric,
    /// Formatted currency strings
    Currency,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze tax documents with the model
    Analyze(AnalyzeArgs),

    /// Extract documents without calling the model
    Extract(ExtractArgs),

    /// Analyze manually entered figures
    Estimate(EstimateArgs),

    /// Show which extractor handles each content type
    Classify(ClassifyArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Documents to analyze
    pub files: Vec<PathBuf>,

    /// Content type for every file (default: guessed from the extension)
    #[arg(short = 't', long)]
    pub content_type: Option<String>,

    /// Print the prompt instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Documents to extract
    pub files: Vec<PathBuf>,

    /// Content type for every file (default: guessed from the extension)
    #[arg(short = 't', long)]
    pub content_type: Option<String>,
}

/// Arguments for the estimate command.
#[derive(Debug, Parser)]
pub struct EstimateArgs {
    /// Total income
    #[arg(long)]
    pub income: Option<String>,

    /// Total deductions
    #[arg(long)]
    pub deductions: Option<String>,

    /// Stock sale proceeds or gains
    #[arg(long)]
    pub stock_sales: Option<String>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Content types to classify
    #[arg(required = true)]
    pub mime_types: Vec<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for NormalizationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Numeric => NormalizationMode::Numeric,
            ModeArg::Currency => NormalizationMode::Currency,
        }
    }
}
