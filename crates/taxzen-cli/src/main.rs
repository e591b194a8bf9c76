//! TaxZen CLI - AI-assisted analysis of tax documents.

use clap::Parser;
use taxzen_cli::commands;
use taxzen_cli::{Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if let Some(raw) = e.raw_response() {
            eprintln!("Model response was:\n{}", raw);
        }
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;

    // The config command must work even when the file does not parse
    if let Command::Config(args) = cli.command {
        let formatter = Formatter::new(
            cli.format.map(Into::into).unwrap_or(taxzen_cli::config::OutputFormat::Table),
            !cli.no_color,
        );
        return commands::execute_config(args, &config_path, &formatter);
    }

    let mut config = Config::load_from(&config_path)?;
    if let Some(mode) = cli.mode {
        config.analysis.normalization_mode = mode.into();
    }
    if let Some(api_key) = cli.api_key {
        config.completion.api_key = Some(api_key);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await,
        Command::Estimate(args) => commands::execute_estimate(args, &config, &formatter).await,
        Command::Classify(args) => commands::execute_classify(args, &formatter),
        Command::Config(args) => commands::execute_config(args, &config_path, &formatter),
    }
}
