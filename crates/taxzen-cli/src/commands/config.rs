//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Shown instead of the configured credential.
const REDACTED: &str = "********";

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = Config::load_from(path)?;
            println!("{}", redacted(&config).to_toml()?);
            if !path.exists() {
                println!("{}", formatter.info("No configuration file; showing defaults"));
            }
        }
        ConfigAction::Init { force } => {
            init(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if config.completion.api_key.is_some() {
        config.completion.api_key = Some(REDACTED.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init(&path, false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        assert!(matches!(init(&path, false), Err(CliError::Config(_))));
        assert!(init(&path, true).is_ok());
    }

    #[test]
    fn test_show_hides_api_key() {
        let mut config = Config::default();
        config.completion.api_key = Some("sk-secret".to_string());
        let shown = redacted(&config).to_toml().unwrap();
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains(REDACTED));
    }
}
