//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => println!("{}", render_config(config, formatter.format())?),
        ConfigAction::Init { force } => {
            init_config(config_path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote {}", config_path.display()))
            );
        }
        ConfigAction::Path => println!("{}", config_path.display()),
    }
    Ok(())
}

/// Render the effective configuration.
pub fn render_config(config: &Config, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        _ => config.to_toml(),
    }
}

/// Write a default configuration file.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        assert!(matches!(init_config(&path, false), Err(CliError::Config(_))));
        assert!(init_config(&path, true).is_ok());
    }

    #[test]
    fn test_render_config() {
        let config = Config::default();

        let toml = render_config(&config, OutputFormat::Table).unwrap();
        assert!(toml.contains("[engine]"));
        assert!(toml.contains("max_chemicals = 20"));

        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["settings"]["format"], "table");
        assert_eq!(json["engine"]["store_timeout_ms"], 250);
    }
}
