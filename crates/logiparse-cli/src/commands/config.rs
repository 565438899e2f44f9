//! Config command - inspect and create configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use logiparse_core::LogiParseConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "validation.amount_tolerance")
        key: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, config_path),
        ConfigCommand::Get { key } => get_config(&key, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

/// Per-user configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logiparse")
        .join("config.json")
}

fn resolve_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration used by commands.
///
/// An explicit path must exist. Without one, the per-user file is read when
/// present, otherwise defaults apply.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LogiParseConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        debug!("Loading config from {}", path.display());
        return Ok(LogiParseConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(LogiParseConfig::from_file(&path)?)
    } else {
        debug!("No config file at {}, using defaults", path.display());
        Ok(LogiParseConfig::default())
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_path(config_path);

    if config_path.is_none() && !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_config(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| resolve_path(config_path));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    LogiParseConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_config(key: &str, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let value = lookup(&serde_json::to_value(&config)?, key)?;

    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}

/// Follow a dotted key through a JSON object.
fn lookup(json: &serde_json::Value, key: &str) -> anyhow::Result<serde_json::Value> {
    key.split('.')
        .try_fold(json, |current, part| current.get(part))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_path(config_path);

    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'logiparse config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_dotted_key() {
        let json = serde_json::to_value(LogiParseConfig::default()).unwrap();
        assert_eq!(
            lookup(&json, "extraction.default_currency").unwrap(),
            serde_json::json!("PHP")
        );
        assert_eq!(
            lookup(&json, "validation.sum_mismatch_severity").unwrap(),
            serde_json::json!("issue")
        );
        assert!(lookup(&json, "validation.nope").is_err());
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_config(path.to_str()).is_err());
    }
}
