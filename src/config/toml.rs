//! TOML configuration file parsing
//!
//! ```toml
//! [integration]
//! total_intervals = 100000000
//! worker_count = 8
//!
//! [output]
//! json_output = "run.json"
//! per_worker_output = true
//! ```

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a configuration (CLI takes precedence)
///
/// Only arguments the user actually supplied override the configuration;
/// absent positionals keep the file's values.
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(workers) = cli.worker_count {
        config.integration.worker_count = workers;
    }
    if let Some(total) = cli.total_intervals {
        config.integration.total_intervals = total;
    }

    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.json_pretty {
        config.output.json_pretty = true;
    }
    if cli.per_worker_output {
        config.output.per_worker_output = true;
    }

    config
}

/// Build the run configuration from the CLI, loading `--config` if given
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}
