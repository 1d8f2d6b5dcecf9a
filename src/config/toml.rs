//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Settings> {
    let settings: Settings = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(settings)
}

/// Load the config file named on the command line (if any) and apply CLI overrides
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Settings::default(),
    };
    Ok(merge_cli_with_settings(cli, settings))
}

/// Merge CLI arguments with file settings (CLI takes precedence)
pub fn merge_cli_with_settings(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(ref dir) = cli.input_directory {
        settings.input.directory = Some(dir.clone());
    }

    // Chart selection flags only ever switch charts on
    if cli.latency_iops {
        settings.charts.latency_iops = true;
    }
    if cli.histogram {
        settings.charts.histogram = true;
    }
    if !cli.modes.is_empty() {
        settings.charts.modes = cli.modes.clone();
    }
    if let Some(numjobs) = cli.numjobs {
        settings.charts.numjobs = numjobs;
    }
    if let Some(maxdepth) = cli.maxdepth {
        settings.charts.maxdepth = maxdepth;
    }
    if let Some(maxjobs) = cli.maxjobs {
        settings.charts.maxjobs = maxjobs;
    }

    if let Some(ref title) = cli.title {
        settings.labels.title = Some(title.clone());
    }
    if let Some(ref source) = cli.source {
        settings.labels.source = Some(source.clone());
    }

    if let Some(ref dir) = cli.output_dir {
        settings.output.dir = dir.clone();
    }
    if let Some(format) = cli.format {
        settings.output.format = format;
    }

    if cli.debug {
        settings.logging.level = "debug".to_string();
    }

    settings
}
