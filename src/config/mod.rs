//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! CLI values take precedence over the file; the merged [`Settings`] is
//! validated before any document is read.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::record::Field;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where fio JSON reports are read from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory containing one `.json` report per run
    pub directory: Option<PathBuf>,
}

/// Which charts to build and how to slice the runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Build IOPS/latency series and metric matrices
    #[serde(default)]
    pub latency_iops: bool,
    /// Build latency histograms per queue depth
    #[serde(default)]
    pub histogram: bool,
    /// Workload labels to chart (e.g. randread, randwrite)
    #[serde(default = "default_modes")]
    pub modes: Vec<String>,
    /// Job count the 2D charts are fixed at
    #[serde(default = "default_numjobs")]
    pub numjobs: i64,
    /// Job count the histograms are fixed at
    #[serde(default = "default_numjobs")]
    pub histogram_numjobs: i64,
    /// Largest queue depth in matrices
    #[serde(default = "default_max")]
    pub maxdepth: i64,
    /// Largest job count in matrices
    #[serde(default = "default_max")]
    pub maxjobs: i64,
    /// Metrics to build matrices for
    #[serde(default = "default_matrix_metrics")]
    pub matrix_metrics: Vec<Field>,
}

fn default_modes() -> Vec<String> {
    vec!["randread".to_string(), "randwrite".to_string()]
}

fn default_numjobs() -> i64 {
    1
}

fn default_max() -> i64 {
    64
}

fn default_matrix_metrics() -> Vec<Field> {
    vec![Field::Iops, Field::Lat]
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            latency_iops: false,
            histogram: false,
            modes: default_modes(),
            numjobs: default_numjobs(),
            histogram_numjobs: default_numjobs(),
            maxdepth: default_max(),
            maxjobs: default_max(),
            matrix_metrics: default_matrix_metrics(),
        }
    }
}

/// Free-text labels passed through to the renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelsConfig {
    /// Chart title prefix
    pub title: Option<String>,
    /// Attribution shown on every chart
    pub source: Option<String>,
}

/// Series export format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty-printed JSON file per chart
    #[default]
    Json,
    /// One CSV file per chart
    Csv,
    /// Tables on stdout
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory series files are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Include timestamps in log lines
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timestamps() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            timestamps: default_timestamps(),
        }
    }
}
