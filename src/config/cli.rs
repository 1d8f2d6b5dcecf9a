//! CLI argument parsing using clap

use super::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// fioplot - turn fio JSON output into chart-ready series
#[derive(Parser, Debug, Default)]
#[command(name = "fioplot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input directory where fio JSON files can be found
    #[arg(short = 'i', long)]
    pub input_directory: Option<PathBuf>,

    /// Title to use in charts
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Source attribution shown on charts
    #[arg(short = 's', long)]
    pub source: Option<String>,

    /// Generate IOPS + latency charts and metric matrices
    #[arg(short = 'L', long)]
    pub latency_iops: bool,

    /// Generate a latency histogram per queue depth
    #[arg(short = 'H', long)]
    pub histogram: bool,

    /// Maximum queue depth to chart
    #[arg(short = 'D', long)]
    pub maxdepth: Option<i64>,

    /// Maximum numjobs to chart
    #[arg(short = 'J', long)]
    pub maxjobs: Option<i64>,

    /// numjobs value the IOPS/latency charts are generated for
    #[arg(short = 'n', long)]
    pub numjobs: Option<i64>,

    /// Comma-separated workloads to chart (e.g., "randread,randwrite")
    #[arg(long, value_delimiter = ',')]
    pub modes: Vec<String>,

    // === Output Options ===
    /// Directory to write series files to
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Series export format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Load and flatten input, then stop without writing output
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
