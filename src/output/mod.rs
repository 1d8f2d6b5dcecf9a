//! Chart export
//!
//! Writes built charts in the configured format. JSON and CSV produce one
//! file per chart under the output directory; text goes to stdout.

pub mod csv;
pub mod json;
pub mod text;

use crate::config::{OutputConfig, OutputFormat};
use crate::pipeline::Chart;
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Export every chart, returning the paths of the files written
pub fn write_charts(charts: &[Chart], config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let paths = match config.format {
        OutputFormat::Text => {
            text::print_charts(charts)?;
            return Ok(Vec::new());
        }
        OutputFormat::Json => {
            ensure_dir(&config.dir)?;
            let info = json::JsonExportInfo::now();
            charts
                .iter()
                .map(|chart| json::write_json_chart(&config.dir, chart, &info))
                .collect::<Result<Vec<_>>>()?
        }
        OutputFormat::Csv => {
            ensure_dir(&config.dir)?;
            charts
                .iter()
                .map(|chart| csv::write_csv_chart(&config.dir, chart))
                .collect::<Result<Vec<_>>>()?
        }
    };

    tracing::info!(
        format = %config.format,
        files = paths.len(),
        dir = %config.dir.display(),
        "wrote chart series"
    );
    Ok(paths)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}
