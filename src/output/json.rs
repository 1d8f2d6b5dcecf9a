//! JSON output formatting
//!
//! Each chart is written to its own pretty-printed file carrying the series,
//! the labels, and a small provenance header (timestamp, host, version).

use crate::pipeline::Chart;
use crate::Result;
use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Provenance of an exported chart
#[derive(Debug, Clone, Serialize)]
pub struct JsonExportInfo {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    pub version: String,
}

impl JsonExportInfo {
    pub fn now() -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Complete per-chart JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonChartOutput<'a> {
    pub export: JsonExportInfo,
    #[serde(flatten)]
    pub chart: &'a Chart,
}

/// Write one chart to `<dir>/<name>.json`
pub fn write_json_chart(dir: &Path, chart: &Chart, info: &JsonExportInfo) -> Result<PathBuf> {
    let path = dir.join(format!("{}.json", chart.name));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create JSON output: {}", path.display()))?;

    let output = JsonChartOutput {
        export: info.clone(),
        chart,
    };
    serde_json::to_writer_pretty(BufWriter::new(file), &output)
        .with_context(|| format!("Failed to write JSON output: {}", path.display()))?;

    Ok(path)
}
