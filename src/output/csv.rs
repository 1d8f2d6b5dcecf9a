//! CSV output formatting
//!
//! One file per chart, one row per x value (or per matrix row / histogram
//! bucket), header row first. Suited to spreadsheets and pandas.

use crate::pipeline::{Chart, ChartData};
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write one chart to `<dir>/<name>.csv`
pub fn write_csv_chart(dir: &Path, chart: &Chart) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", chart.name));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create CSV output: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_chart(&mut out, chart)
        .and_then(|_| out.flush().map_err(Into::into))
        .with_context(|| format!("Failed to write CSV output: {}", path.display()))?;

    Ok(path)
}

/// Write a chart's rows to any writer
pub fn write_chart<W: Write>(out: &mut W, chart: &Chart) -> Result<()> {
    match &chart.data {
        ChartData::IopsLatency {
            series, latency_ms, ..
        } => {
            writeln!(out, "iodepth,iops,lat_ns,lat_ms,lat_stddev_pct")?;
            for i in 0..series.len() {
                writeln!(
                    out,
                    "{},{},{},{},{}",
                    series.x_series[i],
                    series.y_series1[i],
                    series.y_series2[i],
                    latency_ms[i],
                    series.y_series3[i]
                )?;
            }
        }
        ChartData::Matrix { matrix, .. } => {
            write!(out, "{}", matrix.row_key)?;
            for col in &matrix.columns {
                write!(out, ",{}={}", matrix.col_key, col)?;
            }
            writeln!(out)?;
            for (row, values) in matrix.rows.iter().zip(&matrix.values) {
                write!(out, "{}", row)?;
                for v in values {
                    write!(out, ",{}", v)?;
                }
                writeln!(out)?;
            }
        }
        ChartData::Histogram { series } => {
            writeln!(out, "bucket,ms_pct,us_pct,ns_pct")?;
            for (i, bucket) in series.x_series.iter().enumerate() {
                writeln!(
                    out,
                    "{},{},{},{}",
                    bucket, series.y_series1[i], series.y_series2[i], series.y_series3[i]
                )?;
            }
        }
    }
    Ok(())
}
