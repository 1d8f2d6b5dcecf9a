//! Human-readable text output
//!
//! Prints each chart as a small table with the same value labels a bar chart
//! would carry above its bars.

use crate::pipeline::{Chart, ChartData};
use crate::series::LatencyUnit;
use crate::Result;
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Print every chart to stdout
pub fn print_charts(charts: &[Chart]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for chart in charts {
        write_chart_text(&mut out, chart)?;
    }
    Ok(())
}

/// Write one chart as a table
pub fn write_chart_text<W: Write>(out: &mut W, chart: &Chart) -> Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", chart.labels.title)?;
    writeln!(out, "{}", RULE)?;

    match &chart.data {
        ChartData::IopsLatency {
            series, latency_ms, ..
        } => {
            writeln!(
                out,
                "  {:<12}{:>14}{:>16}{:>14}{:>14}",
                chart.labels.x_label,
                chart.labels.y_label,
                chart.labels.y2_label.as_deref().unwrap_or(""),
                "Latency σ %",
                "Mean"
            )?;
            for i in 0..series.len() {
                writeln!(
                    out,
                    "  {:<12}{:>14}{:>16}{:>14}{:>14}",
                    series.x_series[i],
                    format_bar_label(series.y_series1[i] as f64),
                    format_bar_label(latency_ms[i]),
                    series.y_series3[i],
                    format_latency(series.y_series2[i] as f64)
                )?;
            }
        }
        ChartData::Matrix { matrix, .. } => {
            write!(out, "  {:<12}", format!("{}\\{}", matrix.row_key, matrix.col_key))?;
            for col in &matrix.columns {
                write!(out, "{:>12}", col)?;
            }
            writeln!(out)?;
            for (row, values) in matrix.rows.iter().zip(&matrix.values) {
                write!(out, "  {:<12}", row)?;
                for &v in values {
                    write!(out, "{:>12}", format_bar_label(v))?;
                }
                writeln!(out)?;
            }
        }
        ChartData::Histogram { series } => {
            writeln!(out, "  {:<10}{:>10}{:>10}", "bucket", "ms", "us")?;
            for (i, bucket) in series.x_series.iter().enumerate() {
                writeln!(
                    out,
                    "  {:<10}{:>10}{:>10}",
                    bucket,
                    format_percent_label(series.y_series1[i]).unwrap_or_default(),
                    format_percent_label(series.y_series2[i]).unwrap_or_default()
                )?;
            }
            for entry in &chart.labels.legend {
                writeln!(out, "  {}", entry)?;
            }
        }
    }

    if let Some(ref source) = chart.labels.source {
        writeln!(out, "  source: {}", source)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Value label for a bar: small values get four decimals, others none
pub fn format_bar_label(height: f64) -> String {
    if height < 10.0 {
        format!("{:.4}", height)
    } else {
        format!("{}", height.trunc() as i64)
    }
}

/// Latency in the largest unit it exceeds one of
pub fn format_latency(nanos: f64) -> String {
    let unit = LatencyUnit::auto(nanos);
    format!("{:.2} {}", unit.from_nanos(nanos), unit.symbol())
}

/// Percentage label for a histogram bar; empty buckets get no label
pub fn format_percent_label(height: f64) -> Option<String> {
    if height >= 1.0 {
        Some(format!("{}%", height.trunc() as i64))
    } else if height > 0.0 {
        Some("<1%".to_string())
    } else {
        None
    }
}
