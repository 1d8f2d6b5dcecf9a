//! 2D series: one x axis, three aligned y series
//!
//! The classic IOPS/latency chart plots, per queue depth, the throughput
//! (`y_series1`), the mean latency (`y_series2`) and the latency standard
//! deviation expressed as a percentage of the mean (`y_series3`).

use crate::dataset::Dataset;
use crate::error::{PipelineError, PipelineResult};
use crate::record::value::round_half_even;
use crate::record::{Field, FlatRecord};
use serde::Serialize;
use serde_json::Value;

/// Parallel sequences aligned by index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub x_series: Vec<i64>,
    pub y_series1: Vec<i64>,
    /// Rounded raw values of the second y key (nanoseconds for latency)
    pub y_series2: Vec<i64>,
    /// `y3` as a rounded percentage of `y2`, per x value
    pub y_series3: Vec<i64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.x_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_series.is_empty()
    }

    /// `y_series2` converted from nanoseconds to milliseconds
    pub fn latency_ms(&self) -> Vec<f64> {
        self.y_series2
            .iter()
            .map(|&ns| ns as f64 / super::NANOS_PER_MILLI)
            .collect()
    }
}

/// What to plot and which records to plot it from
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub x_key: Field,
    /// Workload label (`randread`) or bare direction (`read`)
    pub mode: String,
    pub fixed_key: Field,
    pub fixed_value: Value,
    pub y_keys: [Field; 3],
}

impl SeriesRequest {
    /// IOPS, latency and latency std-dev over queue depth at a fixed job count
    pub fn iops_latency(mode: impl Into<String>, numjobs: i64) -> Self {
        Self {
            x_key: Field::Iodepth,
            mode: mode.into(),
            fixed_key: Field::Numjobs,
            fixed_value: Value::from(numjobs),
            y_keys: [Field::Iops, Field::Lat, Field::LatStddev],
        }
    }
}

/// Build a 2D series from a record collection
///
/// Records are narrowed to the request's workload, then to those whose
/// fixed key matches under normalized selection. Each x value takes its y
/// values from the first matching record in input order, so every output
/// sequence has the same length as `x_series`.
pub fn build(dataset: &Dataset, request: &SeriesRequest) -> PipelineResult<ChartSeries> {
    let subset = dataset
        .filter_mode(&request.mode)
        .select_normalized(request.fixed_key, &request.fixed_value);

    let x_series = subset.unique_sorted(request.x_key)?;
    let [y1_key, y2_key, y3_key] = request.y_keys;

    let mut series = ChartSeries {
        x_series: Vec::with_capacity(x_series.len()),
        ..ChartSeries::default()
    };

    for x in x_series {
        let Some(record) = subset.first_with(request.x_key, x)? else {
            continue;
        };

        let y1 = rounded(record, y1_key)?;
        let y2 = rounded(record, y2_key)?;
        let y3 = rounded(record, y3_key)?;

        series.x_series.push(x);
        series.y_series1.push(y1);
        series.y_series2.push(y2);
        series.y_series3.push(stddev_percent(record, y3, y2)?);
    }

    tracing::debug!(
        mode = %request.mode,
        x_key = %request.x_key,
        points = series.len(),
        "built chart series"
    );
    Ok(series)
}

fn rounded(record: &FlatRecord, field: Field) -> PipelineResult<i64> {
    Ok(round_half_even(record.number(field)?) as i64)
}

/// Std-dev as a rounded percentage of the mean latency at the same x
fn stddev_percent(record: &FlatRecord, stddev: i64, latency: i64) -> PipelineResult<i64> {
    if latency == 0 {
        return Err(PipelineError::ZeroLatency {
            document: record.source.clone(),
        });
    }
    Ok(round_half_even(stddev as f64 / latency as f64 * 100.0) as i64)
}
