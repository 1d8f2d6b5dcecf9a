//! Latency histogram bucket ordering
//!
//! fio reports latency distributions as `label → percentage` maps keyed by
//! bucket upper bound (`"2"`, `"4"`, ... `"2000"`) plus an overflow bucket
//! (`">=2000"`). JSON object order is not meaningful, so labels are ordered
//! numerically here with the overflow bucket pinned last.
//!
//! The same ordering is applied to the ms, µs and ns maps, so index `i` of
//! every aligned sequence refers to the same bucket position.

use crate::dataset::Dataset;
use crate::error::{PipelineError, PipelineResult};
use crate::record::value::{coerce_f64, round_half_even};
use crate::record::Field;
use serde::Serialize;
use serde_json::{Map, Value};

/// fio's "at or above the highest tracked boundary" bucket
pub const OVERFLOW_BUCKET: &str = ">=2000";

/// Orders and aligns histogram buckets around one overflow label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyHistogramSorter {
    overflow: String,
}

impl Default for LatencyHistogramSorter {
    fn default() -> Self {
        Self::new(OVERFLOW_BUCKET)
    }
}

impl LatencyHistogramSorter {
    pub fn new(overflow: impl Into<String>) -> Self {
        Self {
            overflow: overflow.into(),
        }
    }

    /// Numeric labels ascending, then the overflow label if present
    pub fn order_buckets<'a, I>(&self, labels: I) -> PipelineResult<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut numeric = Vec::new();
        let mut has_overflow = false;

        for label in labels {
            if label == self.overflow {
                has_overflow = true;
                continue;
            }
            let bound = label.trim().parse::<i64>().map_err(|_| PipelineError::InvalidBucket {
                label: label.to_string(),
                detail: "label is neither numeric nor the overflow bucket".to_string(),
            })?;
            numeric.push((bound, label.to_string()));
        }

        numeric.sort_by_key(|(bound, _)| *bound);
        let mut order: Vec<String> = numeric.into_iter().map(|(_, label)| label).collect();
        if has_overflow {
            order.push(self.overflow.clone());
        }
        Ok(order)
    }

    /// Bucket values in the sequence given by `order`
    pub fn align(&self, bucket_map: &Map<String, Value>, order: &[String]) -> PipelineResult<Vec<f64>> {
        order
            .iter()
            .map(|label| {
                let value = bucket_map.get(label).ok_or_else(|| PipelineError::MissingBucket {
                    label: label.clone(),
                })?;
                coerce_f64(value).ok_or_else(|| PipelineError::InvalidBucket {
                    label: label.clone(),
                    detail: format!("value {} is not a percentage", value),
                })
            })
            .collect()
    }

    /// Order a map by its own labels and return the aligned values
    pub fn sorted_values(&self, bucket_map: &Map<String, Value>) -> PipelineResult<Vec<f64>> {
        let order = self.order_buckets(bucket_map.keys().map(String::as_str))?;
        self.align(bucket_map, &order)
    }
}

/// One latency histogram chart for a single queue depth
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub mode: String,
    pub iodepth: i64,
    pub numjobs: i64,
    /// Ordered millisecond bucket labels
    pub x_series: Vec<String>,
    /// Percent of IOs per millisecond bucket
    pub y_series1: Vec<f64>,
    /// Percent of IOs per microsecond bucket, zero-padded to `x_series`
    pub y_series2: Vec<f64>,
    /// Percent of IOs per nanosecond bucket, zero-padded to `x_series`
    pub y_series3: Vec<f64>,
    /// Share of IOs covered by the millisecond buckets
    pub coverage_ms: f64,
    /// Share of IOs covered by the microsecond buckets
    pub coverage_us: f64,
}

impl HistogramSeries {
    /// Coverage as shown in a legend: `"<1"` for anything in (0, 1)
    pub fn coverage_label(coverage: f64) -> String {
        if coverage > 0.0 && coverage < 1.0 {
            "<1".to_string()
        } else {
            format!("{}", coverage)
        }
    }
}

/// Build one histogram per queue depth for a workload at a fixed job count
pub fn build_histograms(
    dataset: &Dataset,
    mode: &str,
    numjobs: i64,
    sorter: &LatencyHistogramSorter,
) -> PipelineResult<Vec<HistogramSeries>> {
    let subset = dataset
        .filter_mode(mode)
        .select_normalized(Field::Numjobs, &Value::from(numjobs));

    let mut charts = Vec::new();
    for depth in subset.unique_sorted(Field::Iodepth)? {
        let Some(record) = subset.first_with(Field::Iodepth, depth)? else {
            continue;
        };

        let ms = record.buckets(Field::LatencyMs)?;
        let x_series = sorter.order_buckets(ms.keys().map(String::as_str))?;
        let y_series1 = sorter.align(ms, &x_series)?;
        let mut y_series2 = sorter.sorted_values(record.buckets(Field::LatencyUs)?)?;
        let mut y_series3 = sorter.sorted_values(record.buckets(Field::LatencyNs)?)?;

        // µs and ns maps stop at 1000; pad them out to the ms bucket count
        pad_to(&mut y_series2, x_series.len());
        pad_to(&mut y_series3, x_series.len());

        charts.push(HistogramSeries {
            mode: mode.to_string(),
            iodepth: depth,
            numjobs,
            coverage_ms: round2(y_series1.iter().sum()),
            coverage_us: round2(y_series2.iter().sum()),
            x_series,
            y_series1,
            y_series2,
            y_series3,
        });
    }

    tracing::debug!(mode, numjobs, charts = charts.len(), "built latency histograms");
    Ok(charts)
}

fn pad_to(values: &mut Vec<f64>, len: usize) {
    if values.len() < len {
        values.resize(len, 0.0);
    }
}

fn round2(value: f64) -> f64 {
    round_half_even(value * 100.0) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{fio_document, FioRun, MS_BUCKETS, US_BUCKETS};
    use crate::record::flatten_all;
    use serde_json::json;

    #[test]
    fn test_overflow_sorted_last() {
        let sorter = LatencyHistogramSorter::default();
        let order = sorter.order_buckets(["50", "200", ">=2000", "10"]).unwrap();
        assert_eq!(order, vec!["10", "50", "200", ">=2000"]);

        let order = sorter.order_buckets([">=2000", "4", "2"]).unwrap();
        assert_eq!(order, vec!["2", "4", ">=2000"]);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let sorter = LatencyHistogramSorter::default();
        let order = sorter.order_buckets(["1000", "100", "2", "20"]).unwrap();
        assert_eq!(order, vec!["2", "20", "100", "1000"]);
    }

    #[test]
    fn test_without_overflow() {
        let order = LatencyHistogramSorter::default()
            .order_buckets(["4", "2"])
            .unwrap();
        assert_eq!(order, vec!["2", "4"]);
    }

    #[test]
    fn test_custom_overflow_label() {
        let sorter = LatencyHistogramSorter::new(">=1000");
        let order = sorter.order_buckets([">=1000", "750", "2"]).unwrap();
        assert_eq!(order, vec!["2", "750", ">=1000"]);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = LatencyHistogramSorter::default()
            .order_buckets(["2", ">=5000"])
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidBucket { ref label, .. } if label == ">=5000"));
    }

    #[test]
    fn test_align_follows_order() {
        let map = json!({"10": 1.5, "2": 0.5, ">=2000": 0.01});
        let map = map.as_object().unwrap();
        let sorter = LatencyHistogramSorter::default();
        let order = vec!["2".to_string(), "10".to_string(), ">=2000".to_string()];
        assert_eq!(sorter.align(map, &order).unwrap(), vec![0.5, 1.5, 0.01]);
    }

    #[test]
    fn test_align_missing_bucket() {
        let map = json!({"2": 0.5});
        let err = LatencyHistogramSorter::default()
            .align(map.as_object().unwrap(), &["2".to_string(), "4".to_string()])
            .unwrap_err();
        assert_eq!(err, PipelineError::MissingBucket { label: "4".to_string() });
    }

    #[test]
    fn test_coverage_label() {
        assert_eq!(HistogramSeries::coverage_label(0.42), "<1");
        assert_eq!(HistogramSeries::coverage_label(0.0), "0");
        assert_eq!(HistogramSeries::coverage_label(97.5), "97.5");
    }

    #[test]
    fn test_coverage_rounds_half_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(38.999), 39.0);
    }

    #[test]
    fn test_build_histograms_per_depth() {
        let docs = vec![
            fio_document("a.json", &FioRun::read(4, 1, 1.0, 1.0, 1.0)),
            fio_document("b.json", &FioRun::read(1, 1, 1.0, 1.0, 1.0)),
            fio_document("c.json", &FioRun::read(1, 2, 1.0, 1.0, 1.0)),
        ];
        let dataset = Dataset::new(flatten_all(&docs).unwrap());
        let charts =
            build_histograms(&dataset, "randread", 1, &LatencyHistogramSorter::default()).unwrap();

        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].iodepth, 1);
        assert_eq!(charts[1].iodepth, 4);

        let chart = &charts[0];
        assert_eq!(chart.x_series, MS_BUCKETS.to_vec());
        assert_eq!(chart.y_series1.len(), MS_BUCKETS.len());
        assert_eq!(chart.y_series2.len(), MS_BUCKETS.len());
        assert_eq!(chart.y_series3.len(), MS_BUCKETS.len());

        // Fixture values grow with bucket position
        assert_eq!(chart.y_series1[0], 0.5);
        assert_eq!(chart.y_series1[11], 6.0);
        assert_eq!(chart.y_series2[US_BUCKETS.len() - 1], 10.0);
        assert_eq!(chart.y_series2[US_BUCKETS.len()..], [0.0, 0.0]);

        assert_eq!(chart.coverage_ms, 39.0);
        assert_eq!(chart.coverage_us, 55.0);
    }
}
