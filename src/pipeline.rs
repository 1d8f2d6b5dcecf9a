//! Chart jobs
//!
//! Ties the pieces together: documents are flattened once into a
//! [`Dataset`], then each configured chart is built from it and paired with
//! the labels a renderer needs. Labels are assembled from configuration and
//! never influence the series themselves.

use crate::config::{ChartsConfig, LabelsConfig, Settings};
use crate::dataset::Dataset;
use crate::error::PipelineResult;
use crate::record::{flatten_all, Field, RawDocument};
use crate::series::{
    build, build_histograms, build_matrix, ChartSeries, HistogramSeries, LatencyHistogramSorter,
    Matrix, MatrixRequest, SeriesRequest,
};
use serde::Serialize;

/// Titles, axis labels and attribution for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartLabels {
    pub title: String,
    pub mode: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_label: Option<String>,
    /// Legend entries, in series order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Series payload of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    IopsLatency {
        numjobs: i64,
        series: ChartSeries,
        /// `series.y_series2` in milliseconds
        latency_ms: Vec<f64>,
    },
    Matrix {
        /// Row tick labels
        numjobs: Vec<i64>,
        /// Column tick labels
        iodepth: Vec<i64>,
        matrix: Matrix,
    },
    Histogram {
        series: HistogramSeries,
    },
}

/// One renderable chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// File stem the chart is exported under
    pub name: String,
    pub labels: ChartLabels,
    pub data: ChartData,
}

/// Flattened runs plus the chart configuration they are charted with
#[derive(Debug, Clone)]
pub struct Pipeline {
    dataset: Dataset,
    charts: ChartsConfig,
    labels: LabelsConfig,
    sorter: LatencyHistogramSorter,
}

impl Pipeline {
    /// Flatten every document; the first bad document aborts the run
    pub fn from_documents(documents: &[RawDocument], settings: &Settings) -> PipelineResult<Self> {
        let records = flatten_all(documents)?;
        tracing::info!(records = records.len(), "flattened fio reports");
        Ok(Self::new(Dataset::new(records), settings))
    }

    pub fn new(dataset: Dataset, settings: &Settings) -> Self {
        Self {
            dataset,
            charts: settings.charts.clone(),
            labels: settings.labels.clone(),
            sorter: LatencyHistogramSorter::default(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// IOPS and mean latency over queue depth at the configured job count
    pub fn chart_iops_latency(&self, mode: &str) -> PipelineResult<Chart> {
        let numjobs = self.charts.numjobs;
        let series = build(&self.dataset, &SeriesRequest::iops_latency(mode, numjobs))?;

        let title = match &self.labels.title {
            Some(title) => format!("{} | {} | numjobs: {}", title, mode, numjobs),
            None => format!("{} performance", mode),
        };

        Ok(Chart {
            name: format!("{}_iodepth_{}_iops_latency", mode, numjobs),
            labels: ChartLabels {
                title,
                mode: mode.to_string(),
                x_label: "I/O Depth".to_string(),
                y_label: "IOP/s".to_string(),
                y2_label: Some("Latency in ms".to_string()),
                legend: vec!["IOP/s".to_string(), "Latency in ms".to_string()],
                source: self.labels.source.clone(),
                ..ChartLabels::default()
            },
            data: ChartData::IopsLatency {
                numjobs,
                latency_ms: series.latency_ms(),
                series,
            },
        })
    }

    /// A metric over job count × queue depth, bounded by the configured maxima
    pub fn chart_3d(&self, mode: &str, metric: Field) -> PipelineResult<Chart> {
        let request = MatrixRequest::new(mode, metric, self.charts.maxjobs, self.charts.maxdepth);
        let matrix = build_matrix(&self.dataset, &request)?;

        Ok(Chart {
            name: format!("3d-{}-jobs-{}", metric, mode),
            labels: ChartLabels {
                title: self.prefixed(&format!("{} | {}", mode, metric)),
                mode: mode.to_string(),
                x_label: Field::Iodepth.to_string(),
                y_label: Field::Numjobs.to_string(),
                z_label: Some(metric.to_string()),
                source: self.labels.source.clone(),
                ..ChartLabels::default()
            },
            data: ChartData::Matrix {
                numjobs: matrix.rows.clone(),
                iodepth: matrix.columns.clone(),
                matrix,
            },
        })
    }

    /// One latency histogram per queue depth
    pub fn chart_latency_histogram(&self, mode: &str) -> PipelineResult<Vec<Chart>> {
        let histograms = build_histograms(
            &self.dataset,
            mode,
            self.charts.histogram_numjobs,
            &self.sorter,
        )?;

        Ok(histograms
            .into_iter()
            .map(|series| Chart {
                name: format!("{}_{}_histogram", mode, series.iodepth),
                labels: ChartLabels {
                    title: self.prefixed(&format!(
                        "{} latency histogram | IO depth {}",
                        title_case(mode),
                        series.iodepth
                    )),
                    mode: mode.to_string(),
                    x_label: "Latency in ms or us".to_string(),
                    y_label: "Percentage of IO (ms)".to_string(),
                    legend: vec![
                        format!(
                            "Latency in ms ({}%)",
                            HistogramSeries::coverage_label(series.coverage_ms)
                        ),
                        format!(
                            "Latency in us ({}%)",
                            HistogramSeries::coverage_label(series.coverage_us)
                        ),
                    ],
                    source: self.labels.source.clone(),
                    ..ChartLabels::default()
                },
                data: ChartData::Histogram { series },
            })
            .collect())
    }

    /// Every chart the configuration asks for, per configured workload
    pub fn run(&self) -> PipelineResult<Vec<Chart>> {
        let mut charts = Vec::new();
        for mode in &self.charts.modes {
            if self.charts.latency_iops {
                let chart = self.chart_iops_latency(mode)?;
                warn_if_empty(&chart);
                charts.push(chart);
                for &metric in &self.charts.matrix_metrics {
                    let chart = self.chart_3d(mode, metric)?;
                    warn_if_empty(&chart);
                    charts.push(chart);
                }
            }
            if self.charts.histogram {
                let histograms = self.chart_latency_histogram(mode)?;
                if histograms.is_empty() {
                    tracing::warn!(mode = %mode, "no runs available for latency histograms");
                }
                charts.extend(histograms);
            }
        }
        Ok(charts)
    }

    fn prefixed(&self, rest: &str) -> String {
        match &self.labels.title {
            Some(title) => format!("{} | {}", title, rest),
            None => rest.to_string(),
        }
    }
}

fn warn_if_empty(chart: &Chart) {
    let empty = match &chart.data {
        ChartData::IopsLatency { series, .. } => series.is_empty(),
        ChartData::Matrix { matrix, .. } => matrix.is_empty(),
        ChartData::Histogram { series } => series.x_series.is_empty(),
    };
    if empty {
        tracing::warn!(chart = %chart.name, "chart has no data points");
    }
}

/// "randread" → "Randread"
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::fixtures::{fio_document, FioRun};

    fn documents() -> Vec<RawDocument> {
        vec![
            fio_document("r1.json", &FioRun::read(1, 1, 1000.0, 500_000.0, 50_000.0)),
            fio_document("r4.json", &FioRun::read(4, 1, 4000.0, 800_000.0, 40_000.0)),
            fio_document("w1.json", &FioRun::write(1, 1, 900.0, 1_000_000.0, 100_000.0)),
            fio_document("w4.json", &FioRun::write(4, 1, 3000.0, 1_500_000.0, 150_000.0)),
        ]
    }

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.charts.latency_iops = true;
        settings.charts.histogram = true;
        settings.labels.title = Some("NVMe".to_string());
        settings.labels.source = Some("lab".to_string());
        settings
    }

    #[test]
    fn test_iops_latency_chart() {
        let pipeline = Pipeline::from_documents(&documents(), &settings()).unwrap();
        let chart = pipeline.chart_iops_latency("randread").unwrap();

        assert_eq!(chart.name, "randread_iodepth_1_iops_latency");
        assert_eq!(chart.labels.title, "NVMe | randread | numjobs: 1");
        assert_eq!(chart.labels.source.as_deref(), Some("lab"));
        match chart.data {
            ChartData::IopsLatency { series, latency_ms, .. } => {
                assert_eq!(series.x_series, vec![1, 4]);
                assert_eq!(series.y_series1, vec![1000, 4000]);
                assert_eq!(latency_ms, vec![0.5, 0.8]);
                assert_eq!(series.y_series3, vec![10, 5]);
            }
            other => panic!("unexpected chart data: {:?}", other),
        }
    }

    #[test]
    fn test_untitled_chart() {
        let mut settings = settings();
        settings.labels.title = None;
        let pipeline = Pipeline::from_documents(&documents(), &settings).unwrap();
        let chart = pipeline.chart_iops_latency("randwrite").unwrap();
        assert_eq!(chart.labels.title, "randwrite performance");
    }

    #[test]
    fn test_matrix_chart_labels() {
        let pipeline = Pipeline::from_documents(&documents(), &settings()).unwrap();
        let chart = pipeline.chart_3d("randwrite", Field::Lat).unwrap();
        assert_eq!(chart.name, "3d-lat-jobs-randwrite");
        assert_eq!(chart.labels.title, "NVMe | randwrite | lat");
        assert_eq!(chart.labels.z_label.as_deref(), Some("lat"));
        match chart.data {
            ChartData::Matrix { numjobs, iodepth, matrix } => {
                assert_eq!(numjobs, vec![1]);
                assert_eq!(iodepth, vec![1, 4]);
                assert_eq!(matrix.values, vec![vec![1.0, 1.5]]);
            }
            other => panic!("unexpected chart data: {:?}", other),
        }
    }

    #[test]
    fn test_histogram_charts() {
        let pipeline = Pipeline::from_documents(&documents(), &settings()).unwrap();
        let charts = pipeline.chart_latency_histogram("randread").unwrap();
        let names: Vec<_> = charts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["randread_1_histogram", "randread_4_histogram"]);
        assert_eq!(
            charts[0].labels.title,
            "NVMe | Randread latency histogram | IO depth 1"
        );
        assert_eq!(charts[0].labels.legend[0], "Latency in ms (39%)");
    }

    #[test]
    fn test_run_builds_every_configured_chart() {
        let pipeline = Pipeline::from_documents(&documents(), &settings()).unwrap();
        let charts = pipeline.run().unwrap();
        // per mode: 1 iops/latency + 2 matrices + 2 histograms
        assert_eq!(charts.len(), 10);
    }

    #[test]
    fn test_bad_document_aborts() {
        let mut docs = documents();
        docs[2].value["jobs"][0]["write"]
            .as_object_mut()
            .unwrap()
            .remove("lat_ns");
        let err = Pipeline::from_documents(&docs, &settings()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingField {
                document: "w1.json".to_string(),
                path: "jobs[0].write.lat_ns.mean".to_string(),
            }
        );
    }

    #[test]
    fn test_chart_serializes_with_kind_tag() {
        let pipeline = Pipeline::from_documents(&documents(), &settings()).unwrap();
        let chart = pipeline.chart_iops_latency("randread").unwrap();
        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(value["data"]["kind"], "iops_latency");
        assert_eq!(value["data"]["series"]["x_series"], serde_json::json!([1, 4]));
        assert!(value["labels"].get("z_label").is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("randread"), "Randread");
        assert_eq!(title_case(""), "");
    }
}
