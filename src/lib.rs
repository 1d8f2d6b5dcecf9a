//! fioplot - chart series from fio JSON benchmark reports
//!
//! fioplot reads a directory of fio `--output-format=json` reports (one per
//! benchmark run), flattens each into a record of the handful of values that
//! matter for plotting, and builds chart-ready series from them.
//!
//! # Architecture
//!
//! - **record**: declarative field paths, flattening of raw documents
//! - **dataset**: unique values, exact and normalized selection, projection
//! - **series**: IOPS/latency series, metric matrices, latency histograms
//! - **pipeline**: chart jobs with titles and labels
//! - **output**: JSON, CSV and text export

pub mod config;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod series;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use config::Settings;
pub use dataset::Dataset;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Chart, Pipeline};
pub use record::{Field, FlatRecord, RawDocument};

/// Result type used by the application layers
pub type Result<T> = anyhow::Result<T>;
