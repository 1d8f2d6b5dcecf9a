//! Chart-ready series
//!
//! Builders that turn a [`Dataset`](crate::dataset::Dataset) into the
//! structures a renderer consumes:
//!
//! - [`chart`]: 2D IOPS/latency series over queue depth
//! - [`matrix`]: 3D metric matrices over job count × queue depth
//! - [`histogram`]: latency histograms with ordered buckets
//!
//! Each builder call returns a fresh value; nothing is accumulated between
//! calls.

pub mod chart;
pub mod histogram;
pub mod matrix;

pub use chart::{build, ChartSeries, SeriesRequest};
pub use histogram::{build_histograms, HistogramSeries, LatencyHistogramSorter, OVERFLOW_BUCKET};
pub use matrix::{build_matrix, Matrix, MatrixRequest};

use serde::Serialize;

pub(crate) const NANOS_PER_MICRO: f64 = 1_000.0;
pub(crate) const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Display unit for a latency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LatencyUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
}

impl LatencyUnit {
    /// Largest unit in which the value is still above 1
    pub fn auto(nanos: f64) -> Self {
        if nanos / NANOS_PER_MILLI > 1.0 {
            LatencyUnit::Milliseconds
        } else if nanos / NANOS_PER_MICRO > 1.0 {
            LatencyUnit::Microseconds
        } else {
            LatencyUnit::Nanoseconds
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LatencyUnit::Nanoseconds => "ns",
            LatencyUnit::Microseconds => "us",
            LatencyUnit::Milliseconds => "ms",
        }
    }

    /// Convert a nanosecond value into this unit
    pub fn from_nanos(&self, nanos: f64) -> f64 {
        match self {
            LatencyUnit::Nanoseconds => nanos,
            LatencyUnit::Microseconds => nanos / NANOS_PER_MICRO,
            LatencyUnit::Milliseconds => nanos / NANOS_PER_MILLI,
        }
    }
}
