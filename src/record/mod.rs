//! Raw fio documents and their flattened per-run records
//!
//! A fio JSON report nests everything the charts need several levels deep,
//! and where throughput and latency live depends on the run's direction.
//! This module turns each report into a [`FlatRecord`]: one flat mapping of
//! [`Field`] to value per run.
//!
//! # Pipeline position
//!
//! ```text
//! RawDocument ──flatten──▶ FlatRecord ──▶ dataset::Dataset ──▶ series builders
//!      ▲                      ▲
//!      └── path::FieldPathTable (mode-aware)
//! ```

pub mod flatten;
pub mod path;
pub mod value;

pub use flatten::{flatten, flatten_all};
pub use path::{FieldPath, FieldPathTable, PathSegment};

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of leading characters of `rw` that qualify the workload (e.g. "rand")
pub const RW_QUALIFIER_LEN: usize = 4;

/// Logical field names of a flattened record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Iodepth,
    Numjobs,
    Rw,
    Iops,
    /// Mean completion latency in nanoseconds
    Lat,
    /// Completion latency standard deviation in nanoseconds
    LatStddev,
    LatencyMs,
    LatencyUs,
    LatencyNs,
}

impl Field {
    /// Every field a flattened record carries
    pub const ALL: [Field; 9] = [
        Field::Iodepth,
        Field::Numjobs,
        Field::Rw,
        Field::Iops,
        Field::Lat,
        Field::LatStddev,
        Field::LatencyMs,
        Field::LatencyUs,
        Field::LatencyNs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Iodepth => "iodepth",
            Field::Numjobs => "numjobs",
            Field::Rw => "rw",
            Field::Iops => "iops",
            Field::Lat => "lat",
            Field::LatStddev => "lat_stddev",
            Field::LatencyMs => "latency_ms",
            Field::LatencyUs => "latency_us",
            Field::LatencyNs => "latency_ns",
        }
    }

    /// Latency metrics are stored in nanoseconds
    pub fn is_latency(&self) -> bool {
        matches!(self, Field::Lat | Field::LatStddev)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown field: {}", s))
    }
}

/// One parsed fio report for a single run
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Identifier used in diagnostics (usually the file name)
    pub id: String,
    pub value: Value,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self { id: id.into(), value }
    }
}

/// Direction key selecting the result section ("read", "write", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunMode(String);

impl RunMode {
    /// Derive the direction from a workload label by dropping its qualifier
    ///
    /// `randread` yields `read`. Labels of fewer than five characters carry
    /// no direction and are rejected.
    pub fn from_rw(document: &str, rw: &str) -> PipelineResult<Self> {
        if rw.chars().count() <= RW_QUALIFIER_LEN {
            return Err(PipelineError::InvalidRunMode {
                document: document.to_string(),
                rw: rw.to_string(),
            });
        }
        Ok(Self(rw.chars().skip(RW_QUALIFIER_LEN).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat per-run view used by every series builder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    /// Id of the document this record came from
    pub source: String,
    /// Direction derived from `rw`
    pub mode: String,
    pub fields: BTreeMap<Field, Value>,
}

impl FlatRecord {
    pub fn new(source: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            mode: mode.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for assembling records by hand
    pub fn with(mut self, field: Field, value: Value) -> Self {
        self.fields.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: Value) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    /// Get a field, failing with the record's source when it is absent
    pub fn require(&self, field: Field) -> PipelineResult<&Value> {
        self.fields.get(&field).ok_or_else(|| PipelineError::MissingField {
            document: self.source.clone(),
            path: field.as_str().to_string(),
        })
    }

    /// Field coerced to an integer
    pub fn int(&self, field: Field) -> PipelineResult<i64> {
        let v = self.require(field)?;
        value::coerce_int(v).ok_or_else(|| self.coercion_error(field, v, "integer-like"))
    }

    /// Field coerced to a float
    pub fn number(&self, field: Field) -> PipelineResult<f64> {
        let v = self.require(field)?;
        value::coerce_f64(v).ok_or_else(|| self.coercion_error(field, v, "numeric"))
    }

    /// Histogram field as a bucket-label → percentage mapping
    pub fn buckets(&self, field: Field) -> PipelineResult<&Map<String, Value>> {
        let v = self.require(field)?;
        v.as_object()
            .ok_or_else(|| self.coercion_error(field, v, "a bucket mapping"))
    }

    pub(crate) fn coercion_error(
        &self,
        field: Field,
        value: &Value,
        expected: &'static str,
    ) -> PipelineError {
        PipelineError::TypeCoercion {
            document: self.source.clone(),
            field: field.as_str().to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
