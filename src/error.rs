//! Error types for the extraction and series pipeline
//!
//! Field-level and document-level failures carry the document id and the
//! offending path so a bad input file can be found without re-running.
//! Cross-record failures (ragged matrices, missing histogram buckets) abort
//! the builder call that hit them.

use thiserror::Error;

/// Errors raised while flattening documents or building series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A logical field has no registered path (programming defect)
    #[error("schema error: no path registered for field '{field}' in mode '{mode}'")]
    Schema { field: String, mode: String },

    /// A document lacks a segment of an expected path
    #[error("document '{document}': missing field at {path}")]
    MissingField { document: String, path: String },

    /// The `rw` job option is too short to carry a direction key
    #[error("document '{document}': rw value '{rw}' is too short to derive a run mode")]
    InvalidRunMode { document: String, rw: String },

    /// A value could not be converted to the type the field requires
    #[error("document '{document}': field '{field}' value {value} is not {expected}")]
    TypeCoercion {
        document: String,
        field: String,
        value: String,
        expected: &'static str,
    },

    /// A matrix row does not cover every column value
    #[error(
        "incomplete matrix: {row_key}={row_value} has {actual} values, expected {expected} \
         (missing {row_key}/{col_key} combinations in the input set)"
    )]
    IncompleteMatrix {
        row_key: String,
        col_key: String,
        row_value: i64,
        expected: usize,
        actual: usize,
    },

    /// A histogram order names a bucket absent from the bucket map
    #[error("histogram bucket '{label}' not present in bucket map")]
    MissingBucket { label: String },

    /// A histogram bucket label is not numeric, or its value is not a number
    #[error("histogram bucket '{label}': {detail}")]
    InvalidBucket { label: String, detail: String },

    /// Mean latency of zero makes the std-dev percentage undefined
    #[error("document '{document}': mean latency is zero, cannot express std-dev as percentage")]
    ZeroLatency { document: String },
}

/// Result type used by the core pipeline
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
