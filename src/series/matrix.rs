//! 3D series: a metric over job count × queue depth
//!
//! Rows are job counts, columns are queue depths, each cell is the metric
//! for that combination. Every combination must be present in the input; a
//! missing one is reported rather than zero-filled.

use crate::dataset::Dataset;
use crate::error::{PipelineError, PipelineResult};
use crate::record::Field;
use serde::Serialize;
use serde_json::Value;

/// Which matrix to build
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRequest {
    pub mode: String,
    pub row_key: Field,
    pub col_key: Field,
    pub metric: Field,
    /// Largest row-axis value to include
    pub max_row: i64,
    /// Largest column-axis value to include
    pub max_col: i64,
}

impl MatrixRequest {
    /// Job count rows, queue depth columns
    pub fn new(mode: impl Into<String>, metric: Field, max_jobs: i64, max_depth: i64) -> Self {
        Self {
            mode: mode.into(),
            row_key: Field::Numjobs,
            col_key: Field::Iodepth,
            metric,
            max_row: max_jobs,
            max_col: max_depth,
        }
    }
}

/// Metric values laid out by row and column axis value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub row_key: Field,
    pub col_key: Field,
    pub metric: Field,
    /// Row axis values, ascending
    pub rows: Vec<i64>,
    /// Column axis values, ascending
    pub columns: Vec<i64>,
    /// `values[r][c]` is the metric at `rows[r]`, `columns[c]`; latency in ms
    pub values: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

/// Build a metric matrix for one workload
pub fn build_matrix(dataset: &Dataset, request: &MatrixRequest) -> PipelineResult<Matrix> {
    let subset = dataset.filter_mode(&request.mode);

    let rows: Vec<i64> = subset
        .unique_sorted(request.row_key)?
        .into_iter()
        .filter(|&r| r <= request.max_row)
        .collect();
    let columns: Vec<i64> = subset
        .unique_sorted(request.col_key)?
        .into_iter()
        .filter(|&c| c <= request.max_col)
        .collect();

    let divisor = if request.metric.is_latency() {
        super::NANOS_PER_MILLI
    } else {
        1.0
    };

    let keys = [request.row_key, request.col_key, request.metric];
    let mut values = Vec::with_capacity(rows.len());
    for &row_value in &rows {
        let projected = subset
            .select_normalized(request.row_key, &Value::from(row_value))
            .project(&keys)?;

        let mut row = Vec::with_capacity(columns.len());
        for &col_value in &columns {
            if let Some(record) = projected.first_with(request.col_key, col_value)? {
                row.push(record.number(request.metric)? / divisor);
            }
        }

        // Duplicate runs never stand in for a missing column
        if row.len() != columns.len() {
            return Err(PipelineError::IncompleteMatrix {
                row_key: request.row_key.to_string(),
                col_key: request.col_key.to_string(),
                row_value,
                expected: columns.len(),
                actual: row.len(),
            });
        }
        values.push(row);
    }

    tracing::debug!(
        mode = %request.mode,
        metric = %request.metric,
        rows = rows.len(),
        columns = columns.len(),
        "built metric matrix"
    );

    Ok(Matrix {
        row_key: request.row_key,
        col_key: request.col_key,
        metric: request.metric,
        rows,
        columns,
        values,
    })
}
