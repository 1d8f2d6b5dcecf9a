//! Document flattening
//!
//! Turns one [`RawDocument`] into one [`FlatRecord`]. Either every field
//! resolves or the document is rejected; partial records are never produced.

use super::{Field, FieldPath, FieldPathTable, FlatRecord, RawDocument, RunMode};
use crate::error::{PipelineError, PipelineResult};

/// Flatten a single document
pub fn flatten(document: &RawDocument) -> PipelineResult<FlatRecord> {
    let rw = read_rw(document)?;
    let mode = RunMode::from_rw(&document.id, rw)?;
    let table = FieldPathTable::for_mode(mode.as_str());

    let mut record = FlatRecord::new(document.id.clone(), mode.as_str());
    for field in Field::ALL {
        let path = table.resolve(field)?;
        let value = path
            .lookup(&document.value)
            .ok_or_else(|| missing(document, path))?;
        record.insert(field, value.clone());
    }

    tracing::debug!(
        document = %document.id,
        mode = %mode,
        "flattened document"
    );
    Ok(record)
}

/// Flatten a collection, stopping at the first document that fails
pub fn flatten_all(documents: &[RawDocument]) -> PipelineResult<Vec<FlatRecord>> {
    documents.iter().map(flatten).collect()
}

/// The `rw` option is read before the table exists since it picks the mode
fn read_rw(document: &RawDocument) -> PipelineResult<&str> {
    let path = FieldPath::job_options().key(Field::Rw.as_str());
    let value = path
        .lookup(&document.value)
        .ok_or_else(|| missing(document, &path))?;
    value.as_str().ok_or_else(|| PipelineError::TypeCoercion {
        document: document.id.clone(),
        field: Field::Rw.as_str().to_string(),
        value: value.to_string(),
        expected: "a string",
    })
}

fn missing(document: &RawDocument, path: &FieldPath) -> PipelineError {
    PipelineError::MissingField {
        document: document.id.clone(),
        path: path.to_string(),
    }
}
