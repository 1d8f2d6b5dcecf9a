//! Record selection
//!
//! Filter, select and project operations over a collection of
//! [`FlatRecord`]s. Every operation returns a new [`Dataset`] and leaves its
//! input untouched; record order is always preserved.
//!
//! Two kinds of matching are offered:
//!
//! - **Exact** ([`Dataset::filter_exact`]): JSON equality, no coercion. Used
//!   to split runs by workload.
//! - **Normalized** ([`Dataset::select_normalized`]): both sides are turned
//!   into strings and passed through [`strip_leading_zero`] first, so `"08"`
//!   and `8` select the same records.
//!
//! # Example
//!
//! ```
//! use fioplot::dataset::Dataset;
//! use fioplot::record::{Field, FlatRecord};
//! use serde_json::json;
//!
//! let dataset = Dataset::new(vec![
//!     FlatRecord::new("a.json", "read").with(Field::Iodepth, json!("08")),
//!     FlatRecord::new("b.json", "read").with(Field::Iodepth, json!("16")),
//! ]);
//!
//! let selected = dataset.select_normalized(Field::Iodepth, &json!(8));
//! assert_eq!(selected.len(), 1);
//! assert_eq!(dataset.unique_sorted(Field::Iodepth).unwrap(), vec![8, 16]);
//! ```
//!
//! [`strip_leading_zero`]: crate::record::value::strip_leading_zero

use crate::error::PipelineResult;
use crate::record::value::{display_value, strip_leading_zero};
use crate::record::{Field, FlatRecord};
use serde_json::Value;
use std::collections::BTreeSet;

/// Ordered collection of flat records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<FlatRecord>,
}

impl Dataset {
    pub fn new(records: Vec<FlatRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FlatRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatRecord> {
        self.records.iter()
    }

    /// Unique integer values of a field, ascending
    ///
    /// Fails on the first record whose value is not integer-like.
    pub fn unique_sorted(&self, key: Field) -> PipelineResult<Vec<i64>> {
        let mut values = BTreeSet::new();
        for record in &self.records {
            values.insert(record.int(key)?);
        }
        Ok(values.into_iter().collect())
    }

    /// Records whose field equals `value` exactly
    pub fn filter_exact(&self, key: Field, value: &Value) -> Dataset {
        self.retain(|record| record.get(key) == Some(value))
    }

    /// Records belonging to a workload
    ///
    /// `mode` may be a full workload label (`randread`), matched exactly
    /// against `rw`, or a bare direction (`read`), matched against the mode
    /// derived during flattening.
    pub fn filter_mode(&self, mode: &str) -> Dataset {
        let by_label = self.filter_exact(Field::Rw, &Value::String(mode.to_string()));
        if !by_label.is_empty() {
            return by_label;
        }
        self.retain(|record| record.mode == mode)
    }

    /// First record, in input order, whose integer field equals `value`
    pub fn first_with(&self, key: Field, value: i64) -> PipelineResult<Option<&FlatRecord>> {
        for record in &self.records {
            if record.int(key)? == value {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Records whose normalized field equals the normalized `value`
    pub fn select_normalized(&self, key: Field, value: &Value) -> Dataset {
        let target = normalize(value);
        self.retain(|record| record.get(key).map(normalize).as_deref() == Some(target.as_str()))
    }

    /// Copies of each record restricted to `keys`
    ///
    /// String values are normalized on the way through; numbers and bucket
    /// mappings are copied as-is. A record lacking one of `keys` fails.
    pub fn project(&self, keys: &[Field]) -> PipelineResult<Dataset> {
        let mut records = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let mut projected = FlatRecord::new(record.source.clone(), record.mode.clone());
            for &key in keys {
                let value = record.require(key)?;
                let value = match value {
                    Value::String(s) => Value::String(strip_leading_zero(s)),
                    other => other.clone(),
                };
                projected.insert(key, value);
            }
            records.push(projected);
        }
        Ok(Dataset::new(records))
    }

    fn retain(&self, keep: impl Fn(&FlatRecord) -> bool) -> Dataset {
        Dataset::new(self.records.iter().filter(|r| keep(r)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a FlatRecord;
    type IntoIter = std::slice::Iter<'a, FlatRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<FlatRecord>> for Dataset {
    fn from(records: Vec<FlatRecord>) -> Self {
        Self::new(records)
    }
}

/// String form of a value after the leading-zero rule
pub fn normalize(value: &Value) -> String {
    strip_leading_zero(&display_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use serde_json::json;

    fn record(source: &str, rw: &str, iodepth: Value, numjobs: Value) -> FlatRecord {
        FlatRecord::new(source, &rw[4..])
            .with(Field::Rw, json!(rw))
            .with(Field::Iodepth, iodepth)
            .with(Field::Numjobs, numjobs)
            .with(Field::Iops, json!(100.5))
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            record("a", "randread", json!("16"), json!("1")),
            record("b", "randread", json!("4"), json!("2")),
            record("c", "randwrite", json!("1"), json!("1")),
            record("d", "randread", json!("4"), json!("08")),
            record("e", "randwrite", json!(16), json!(8)),
        ])
    }

    #[test]
    fn test_unique_sorted_dedups_and_orders() {
        assert_eq!(sample().unique_sorted(Field::Iodepth).unwrap(), vec![1, 4, 16]);
        assert_eq!(sample().unique_sorted(Field::Numjobs).unwrap(), vec![1, 2, 8]);
    }

    #[test]
    fn test_unique_sorted_is_order_independent() {
        let mut records = sample().into_records();
        records.reverse();
        let reversed = Dataset::new(records);
        let values = reversed.unique_sorted(Field::Iodepth).unwrap();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(values, sample().unique_sorted(Field::Iodepth).unwrap());
    }

    #[test]
    fn test_unique_sorted_coercion_failure() {
        let err = sample().unique_sorted(Field::Rw).unwrap_err();
        assert!(matches!(err, PipelineError::TypeCoercion { ref document, .. } if document == "a"));
    }

    #[test]
    fn test_unique_sorted_empty() {
        assert!(Dataset::default().unique_sorted(Field::Iodepth).unwrap().is_empty());
    }

    #[test]
    fn test_filter_exact_no_coercion() {
        let reads = sample().filter_exact(Field::Rw, &json!("randread"));
        assert_eq!(reads.len(), 3);

        // "16" and 16 are different JSON values
        assert_eq!(sample().filter_exact(Field::Iodepth, &json!(16)).len(), 1);
        assert_eq!(sample().filter_exact(Field::Iodepth, &json!("16")).len(), 1);
    }

    #[test]
    fn test_filter_mode_accepts_label_or_direction() {
        let by_label = sample().filter_mode("randwrite");
        let by_direction = sample().filter_mode("write");
        assert_eq!(by_label, by_direction);
        assert_eq!(by_label.len(), 2);
        assert!(sample().filter_mode("trim").is_empty());
    }

    #[test]
    fn test_first_with_takes_earliest_match() {
        let dataset = sample();
        let first = dataset.first_with(Field::Iodepth, 4).unwrap().unwrap();
        assert_eq!(first.source, "b");
        assert!(dataset.first_with(Field::Iodepth, 64).unwrap().is_none());
    }

    #[test]
    fn test_select_normalized_symmetric() {
        let a = sample().select_normalized(Field::Numjobs, &json!("08"));
        let b = sample().select_normalized(Field::Numjobs, &json!("8"));
        let c = sample().select_normalized(Field::Numjobs, &json!(8));
        assert_eq!(a, b);
        assert_eq!(b, c);
        let sources: Vec<_> = a.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["d", "e"]);
    }

    #[test]
    fn test_select_normalized_truncation_quirk() {
        let dataset = Dataset::new(vec![record("x", "randread", json!("016"), json!("1"))]);
        assert_eq!(dataset.select_normalized(Field::Iodepth, &json!(1)).len(), 1);
        assert!(dataset.select_normalized(Field::Iodepth, &json!(16)).is_empty());
    }

    #[test]
    fn test_select_preserves_input_order() {
        let selected = sample().select_normalized(Field::Numjobs, &json!(1));
        let sources: Vec<_> = selected.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["a", "c"]);
    }

    #[test]
    fn test_project_restricts_and_normalizes() {
        let projected = sample()
            .project(&[Field::Numjobs, Field::Iops])
            .unwrap();
        assert_eq!(projected.len(), 5);

        let d = &projected.records()[3];
        assert_eq!(d.fields.len(), 2);
        assert_eq!(d.get(Field::Numjobs), Some(&json!("8")));
        assert_eq!(d.get(Field::Iops), Some(&json!(100.5)));
        assert_eq!(d.get(Field::Rw), None);

        let e = &projected.records()[4];
        assert_eq!(e.get(Field::Numjobs), Some(&json!(8)));
    }

    #[test]
    fn test_project_missing_key() {
        let err = sample().project(&[Field::Lat]).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField { .. }));
    }
}
