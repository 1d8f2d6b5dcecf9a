//! Field path resolution
//!
//! Maps each logical [`Field`] to where it lives inside a fio report. Job
//! options and histograms sit at fixed locations under `jobs[0]`; throughput
//! and latency sit under the result section named by the run's direction.
//!
//! ```text
//! jobs[0].job options.{iodepth,numjobs,rw}
//! jobs[0].<mode>.iops
//! jobs[0].<mode>.lat_ns.{mean,stddev}
//! jobs[0].{latency_ms,latency_us,latency_ns}
//! ```

use super::Field;
use crate::error::{PipelineError, PipelineResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One step into a JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Ordered sequence of keys/indices into a document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The single job every fio report of interest carries
    pub fn job_root() -> Self {
        Self::default().key("jobs").index(0)
    }

    /// The job options section
    pub fn job_options() -> Self {
        Self::job_root().key("job options")
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// Walk the path through a document
    ///
    /// Returns `None` as soon as a key is absent, an index is out of range, or
    /// a segment addresses a scalar.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(document, |node, segment| match segment {
                PathSegment::Key(k) => node.as_object()?.get(k),
                PathSegment::Index(i) => node.as_array()?.get(*i),
            })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{}", k)?,
                PathSegment::Key(k) => write!(f, ".{}", k)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Mode-aware mapping of logical field to document path
#[derive(Debug, Clone)]
pub struct FieldPathTable {
    mode: String,
    paths: BTreeMap<Field, FieldPath>,
}

impl FieldPathTable {
    /// Empty table; every lookup fails until paths are registered
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            paths: BTreeMap::new(),
        }
    }

    /// Full table for one direction key ("read", "write", ...)
    pub fn for_mode(mode: &str) -> Self {
        let options = FieldPath::job_options();
        let data = FieldPath::job_root().key(mode);
        let root = FieldPath::job_root();

        let mut table = Self::new(mode);
        table.register(Field::Iodepth, options.clone().key("iodepth"));
        table.register(Field::Numjobs, options.clone().key("numjobs"));
        table.register(Field::Rw, options.key("rw"));
        table.register(Field::Iops, data.clone().key("iops"));
        table.register(Field::Lat, data.clone().key("lat_ns").key("mean"));
        table.register(Field::LatStddev, data.key("lat_ns").key("stddev"));
        table.register(Field::LatencyMs, root.clone().key("latency_ms"));
        table.register(Field::LatencyUs, root.clone().key("latency_us"));
        table.register(Field::LatencyNs, root.key("latency_ns"));
        table
    }

    pub fn register(&mut self, field: Field, path: FieldPath) {
        self.paths.insert(field, path);
    }

    /// Path for a field, or a schema error if none is registered
    pub fn resolve(&self, field: Field) -> PipelineResult<&FieldPath> {
        self.paths.get(&field).ok_or_else(|| PipelineError::Schema {
            field: field.as_str().to_string(),
            mode: self.mode.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_independent_paths() {
        let read = FieldPathTable::for_mode("read");
        let write = FieldPathTable::for_mode("write");
        for field in [Field::Iodepth, Field::Numjobs, Field::Rw, Field::LatencyMs] {
            assert_eq!(read.resolve(field).unwrap(), write.resolve(field).unwrap());
        }
        assert_eq!(
            read.resolve(Field::Iodepth).unwrap().to_string(),
            "jobs[0].job options.iodepth"
        );
        assert_eq!(
            read.resolve(Field::LatencyUs).unwrap().to_string(),
            "jobs[0].latency_us"
        );
    }

    #[test]
    fn test_mode_dependent_paths() {
        let table = FieldPathTable::for_mode("write");
        assert_eq!(table.resolve(Field::Iops).unwrap().to_string(), "jobs[0].write.iops");
        assert_eq!(
            table.resolve(Field::Lat).unwrap().to_string(),
            "jobs[0].write.lat_ns.mean"
        );
        assert_eq!(
            table.resolve(Field::LatStddev).unwrap().to_string(),
            "jobs[0].write.lat_ns.stddev"
        );
    }

    #[test]
    fn test_unregistered_field_is_schema_error() {
        let table = FieldPathTable::new("read");
        let err = table.resolve(Field::Iops).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Schema {
                field: "iops".to_string(),
                mode: "read".to_string()
            }
        );
    }

    #[test]
    fn test_lookup_walks_objects_and_arrays() {
        let doc = json!({"jobs": [{"read": {"lat_ns": {"mean": 42.5}}}]});
        let path = FieldPath::job_root().key("read").key("lat_ns").key("mean");
        assert_eq!(path.lookup(&doc), Some(&json!(42.5)));
    }

    #[test]
    fn test_lookup_missing_segments() {
        let doc = json!({"jobs": []});
        assert_eq!(FieldPath::job_options().lookup(&doc), None);

        // Indexing into a scalar is a miss, not a panic
        let doc = json!({"jobs": 5});
        assert_eq!(FieldPath::job_root().lookup(&doc), None);
    }
}
