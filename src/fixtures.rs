//! Test fixtures: fio reports shaped like `fio --output-format=json`

use crate::record::RawDocument;
use serde_json::{json, Map, Value};

pub const NS_BUCKETS: [&str; 10] = ["2", "4", "10", "20", "50", "100", "250", "500", "750", "1000"];
pub const US_BUCKETS: [&str; 10] = NS_BUCKETS;
pub const MS_BUCKETS: [&str; 12] = [
    "2", "4", "10", "20", "50", "100", "250", "500", "750", "1000", "2000", ">=2000",
];

/// Parameters of one synthetic run
#[derive(Debug, Clone)]
pub struct FioRun {
    pub rw: String,
    pub iodepth: u32,
    pub numjobs: u32,
    pub iops: f64,
    pub lat_mean_ns: f64,
    pub lat_stddev_ns: f64,
}

impl FioRun {
    pub fn read(iodepth: u32, numjobs: u32, iops: f64, lat_mean_ns: f64, lat_stddev_ns: f64) -> Self {
        Self {
            rw: "randread".to_string(),
            iodepth,
            numjobs,
            iops,
            lat_mean_ns,
            lat_stddev_ns,
        }
    }

    pub fn write(iodepth: u32, numjobs: u32, iops: f64, lat_mean_ns: f64, lat_stddev_ns: f64) -> Self {
        Self {
            rw: "randwrite".to_string(),
            ..Self::read(iodepth, numjobs, iops, lat_mean_ns, lat_stddev_ns)
        }
    }
}

/// Bucket map with labels in a scrambled order, values derived from position
fn buckets(labels: &[&str], scale: f64) -> Value {
    let mut map = Map::new();
    for (i, label) in labels.iter().enumerate().rev() {
        map.insert(label.to_string(), json!((i as f64 + 1.0) * scale));
    }
    Value::Object(map)
}

fn section(run: &FioRun) -> Value {
    json!({
        "io_bytes": 0,
        "iops": run.iops,
        "lat_ns": {"min": 0, "max": 0, "mean": run.lat_mean_ns, "stddev": run.lat_stddev_ns},
    })
}

pub fn fio_document(id: &str, run: &FioRun) -> RawDocument {
    let empty = FioRun { iops: 0.0, lat_mean_ns: 0.0, lat_stddev_ns: 0.0, ..run.clone() };
    let (read, write) = if run.rw.ends_with("write") {
        (section(&empty), section(run))
    } else {
        (section(run), section(&empty))
    };

    RawDocument::new(
        id,
        json!({
            "fio version": "fio-3.36",
            "jobs": [{
                "jobname": "bench",
                "job options": {
                    "rw": run.rw,
                    "iodepth": run.iodepth.to_string(),
                    "numjobs": run.numjobs.to_string(),
                    "bs": "4k",
                },
                "read": read,
                "write": write,
                "latency_ns": buckets(&NS_BUCKETS, 0.01),
                "latency_us": buckets(&US_BUCKETS, 1.0),
                "latency_ms": buckets(&MS_BUCKETS, 0.5),
            }],
        }),
    )
}
