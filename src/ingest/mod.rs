//! Input collection
//!
//! Lists the `.json` reports in a directory and parses them into
//! [`RawDocument`]s, one per file. Files are read sequentially in file-name
//! order so that "first matching record" selection is reproducible across
//! filesystems.

use crate::record::RawDocument;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of fio JSON reports
pub const REPORT_EXTENSION: &str = "json";

/// List `.json` files directly inside `directory`, sorted by file name
pub fn list_json_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to list input directory: {}", directory.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", directory.display()))?
            .path();
        let is_report = path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(REPORT_EXTENSION);
        if is_report {
            files.push(path);
        } else {
            tracing::warn!(path = %path.display(), "skipping non-report entry");
        }
    }

    files.sort();
    Ok(files)
}

/// Read and parse a single report
pub fn load_document(path: &Path) -> Result<RawDocument> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse report as JSON: {}", path.display()))?;

    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(RawDocument::new(id, value))
}

/// Load every report in a directory, failing on the first unreadable one
pub fn load_directory(directory: &Path) -> Result<Vec<RawDocument>> {
    let files = list_json_files(directory)?;
    if files.is_empty() {
        tracing::warn!(directory = %directory.display(), "no .json reports found");
    }

    let documents = files
        .iter()
        .map(|path| load_document(path))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        directory = %directory.display(),
        documents = documents.len(),
        "loaded fio reports"
    );
    Ok(documents)
}
