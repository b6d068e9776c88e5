use super::BatchError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Manifest file written next to split output
pub const MANIFEST_FILE: &str = "manifest.jsonl";

/// One line of the manifest: where a segment came from and where it went
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Source path relative to the input root
    pub source: String,
    pub source_sha256: String,
    /// Segment path relative to the output root
    pub file: String,
    pub index: usize,
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_char: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_char: Option<usize>,
    pub overlap_chars: usize,
    pub generator: String,
    pub created_at: String,
}

pub fn generator() -> String {
    format!("textsplit v{}", env!("CARGO_PKG_VERSION"))
}

/// Write records as JSON lines, replacing any existing manifest
pub fn write_manifest(path: &Path, records: &[ManifestRecord]) -> Result<(), BatchError> {
    let mut out = Vec::new();
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.push(b'\n');
    }
    let mut file = fs::File::create(path).map_err(|e| BatchError::io(path, e))?;
    file.write_all(&out).map_err(|e| BatchError::io(path, e))?;
    Ok(())
}

pub fn read_manifest(path: &Path) -> Result<Vec<ManifestRecord>, BatchError> {
    let contents = fs::read_to_string(path).map_err(|e| BatchError::io(path, e))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(BatchError::from))
        .collect()
}
