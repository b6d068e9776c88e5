use super::BatchError;
use crate::naming::TEXT_EXTENSION;
use crate::security::PathSanitizer;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All `.txt` files under `dir`, sorted. Without `recursive` only the top
/// level is listed. A missing directory has no files.
pub fn collect_text_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(dir).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| BatchError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_text_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "collected text files");
    Ok(files)
}

pub(crate) fn has_text_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(TEXT_EXTENSION)
}

/// `path` relative to `root`, validated for mirroring under another root
pub(crate) fn relative_path(root: &Path, path: &Path) -> Result<PathBuf, BatchError> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    Ok(PathSanitizer::sanitize(relative)?)
}

/// Read a whole file as UTF-8
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).context(format!("Failed to read file: {}", path.display()))?;
    String::from_utf8(bytes).context(format!("File is not valid UTF-8: {}", path.display()))
}

/// Write a file, creating missing parent directories
pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents).context(format!("Failed to write file: {}", path.display()))
}

/// Hex-encoded SHA-256 of `contents`
pub fn hash_bytes(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    hex::encode(hasher.finalize())
}
