use crate::security::SanitizeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No .txt files found in {0}")]
    NoInputFiles(PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to encode manifest record: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Rejected path: {0}")]
    Path(#[from] SanitizeError),
}

impl BatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A single file that could not be processed; siblings are unaffected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

impl FileFailure {
    pub(crate) fn new(path: impl Into<PathBuf>, error: &anyhow::Error) -> Self {
        Self {
            path: path.into(),
            error: format!("{error:#}"),
        }
    }
}
