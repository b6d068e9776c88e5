use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("Empty path")]
    Empty,

    #[error("Absolute path not allowed: {0}")]
    Absolute(String),

    #[error("Parent directory traversal not allowed: {0}")]
    ParentTraversal(String),

    #[error("Invalid UTF-8 in path: {0}")]
    InvalidUtf8(String),

    #[error("Hidden files not allowed: {0}")]
    Hidden(String),

    #[error("No valid components: {0}")]
    NoComponents(String),
}

pub struct PathSanitizer;

impl PathSanitizer {
    /// Validate a path relative to an input root before it is mirrored
    /// under an output root. Rejects:
    /// - Directory traversal (../)
    /// - Absolute paths (/etc/passwd)
    ///
    /// Hidden files (starting with .) are allowed.
    /// Returns the normalized relative path or an error.
    pub fn sanitize(raw_path: &Path) -> Result<PathBuf, SanitizeError> {
        Self::sanitize_with_options(raw_path, true)
    }

    /// Sanitize with custom options
    pub fn sanitize_with_options(
        raw_path: &Path,
        allow_hidden: bool,
    ) -> Result<PathBuf, SanitizeError> {
        if raw_path.as_os_str().is_empty() {
            return Err(SanitizeError::Empty);
        }

        let shown = || raw_path.display().to_string();
        let mut normalized = PathBuf::new();

        for component in raw_path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(SanitizeError::Absolute(shown()));
                }
                Component::ParentDir => {
                    return Err(SanitizeError::ParentTraversal(shown()));
                }
                Component::CurDir => continue,
                Component::Normal(part) => {
                    let part_str = part
                        .to_str()
                        .ok_or_else(|| SanitizeError::InvalidUtf8(format!("{:?}", part)))?;

                    if !allow_hidden && part_str.starts_with('.') {
                        return Err(SanitizeError::Hidden(shown()));
                    }

                    normalized.push(part_str);
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(SanitizeError::NoComponents(shown()));
        }

        Ok(normalized)
    }

    /// Join a sanitized relative path onto `root`
    pub fn resolve(root: &Path, relative: &Path) -> Result<PathBuf, SanitizeError> {
        Ok(root.join(Self::sanitize(relative)?))
    }
}
