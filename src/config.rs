use crate::boundary::{BoundaryVocabulary, VocabularySpec};
use crate::chunker::{ChunkConfig, Chunker};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File-based configuration.
///
/// ```json
/// {
///   "chunk": { "min_chars": 400, "max_chars": 1200, "strategy": "units" },
///   "vocabulary": { "step_cues": ["thence", "next"] }
/// }
/// ```
///
/// Every field is optional; missing values use the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chunk: ChunkConfig,
    pub vocabulary: Option<VocabularySpec>,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&contents)
            .context(format!("Invalid config file: {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Compiled vocabulary, falling back to the built-in legal one
    pub fn vocabulary(&self) -> Result<BoundaryVocabulary> {
        match &self.vocabulary {
            Some(spec) => Ok(BoundaryVocabulary::from_spec(spec)?),
            None => Ok(BoundaryVocabulary::legal()),
        }
    }

    pub fn chunker(&self) -> Result<Chunker> {
        Ok(Chunker::with_vocabulary(self.chunk.clone(), self.vocabulary()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::Strategy;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.chunk, ChunkConfig::default());
    }

    #[test]
    fn test_partial_chunk_section() {
        let config = AppConfig::from_json(
            r#"{ "chunk": { "min_chars": 400, "strategy": "window" } }"#,
        )
        .unwrap();
        assert_eq!(config.chunk.min_chars, 400);
        assert_eq!(config.chunk.max_chars, ChunkConfig::default().max_chars);
        assert_eq!(config.chunk.strategy, Strategy::Window);
    }

    #[test]
    fn test_custom_vocabulary() {
        let config = AppConfig::from_json(
            r#"{ "vocabulary": { "step_cues": ["Next"], "abbreviations": ["approx."] } }"#,
        )
        .unwrap();
        let chunker = config.chunker().unwrap();
        assert_eq!(chunker.vocabulary().step_cues(), ["next"]);
        assert!(chunker.classifier().is_step("NEXT along the wall"));
        assert!(chunker.classifier().is_unsafe_cut("about approx. ten", 13));
    }

    #[test]
    fn test_invalid_vocabulary_pattern() {
        let config = AppConfig::from_json(r#"{ "vocabulary": { "heading_patterns": ["("] } }"#)
            .unwrap();
        let err = config.vocabulary().unwrap_err();
        assert!(err.to_string().contains("Invalid heading pattern"));
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("textsplit.json");
        fs::write(&path, r#"{ "chunk": { "overlap_chars": 0 } }"#).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap().chunk.overlap_chars, 0);

        let missing = AppConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));

        fs::write(&path, "not json").unwrap();
        let invalid = AppConfig::from_file(&path).unwrap_err();
        assert!(invalid.to_string().contains("Invalid config file"));
    }
}
