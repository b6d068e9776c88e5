use super::VocabularyError;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structural labels that open a new section in legal and land-description text
pub const LEGAL_HEADING_PATTERNS: &[&str] = &[
    r"^\s*(EXHIBIT\s+[A-Z0-9]+)\s*$",
    r"^\s*(LEGAL\s+DESCRIPTION)\s*$",
    r"^\s*(DESCRIPTION)\s*$",
    r"^\s*(PARCEL\s+\d+|PARCEL\s+[A-Z])\b",
    r"^\s*(LOT\s+\d+[A-Z]?)\b",
    r"^\s*(TRACT\s+\w+)\b",
    r"^\s*(SECTION\s+\d+)\b",
    r"^\s*(TOWNSHIP\s+\w+|T\.?\s*\d+[NS]?)\b",
    r"^\s*(RANGE\s+\w+|R\.?\s*\d+[EW]?)\b",
];

/// Company, number, direction and unit abbreviations that end in a period
pub const LEGAL_ABBREVIATIONS: &[&str] = &[
    "co.", "inc.", "ltd.", "no.", "sec.", "t.", "r.", "nw.", "ne.", "sw.", "se.", "ft.", "in.",
    "deg.", "min.", "rd.", "ave.", "st.", "blvd.", "dr.", "hwy.",
];

/// Words that open an enumerated survey step
pub const LEGAL_STEP_CUES: &[&str] = &["thence", "then", "beginning", "commencing"];

/// Compass bearing such as `N 12°34'56" E`, tolerant of missing seconds and
/// of the prime/double-prime symbol variants
pub const BEARING_PATTERN: &str =
    r#"(?i)\b([NS])\s*\d{1,3}[°\s]\s*\d{1,2}(?:['′]\s*\d{1,2}(?:["″])?)?\s*([EW])\b"#;

/// Numeric distance followed by a length unit
pub const DISTANCE_PATTERN: &str = r"(?i)\b\d+(?:\.\d+)?\s*(feet|foot|ft|meters|meter|m)\b";

/// Longest trimmed line that still counts as an all-caps heading
pub const DEFAULT_MAX_HEADING_CHARS: usize = 80;

/// Serializable description of a vocabulary.
///
/// Any field left as `None` falls back to the built-in legal vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySpec {
    pub heading_patterns: Option<Vec<String>>,
    pub abbreviations: Option<Vec<String>>,
    pub step_cues: Option<Vec<String>>,
    pub bearing_pattern: Option<String>,
    pub distance_pattern: Option<String>,
    pub max_heading_chars: Option<usize>,
}

/// Lookup tables consulted by the boundary classifier
#[derive(Debug, Clone)]
pub struct BoundaryVocabulary {
    heading_patterns: Vec<Regex>,
    /// Lower-cased, each ending in its punctuation mark
    abbreviations: Vec<String>,
    /// Lower-cased
    step_cues: Vec<String>,
    bearing: Regex,
    distance: Regex,
    max_heading_chars: usize,
}

impl BoundaryVocabulary {
    /// Built-in vocabulary for legal documents and land descriptions
    pub fn legal() -> Self {
        Self::from_spec(&VocabularySpec::default())
            .expect("built-in vocabulary patterns are valid")
    }

    /// Compile a vocabulary description
    pub fn from_spec(spec: &VocabularySpec) -> Result<Self, VocabularyError> {
        let heading_patterns = match &spec.heading_patterns {
            Some(patterns) => patterns
                .iter()
                .map(|p| compile("heading", p))
                .collect::<Result<Vec<_>, _>>()?,
            None => LEGAL_HEADING_PATTERNS
                .iter()
                .map(|p| compile("heading", p))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let abbreviations = match &spec.abbreviations {
            Some(list) => normalize_words(list),
            None => LEGAL_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        };
        if abbreviations.iter().any(|a| a.is_empty()) {
            return Err(VocabularyError::EmptyAbbreviation);
        }

        let step_cues = match &spec.step_cues {
            Some(list) => normalize_words(list)
                .into_iter()
                .filter(|cue| !cue.is_empty())
                .collect(),
            None => LEGAL_STEP_CUES.iter().map(|s| s.to_string()).collect(),
        };

        let bearing = compile(
            "bearing",
            spec.bearing_pattern.as_deref().unwrap_or(BEARING_PATTERN),
        )?;
        let distance = compile(
            "distance",
            spec.distance_pattern.as_deref().unwrap_or(DISTANCE_PATTERN),
        )?;

        Ok(Self {
            heading_patterns,
            abbreviations,
            step_cues,
            bearing,
            distance,
            max_heading_chars: spec.max_heading_chars.unwrap_or(DEFAULT_MAX_HEADING_CHARS),
        })
    }

    /// Replace the abbreviation list
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations = abbreviations
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Replace the step cue words
    pub fn with_step_cues<I, S>(mut self, cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.step_cues = cues
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn heading_patterns(&self) -> &[Regex] {
        &self.heading_patterns
    }

    pub fn abbreviations(&self) -> &[String] {
        &self.abbreviations
    }

    pub fn step_cues(&self) -> &[String] {
        &self.step_cues
    }

    pub fn bearing(&self) -> &Regex {
        &self.bearing
    }

    pub fn distance(&self) -> &Regex {
        &self.distance
    }

    pub fn max_heading_chars(&self) -> usize {
        self.max_heading_chars
    }
}

impl Default for BoundaryVocabulary {
    fn default() -> Self {
        Self::legal()
    }
}

fn compile(kind: &'static str, pattern: &str) -> Result<Regex, VocabularyError> {
    Regex::new(pattern).map_err(|source| VocabularyError::InvalidPattern {
        kind,
        pattern: pattern.to_string(),
        source,
    })
}

fn normalize_words(list: &[String]) -> Vec<String> {
    list.iter().map(|s| s.trim().to_lowercase()).collect()
}
