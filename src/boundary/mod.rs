//! Line and cut-point classification for boundary-aware splitting.
//!
//! Decides which line starts are preferred breakpoints (headings, survey
//! steps) and which punctuation offsets must not be cut (abbreviations,
//! compass bearings). The vocabulary is plain data so callers can swap it.

mod classifier;
mod error;
mod vocabulary;


pub use classifier::{
    ABBREVIATION_WINDOW, BEARING_LOOKAHEAD, BEARING_LOOKBEHIND, BoundaryClassifier, LineKind,
};
pub use error::VocabularyError;
pub use vocabulary::{
    BEARING_PATTERN, BoundaryVocabulary, DEFAULT_MAX_HEADING_CHARS, DISTANCE_PATTERN,
    LEGAL_ABBREVIATIONS, LEGAL_HEADING_PATTERNS, LEGAL_STEP_CUES, VocabularySpec,
};
