use super::BoundaryVocabulary;
use crate::text::{CharIndex, char_len};

/// Chars before a cut that are checked for an abbreviation
pub const ABBREVIATION_WINDOW: usize = 8;
/// Chars before a cut that are scanned for a compass bearing
pub const BEARING_LOOKBEHIND: usize = 30;
/// Chars after a cut that are scanned for a compass bearing
pub const BEARING_LOOKAHEAD: usize = 12;

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Structural heading (all caps, exhibit/parcel/lot/... label)
    Heading,
    /// Enumerated survey step (cue word, bearing, or distance)
    Step,
    /// Anything else
    Plain,
}

impl LineKind {
    /// Whether the start of a line of this kind is a preferred breakpoint
    pub fn is_boundary(self) -> bool {
        !matches!(self, LineKind::Plain)
    }
}

/// Stateless predicates over lines and cut offsets
#[derive(Debug, Clone, Copy)]
pub struct BoundaryClassifier<'v> {
    vocabulary: &'v BoundaryVocabulary,
}

impl<'v> BoundaryClassifier<'v> {
    pub fn new(vocabulary: &'v BoundaryVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn classify_line(&self, line: &str) -> LineKind {
        if self.is_heading(line) {
            LineKind::Heading
        } else if self.is_step(line) {
            LineKind::Step
        } else {
            LineKind::Plain
        }
    }

    /// All-caps short line, or a structural label
    pub fn is_heading(&self, line: &str) -> bool {
        let text = line.trim();
        if text.is_empty() {
            return false;
        }
        if is_all_uppercase(text) && char_len(text) <= self.vocabulary.max_heading_chars() {
            return true;
        }
        self.vocabulary
            .heading_patterns()
            .iter()
            .any(|pattern| pattern.is_match(text))
    }

    /// Line opening with a cue word, or carrying a bearing or a distance
    pub fn is_step(&self, line: &str) -> bool {
        let text = line.trim();
        if text.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        if self
            .vocabulary
            .step_cues()
            .iter()
            .any(|cue| lowered.starts_with(cue.as_str()))
        {
            return true;
        }
        self.vocabulary.bearing().is_match(text) || self.vocabulary.distance().is_match(text)
    }

    /// Whether cutting at `offset` (in chars) would corrupt an abbreviation or
    /// a bearing. Only offsets directly after `;`, `.` or `:` can be unsafe.
    pub fn is_unsafe_cut(&self, text: &str, offset: usize) -> bool {
        self.is_unsafe_cut_at(&CharIndex::new(text), offset)
    }

    pub(crate) fn is_unsafe_cut_at(&self, text: &CharIndex<'_>, offset: usize) -> bool {
        if offset == 0 || offset > text.len() {
            return false;
        }
        if !matches!(text.char_at(offset - 1), Some(';' | '.' | ':')) {
            return false;
        }
        self.follows_abbreviation(text, offset) || self.near_bearing(text, offset)
    }

    fn follows_abbreviation(&self, text: &CharIndex<'_>, offset: usize) -> bool {
        self.vocabulary.abbreviations().iter().any(|abbr| {
            let width = char_len(abbr);
            if width > ABBREVIATION_WINDOW || width > offset {
                return false;
            }
            let start = offset - width;
            if text.slice(start, offset).to_lowercase() != *abbr {
                return false;
            }
            // The abbreviation must not be the tail of a word; a number may precede it
            match start.checked_sub(1).and_then(|i| text.char_at(i)) {
                Some(prev) => !prev.is_alphabetic(),
                None => true,
            }
        })
    }

    fn near_bearing(&self, text: &CharIndex<'_>, offset: usize) -> bool {
        let offset = offset as isize;
        let window = text.window(
            offset - BEARING_LOOKBEHIND as isize,
            offset + BEARING_LOOKAHEAD as isize,
        );
        self.vocabulary.bearing().is_match(window)
    }
}

/// At least one cased char and no lower-case ones
fn is_all_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
