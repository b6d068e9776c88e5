use crate::boundary::{BoundaryClassifier, BoundaryVocabulary};
use crate::text::CharIndex;

/// Produces the offsets at which a text may be cut
pub trait BreakpointSource: Send + Sync {
    /// Candidate cut offsets in chars.
    ///
    /// # Returns
    /// Sorted, deduplicated offsets that always include `0` and `text.len()`
    fn breakpoints(&self, text: &CharIndex<'_>) -> Vec<usize>;
}

/// Generic source: paragraph ends and every line start
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphBreakpoints;

impl BreakpointSource for ParagraphBreakpoints {
    fn breakpoints(&self, text: &CharIndex<'_>) -> Vec<usize> {
        let n = text.len();
        let mut points = vec![0, n];
        points.extend(paragraph_ends(text.as_str()));
        points.extend(
            line_starts(text.as_str())
                .map(|(start, _)| start)
                .filter(|&start| start != 0 && start != n),
        );
        finalize(points)
    }
}

/// Domain-aware source: paragraph ends, heading and step line starts, and
/// `; . :` offsets that do not fall inside an abbreviation or bearing
#[derive(Debug, Clone, Copy)]
pub struct LegalBreakpoints<'v> {
    classifier: BoundaryClassifier<'v>,
}

impl<'v> LegalBreakpoints<'v> {
    pub fn new(vocabulary: &'v BoundaryVocabulary) -> Self {
        Self {
            classifier: BoundaryClassifier::new(vocabulary),
        }
    }
}

impl BreakpointSource for LegalBreakpoints<'_> {
    fn breakpoints(&self, text: &CharIndex<'_>) -> Vec<usize> {
        let n = text.len();
        let mut points = vec![0, n];

        points.extend(paragraph_ends(text.as_str()));

        for (start, line) in line_starts(text.as_str()) {
            if start == 0 || start == n {
                continue;
            }
            if self.classifier.classify_line(line).is_boundary() {
                points.push(start);
            }
        }

        for (i, c) in text.as_str().chars().enumerate() {
            if matches!(c, ';' | '.' | ':') && !self.classifier.is_unsafe_cut_at(text, i + 1) {
                points.push(i + 1);
            }
        }

        finalize(points)
    }
}

/// Char offset just past every run of two or more newlines
pub(crate) fn paragraph_ends(text: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut run = 0;
    let mut count = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
        } else {
            if run >= 2 {
                ends.push(count);
            }
            run = 0;
        }
        count += 1;
    }
    if run >= 2 {
        ends.push(count);
    }
    ends
}

/// Each line with its starting char offset, without the trailing newline
pub(crate) fn line_starts(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.chars().count();
        (start, line.strip_suffix('\n').unwrap_or(line))
    })
}

fn finalize(mut points: Vec<usize>) -> Vec<usize> {
    points.sort_unstable();
    points.dedup();
    points
}
