use super::breakpoints::{BreakpointSource, LegalBreakpoints, ParagraphBreakpoints};
use super::minmax::split_minmax;
use super::units::chunk_units;
use super::{ChunkConfig, Strategy};
use crate::boundary::{BoundaryClassifier, BoundaryVocabulary};
use crate::text::CharIndex;
use serde::{Deserialize, Serialize};

/// Char range of a segment within its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Single entry point for every chunking strategy
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
    vocabulary: BoundaryVocabulary,
}

impl Chunker {
    /// Chunker with the built-in legal vocabulary
    pub fn new(config: ChunkConfig) -> Self {
        Self::with_vocabulary(config, BoundaryVocabulary::legal())
    }

    pub fn with_vocabulary(config: ChunkConfig, vocabulary: BoundaryVocabulary) -> Self {
        Self { config, vocabulary }
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &BoundaryVocabulary {
        &self.vocabulary
    }

    pub fn classifier(&self) -> BoundaryClassifier<'_> {
        BoundaryClassifier::new(&self.vocabulary)
    }

    /// Breakpoint source selected by `domain_aware`
    pub fn source(&self) -> Box<dyn BreakpointSource + '_> {
        if self.config.domain_aware {
            Box::new(LegalBreakpoints::new(&self.vocabulary))
        } else {
            Box::new(ParagraphBreakpoints)
        }
    }

    /// Chunk text with the configured strategy
    pub fn chunk(&self, text: &str) -> Vec<String> {
        match self.config.strategy {
            Strategy::Breakpoints => {
                let idx = CharIndex::new(text);
                self.spans_in(&idx)
                    .into_iter()
                    .map(|span| idx.slice(span.start, span.end).to_string())
                    .collect()
            }
            Strategy::Units => chunk_units(text, &self.config.normalized(), &self.classifier()),
            Strategy::Window => split_minmax(text, self.config.min_chars, self.config.max_chars),
        }
    }

    /// Segment spans from the breakpoint splitter, whatever the configured strategy
    pub fn spans(&self, text: &str) -> Vec<Span> {
        self.spans_in(&CharIndex::new(text))
    }

    fn spans_in(&self, idx: &CharIndex<'_>) -> Vec<Span> {
        let breakpoints = self.source().breakpoints(idx);
        split_at_breakpoints(idx.len(), &breakpoints, &self.config.normalized())
    }
}

/// Boundary-aware chunking with the legal vocabulary
pub fn chunk_text(
    text: &str,
    min_chars: usize,
    target_chars: usize,
    max_chars: usize,
    overlap_chars: usize,
) -> Vec<String> {
    let config = ChunkConfig::default()
        .min_chars(min_chars)
        .target_chars(target_chars)
        .max_chars(max_chars)
        .overlap_chars(overlap_chars)
        .strategy(Strategy::Breakpoints);
    Chunker::new(config).chunk(text)
}

/// Greedy segment selection over a sorted breakpoint set.
///
/// `config` must already be normalized. Every span is at most `max_chars`
/// long and consecutive spans overlap by at most `overlap_chars`.
pub fn split_at_breakpoints(len: usize, breakpoints: &[usize], config: &ChunkConfig) -> Vec<Span> {
    let mut spans = Vec::new();
    if len == 0 {
        return spans;
    }

    let mut cursor = 0;
    loop {
        let mut end = next_boundary(breakpoints, cursor, len, config);
        if end <= cursor {
            end = (cursor + config.max_chars).min(len);
        }
        spans.push(Span { start: cursor, end });
        if end >= len {
            break;
        }

        // Step back for overlap, but never to or behind the current cursor
        let next = end.saturating_sub(config.overlap_chars);
        cursor = if next > cursor { next } else { end };
    }

    tracing::trace!(len, segments = spans.len(), "split at breakpoints");
    spans
}

/// Pick the cut after `cursor`:
/// 1. the largest breakpoint in `[cursor + min, cursor + target]`
/// 2. else the smallest breakpoint in `(cursor + target, cursor + max]`
/// 3. else a hard cut at `cursor + max`
///
/// All bounds are clamped to the text length.
pub fn next_boundary(breakpoints: &[usize], cursor: usize, len: usize, config: &ChunkConfig) -> usize {
    let lo = cursor + config.min_chars;
    let target = (cursor + config.target_chars).min(len);
    let hi = (cursor + config.max_chars).min(len);

    let upto = breakpoints.partition_point(|&b| b <= target);
    if let Some(&b) = upto.checked_sub(1).and_then(|i| breakpoints.get(i)) {
        if b >= lo {
            return b;
        }
    }
    if let Some(&b) = breakpoints.get(upto) {
        if b <= hi {
            return b;
        }
    }
    hi
}

/// Fixed-size windows of `max_chars` chars stepping back `overlap_chars` each time
pub fn sliding_window(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<Span> {
    let len = text.chars().count();
    let max_chars = max_chars.max(1);
    let mut spans = Vec::new();
    let mut start = 0;

    while start < len {
        let end = (start + max_chars).min(len);
        spans.push(Span { start, end });
        if end == len {
            break;
        }
        let next = end.saturating_sub(overlap_chars);
        start = if next > start { next } else { end };
    }

    spans
}
