//! Unit-based chunking: cut text into sections, sections into paragraphs or
//! legal sentences, then pack those units into chunks.

use super::ChunkConfig;
use crate::boundary::BoundaryClassifier;
use crate::text::{CharIndex, char_len, tail_chars};

const UNIT_SEP: &str = "\n\n";

/// Chunk text by packing logical units. `config` must already be normalized.
pub fn chunk_units(text: &str, config: &ChunkConfig, classifier: &BoundaryClassifier<'_>) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let sections = if config.by_section {
        split_into_sections(text, classifier)
    } else {
        vec![text.to_string()]
    };

    let units: Vec<String> = sections
        .iter()
        .flat_map(|section| split_section_into_units(section, classifier))
        .collect();

    tracing::trace!(sections = sections.len(), units = units.len(), "built chunk units");

    assemble_chunks(
        &units,
        config.min_chars,
        config.target_chars,
        config.max_chars,
        config.overlap_chars,
    )
}

/// Split text into sections, each heading starting a new one.
///
/// A heading is glued to the section that follows it. Runs of three or more
/// newlines inside a section collapse to a single blank line.
pub fn split_into_sections(text: &str, classifier: &BoundaryClassifier<'_>) -> Vec<String> {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if classifier.is_heading(line) {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            groups.push(vec![line]);
            continue;
        }
        if line.trim().is_empty() {
            current.push("");
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    let joined: Vec<String> = groups
        .iter()
        .map(|group| match group.as_slice() {
            [line] if classifier.is_heading(line) => line.trim().to_string(),
            lines => collapse_blank_lines(&lines.join("\n"))
                .trim_matches('\n')
                .to_string(),
        })
        .collect();

    let mut merged = Vec::with_capacity(joined.len());
    let mut i = 0;
    while i < joined.len() {
        if classifier.is_heading(&joined[i]) && i + 1 < joined.len() {
            merged.push(format!("{}{UNIT_SEP}{}", joined[i], joined[i + 1]));
            i += 2;
        } else {
            merged.push(joined[i].clone());
            i += 1;
        }
    }

    merged.retain(|section| !section.trim().is_empty());
    merged
}

/// Split a section into paragraphs, further splitting step-like paragraphs
/// (and any containing `;`) into legal sentences
pub fn split_section_into_units(section: &str, classifier: &BoundaryClassifier<'_>) -> Vec<String> {
    let mut units = Vec::new();
    for para in section.split(UNIT_SEP).filter(|p| !p.trim().is_empty()) {
        if classifier.is_step(para) || para.contains(';') {
            units.extend(split_legal_sentences(para, classifier));
        } else {
            units.push(para.to_string());
        }
    }
    units
        .into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect()
}

/// Split on `;`, `.` and `:` except where the cut would be unsafe
pub fn split_legal_sentences(text: &str, classifier: &BoundaryClassifier<'_>) -> Vec<String> {
    let idx = CharIndex::new(text);
    let len = idx.len();
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < len {
        if matches!(chars[i], ';' | '.' | ':') && !classifier.is_unsafe_cut_at(&idx, i + 1) {
            spans.push((start, i + 1));
            let mut j = i + 1;
            while j < len && chars[j].is_whitespace() {
                j += 1;
            }
            start = j;
            i = j;
            continue;
        }
        i += 1;
    }
    if start < len {
        spans.push((start, len));
    }

    spans
        .into_iter()
        .map(|(a, b)| idx.slice(a, b).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pack units into chunks aiming for `target_chars`.
///
/// A buffer below `min_chars` keeps absorbing units past the target. Overlap
/// is retrofitted afterwards by prefixing each chunk with the tail of the
/// previous one, trimmed back to a paragraph or sentence boundary. Chunks
/// that still exceed `max_chars` are hard-cut, backing up to a space when one
/// is close enough.
pub fn assemble_chunks(
    units: &[String],
    min_chars: usize,
    target_chars: usize,
    max_chars: usize,
    overlap_chars: usize,
) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut buf_len = 0;

    let flush = |buf: &mut String, buf_len: &mut usize, chunks: &mut Vec<String>| {
        let chunk = buf.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        buf.clear();
        *buf_len = 0;
    };

    for unit in units {
        let unit_len = char_len(unit);
        let sep_len = if buf.is_empty() { 0 } else { UNIT_SEP.len() };
        let candidate = buf_len + sep_len + unit_len;

        if candidate <= target_chars {
            push_unit(&mut buf, unit);
            buf_len = candidate;
            continue;
        }

        if buf_len < min_chars {
            // Too small to stand alone: overflow the target, which always
            // lands at or above min since target >= min
            push_unit(&mut buf, unit);
            flush(&mut buf, &mut buf_len, &mut chunks);
            continue;
        }

        flush(&mut buf, &mut buf_len, &mut chunks);
        push_unit(&mut buf, unit);
        buf_len = unit_len;
    }
    flush(&mut buf, &mut buf_len, &mut chunks);

    if overlap_chars > 0 && chunks.len() > 1 {
        chunks = add_overlap(chunks, overlap_chars);
    }

    chunks
        .into_iter()
        .flat_map(|chunk| {
            if char_len(&chunk) <= max_chars {
                vec![chunk]
            } else {
                cut_at_spaces(&chunk, min_chars, max_chars)
            }
        })
        .collect()
}

/// Collapse runs of three or more newlines into a single blank line
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}

fn push_unit(buf: &mut String, unit: &str) {
    if !buf.is_empty() {
        buf.push_str(UNIT_SEP);
    }
    buf.push_str(unit);
}

fn add_overlap(chunks: Vec<String>, overlap_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let merged = match out.last() {
            None => chunk,
            Some(prev) => {
                let mut tail = tail_chars(prev, overlap_chars);
                let boundary = [tail.rfind("\n\n"), tail.rfind(". "), tail.rfind("; ")]
                    .into_iter()
                    .flatten()
                    .max();
                if let Some(b) = boundary {
                    tail = &tail[b + 1..];
                }
                let tail = tail.trim();
                if tail.is_empty() {
                    chunk
                } else {
                    format!("{tail}{UNIT_SEP}{chunk}")
                }
            }
        };
        out.push(merged);
    }
    out
}

/// Hard-cut at `max_chars`, backing up to the last space in the piece when
/// that space is at least `min_chars / 2` chars in
fn cut_at_spaces(text: &str, min_chars: usize, max_chars: usize) -> Vec<String> {
    let idx = CharIndex::new(text);
    let len = idx.len();
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = (start + max_chars).min(len);
        if end < len {
            let piece = idx.slice(start, end);
            if let Some(ws) = piece.rfind(' ') {
                let ws_chars = char_len(&piece[..ws]);
                if ws_chars > 0 && ws_chars >= min_chars / 2 {
                    end = start + ws_chars;
                }
            }
        }
        pieces.push(idx.slice(start, end).to_string());
        start = end;
    }

    pieces
}
