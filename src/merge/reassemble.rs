use super::MergeError;
use super::group::{check_complete, declared_total, in_order};
use serde::{Deserialize, Serialize};

/// Reassembly behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Descend into subdirectories when merging a directory
    pub recursive: bool,
    /// Merge groups that are missing parts instead of skipping them
    pub allow_partial: bool,
    /// Insert `\n` between two pieces when the earlier one does not end with one
    pub ensure_newline_between: bool,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    pub fn allow_partial(mut self, enabled: bool) -> Self {
        self.allow_partial = enabled;
        self
    }

    pub fn ensure_newline_between(mut self, enabled: bool) -> Self {
        self.ensure_newline_between = enabled;
        self
    }
}

/// A segment already loaded into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub index: usize,
    pub total: usize,
    pub text: &'a str,
}

/// Validate a group of in-memory segments and concatenate them in index order
pub fn merge(base: &str, segments: &[Segment<'_>], options: &MergeOptions) -> Result<String, MergeError> {
    let total = declared_total(base, segments.iter().map(|s| s.total))?;
    check_complete(
        base,
        total,
        segments.iter().map(|s| s.index),
        options.allow_partial,
    )?;

    let ordered = in_order(segments, |s| s.index, total);
    if ordered.is_empty() {
        return Err(MergeError::Empty {
            base: base.to_string(),
        });
    }

    Ok(merge_texts(
        ordered.iter().map(|s| s.text),
        options.ensure_newline_between,
    ))
}

/// Concatenate pieces, optionally making sure consecutive pieces are
/// separated by at least one newline
pub fn merge_texts<I, S>(pieces: I, ensure_newline_between: bool) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    let mut prev_ends_with_newline = None;
    for piece in pieces {
        let piece = piece.as_ref();
        if ensure_newline_between && prev_ends_with_newline == Some(false) {
            out.push('\n');
        }
        out.push_str(piece);
        prev_ends_with_newline = Some(piece.ends_with('\n'));
    }
    out
}
