//! Segment file naming.
//!
//! A source `<base>.txt` split into `n > 1` segments produces
//! `<base>_split_<i>_of_<n>.txt` for `i` in `1..=n`. A source that yields a
//! single segment keeps its name.

use regex::Regex;
use std::sync::OnceLock;

/// File extension of every input and output text file
pub const TEXT_EXTENSION: &str = "txt";

const SPLIT_NAME_PATTERN: &str = r"^(?P<base>.+)_split_(?P<idx>\d+)_of_(?P<total>\d+)\.txt$";

/// Parsed form of a segment file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitName {
    pub base: String,
    /// 1-based
    pub index: usize,
    pub total: usize,
}

impl SplitName {
    pub fn file_name(&self) -> String {
        split_file_name(&self.base, self.index, self.total)
    }
}

/// Name of segment `index` (1-based) out of `total`
pub fn split_file_name(base: &str, index: usize, total: usize) -> String {
    format!("{base}_split_{index}_of_{total}.{TEXT_EXTENSION}")
}

/// Output file names for a source split into `total` segments
pub fn output_file_names(base: &str, total: usize) -> Vec<String> {
    match total {
        0 | 1 => vec![format!("{base}.{TEXT_EXTENSION}")],
        _ => (1..=total)
            .map(|index| split_file_name(base, index, total))
            .collect(),
    }
}

/// Parse a segment file name. Returns `None` for anything that does not
/// match the naming scheme, including out-of-range numbers.
pub fn parse_split_name(file_name: &str) -> Option<SplitName> {
    let caps = split_name_regex().captures(file_name)?;
    Some(SplitName {
        base: caps["base"].to_string(),
        index: caps["idx"].parse().ok()?,
        total: caps["total"].parse().ok()?,
    })
}

fn split_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SPLIT_NAME_PATTERN).expect("split name pattern is valid"))
}
