use super::MergeError;
use crate::naming::{TEXT_EXTENSION, parse_split_name};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a family of segments: the directory they live in (relative to
/// the merge root) and their shared base name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub parent: PathBuf,
    pub base: String,
}

impl GroupKey {
    /// Path of the reassembled file, relative to the merge root
    pub fn output_path(&self) -> PathBuf {
        self.parent.join(format!("{}.{TEXT_EXTENSION}", self.base))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parent.join(&self.base).display())
    }
}

/// One persisted segment file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPart {
    pub index: usize,
    pub total: usize,
    pub path: PathBuf,
}

/// All segment files sharing a `GroupKey`, sorted by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentGroup {
    pub key: GroupKey,
    pub parts: Vec<GroupPart>,
}

impl SegmentGroup {
    /// The total every member declares
    pub fn total(&self) -> Result<usize, MergeError> {
        declared_total(&self.key.base, self.parts.iter().map(|p| p.total))
    }

    /// Indices in `1..=total` with no file
    pub fn missing(&self) -> Result<Vec<usize>, MergeError> {
        let total = self.total()?;
        Ok(missing_indices(total, self.parts.iter().map(|p| p.index)))
    }

    /// Validate the group and return its parts in merge order.
    ///
    /// Parts whose index falls outside `1..=total` are ignored, and for a
    /// repeated index the first part wins.
    pub fn ordered_parts(&self, allow_partial: bool) -> Result<Vec<&GroupPart>, MergeError> {
        let total = self.total()?;
        check_complete(
            &self.key.base,
            total,
            self.parts.iter().map(|p| p.index),
            allow_partial,
        )?;
        let ordered = in_order(&self.parts, |p| p.index, total);
        if ordered.is_empty() {
            return Err(MergeError::Empty {
                base: self.key.base.clone(),
            });
        }
        Ok(ordered)
    }
}

/// Split-named files grouped for reassembly, plus everything else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    /// Sorted by key
    pub groups: Vec<SegmentGroup>,
    /// Files that do not follow the segment naming scheme, in input order
    pub passthrough: Vec<PathBuf>,
}

/// Group paths (normally relative to a merge root) by parent directory and
/// base name
pub fn group_parts<P: AsRef<Path>>(files: &[P]) -> Grouping {
    let mut groups: BTreeMap<GroupKey, Vec<GroupPart>> = BTreeMap::new();
    let mut passthrough = Vec::new();

    for file in files {
        let path = file.as_ref();
        let parsed = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(parse_split_name);

        match parsed {
            Some(name) => {
                let key = GroupKey {
                    parent: path.parent().map(Path::to_path_buf).unwrap_or_default(),
                    base: name.base,
                };
                groups.entry(key).or_default().push(GroupPart {
                    index: name.index,
                    total: name.total,
                    path: path.to_path_buf(),
                });
            }
            None => passthrough.push(path.to_path_buf()),
        }
    }

    let groups = groups
        .into_iter()
        .map(|(key, mut parts)| {
            parts.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));
            SegmentGroup { key, parts }
        })
        .collect();

    Grouping {
        groups,
        passthrough,
    }
}

pub(crate) fn declared_total(
    base: &str,
    totals: impl Iterator<Item = usize>,
) -> Result<usize, MergeError> {
    let distinct: Vec<usize> = totals.collect::<BTreeSet<_>>().into_iter().collect();
    match distinct.as_slice() {
        [] => Err(MergeError::Empty {
            base: base.to_string(),
        }),
        [total] => Ok(*total),
        _ => Err(MergeError::InconsistentTotals {
            base: base.to_string(),
            totals: distinct.clone(),
        }),
    }
}

pub(crate) fn missing_indices(total: usize, present: impl Iterator<Item = usize>) -> Vec<usize> {
    let present: BTreeSet<usize> = present.collect();
    (1..=total).filter(|i| !present.contains(i)).collect()
}

pub(crate) fn check_complete(
    base: &str,
    total: usize,
    present: impl Iterator<Item = usize>,
    allow_partial: bool,
) -> Result<(), MergeError> {
    let missing = missing_indices(total, present);
    if missing.is_empty() {
        return Ok(());
    }
    if !allow_partial {
        return Err(MergeError::MissingParts {
            base: base.to_string(),
            total,
            missing,
        });
    }
    tracing::debug!(base, ?missing, "merging partial group");
    Ok(())
}

/// Items with an index in `1..=total`, ascending; on a repeated index the
/// earliest item wins
pub(crate) fn in_order<T>(items: &[T], index: impl Fn(&T) -> usize, total: usize) -> Vec<&T> {
    let mut ordered: Vec<&T> = items
        .iter()
        .filter(|item| (1..=total).contains(&index(item)))
        .collect();
    ordered.sort_by_key(|item| index(*item));
    ordered.dedup_by_key(|item| index(*item));
    ordered
}
