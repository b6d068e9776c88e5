use super::files::{collect_text_files, read_text, relative_path, write_text};
use super::{BatchError, FileFailure};
use crate::merge::{GroupKey, GroupPart, MergeError, MergeOptions, SegmentGroup, group_parts, merge_texts};
use crate::security::PathSanitizer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedGroup {
    pub key: GroupKey,
    pub output: PathBuf,
    /// Parts actually read into the output
    pub parts: usize,
    /// Parts absent from a partial group
    pub missing: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGroup {
    pub key: GroupKey,
    pub reason: MergeError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Sorted by key
    pub merged: Vec<MergedGroup>,
    pub skipped: Vec<SkippedGroup>,
    /// Non-split files copied as-is, as output paths
    pub copied: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

/// Reassemble every segment group under `input` into `output` and copy the
/// remaining `.txt` files byte for byte. Groups that fail validation are
/// skipped with a warning.
pub fn merge_directory(
    input: &Path,
    output: &Path,
    options: &MergeOptions,
) -> Result<MergeReport, BatchError> {
    let files = collect_text_files(input, options.recursive)?;
    fs::create_dir_all(output).map_err(|e| BatchError::io(output, e))?;

    let mut report = MergeReport::default();
    let mut relative = Vec::with_capacity(files.len());
    for file in &files {
        match relative_path(input, file) {
            Ok(path) => relative.push(path),
            Err(err) => {
                let err = anyhow::Error::from(err);
                warn!(source = %file.display(), error = %format!("{err:#}"), "skipping file");
                report.failed.push(FileFailure::new(file.clone(), &err));
            }
        }
    }
    let grouping = group_parts(&relative);

    info!(
        input = %input.display(),
        output = %output.display(),
        groups = grouping.groups.len(),
        passthrough = grouping.passthrough.len(),
        "merging segments"
    );

    for group in &grouping.groups {
        let parts = match group.ordered_parts(options.allow_partial) {
            Ok(parts) => parts,
            Err(reason) => {
                warn!(group = %group.key, %reason, "skipping group");
                report.skipped.push(SkippedGroup {
                    key: group.key.clone(),
                    reason,
                });
                continue;
            }
        };

        match write_group(input, output, group, &parts, options) {
            Ok(merged) => report.merged.push(merged),
            Err(err) => {
                let dst = output.join(group.key.output_path());
                warn!(group = %group.key, error = %format!("{err:#}"), "failed to write merged group");
                report.failed.push(FileFailure::new(dst, &err));
            }
        }
    }

    for relative in &grouping.passthrough {
        let src = input.join(relative);
        let copied = PathSanitizer::resolve(output, relative)
            .map_err(anyhow::Error::from)
            .and_then(|dst| copy_file(&src, &dst).map(|()| dst));
        match copied {
            Ok(dst) => report.copied.push(dst),
            Err(err) => {
                warn!(source = %src.display(), error = %format!("{err:#}"), "failed to copy file");
                report.failed.push(FileFailure::new(src, &err));
            }
        }
    }

    info!(
        merged = report.merged.len(),
        skipped = report.skipped.len(),
        copied = report.copied.len(),
        failed = report.failed.len(),
        "merge complete"
    );
    Ok(report)
}

fn write_group(
    input: &Path,
    output: &Path,
    group: &SegmentGroup,
    parts: &[&GroupPart],
    options: &MergeOptions,
) -> Result<MergedGroup> {
    let mut pieces = Vec::with_capacity(parts.len());
    for part in parts {
        let path = input.join(&part.path);
        match read_text(&path) {
            Ok(text) => pieces.push(text),
            Err(err) => warn!(part = %path.display(), error = %format!("{err:#}"), "skipping unreadable part"),
        }
    }

    let dst = PathSanitizer::resolve(output, &group.key.output_path())?;
    let parts_read = pieces.len();
    write_text(&dst, &merge_texts(pieces, options.ensure_newline_between))?;

    Ok(MergedGroup {
        key: group.key.clone(),
        output: dst,
        parts: parts_read,
        missing: group.missing().unwrap_or_default(),
    })
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(src, dst).context(format!(
        "Failed to copy {} to {}",
        src.display(),
        dst.display()
    ))?;
    Ok(())
}
