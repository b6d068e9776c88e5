use super::files::{collect_text_files, hash_bytes, read_text, relative_path, write_text};
use super::manifest::{MANIFEST_FILE, ManifestRecord, generator, write_manifest};
use super::{BatchError, FileFailure};
use crate::chunker::{Chunker, Span, Strategy, split_minmax};
use crate::naming::output_file_names;
use crate::security::PathSanitizer;
use crate::text::{CharIndex, char_len};
use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a directory of documents is split
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub chunker: Chunker,
    pub recursive: bool,
    /// Write `manifest.jsonl` into the output root
    pub manifest: bool,
}

impl SplitOptions {
    pub fn new(chunker: Chunker) -> Self {
        Self {
            chunker,
            recursive: false,
            manifest: false,
        }
    }

    pub fn recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    pub fn manifest(mut self, enabled: bool) -> Self {
        self.manifest = enabled;
        self
    }
}

/// Segment files written for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Successfully split sources, in input order
    pub files: Vec<SplitOutcome>,
    pub failed: Vec<FileFailure>,
    pub manifest: Option<PathBuf>,
}

impl SplitReport {
    /// Number of segment files written
    pub fn segment_count(&self) -> usize {
        self.files.iter().map(|f| f.outputs.len()).sum()
    }
}

/// One segment of a document, with its char range when the strategy knows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    pub span: Option<Span>,
}

/// Split every `.txt` file under `input` into `output`, mirroring the
/// relative directory layout. Files are processed in parallel; a file that
/// fails is reported and does not stop the others.
pub fn split_directory(
    input: &Path,
    output: &Path,
    options: &SplitOptions,
) -> Result<SplitReport, BatchError> {
    let files = collect_text_files(input, options.recursive)?;
    if files.is_empty() {
        return Err(BatchError::NoInputFiles(input.to_path_buf()));
    }
    fs::create_dir_all(output).map_err(|e| BatchError::io(output, e))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        files = files.len(),
        strategy = ?options.chunker.config().strategy,
        "splitting documents"
    );

    let created_at = Utc::now().to_rfc3339();
    let results: Vec<(PathBuf, Result<SplitFile>)> = files
        .par_iter()
        .map(|source| {
            let result = split_file(input, output, source, options, &created_at);
            (source.clone(), result)
        })
        .collect();

    let mut report = SplitReport::default();
    let mut records = Vec::new();
    for (source, result) in results {
        match result {
            Ok(split) => {
                records.extend(split.records);
                report.files.push(SplitOutcome {
                    source,
                    outputs: split.outputs,
                });
            }
            Err(err) => {
                warn!(source = %source.display(), error = %format!("{err:#}"), "failed to split file");
                report.failed.push(FileFailure::new(source, &err));
            }
        }
    }

    if options.manifest {
        let path = output.join(MANIFEST_FILE);
        write_manifest(&path, &records)?;
        report.manifest = Some(path);
    }

    info!(
        sources = report.files.len(),
        segments = report.segment_count(),
        failed = report.failed.len(),
        "split complete"
    );
    Ok(report)
}

/// Segments for one document under the chunker's strategy.
///
/// The fixed-window strategy keeps a document no longer than its limits
/// whole. Empty text has no segments.
pub fn split_text(text: &str, chunker: &Chunker) -> Vec<Piece> {
    let config = chunker.config();
    match config.strategy {
        Strategy::Window => {
            let len = char_len(text);
            if text.is_empty() {
                Vec::new()
            } else if len <= config.min_chars || len <= config.max_chars {
                vec![Piece {
                    text: text.to_string(),
                    span: None,
                }]
            } else {
                split_minmax(text, config.min_chars, config.max_chars)
                    .into_iter()
                    .map(|text| Piece { text, span: None })
                    .collect()
            }
        }
        Strategy::Breakpoints => {
            let idx = CharIndex::new(text);
            chunker
                .spans(text)
                .into_iter()
                .map(|span| Piece {
                    text: idx.slice(span.start, span.end).to_string(),
                    span: Some(span),
                })
                .collect()
        }
        Strategy::Units => chunker
            .chunk(text)
            .into_iter()
            .map(|text| Piece { text, span: None })
            .collect(),
    }
}

struct SplitFile {
    outputs: Vec<PathBuf>,
    records: Vec<ManifestRecord>,
}

fn split_file(
    input: &Path,
    output: &Path,
    source: &Path,
    options: &SplitOptions,
    created_at: &str,
) -> Result<SplitFile> {
    let relative = relative_path(input, source)?;
    let base = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context(format!("File name is not valid UTF-8: {}", source.display()))?;
    let text = read_text(source)?;

    let mut pieces = split_text(&text, &options.chunker);
    if pieces.is_empty() {
        pieces.push(Piece {
            text: String::new(),
            span: None,
        });
    }

    let names = output_file_names(base, pieces.len());
    let source_sha256 = if options.manifest {
        hash_bytes(text.as_bytes())
    } else {
        String::new()
    };
    let overlap_chars = match options.chunker.config().strategy {
        Strategy::Window => 0,
        _ => options.chunker.config().normalized().overlap_chars,
    };

    let total = pieces.len();
    let mut outputs = Vec::with_capacity(total);
    let mut records = Vec::new();
    for (i, (name, piece)) in names.iter().zip(&pieces).enumerate() {
        let dst = PathSanitizer::resolve(output, &relative.with_file_name(name))?;
        write_text(&dst, &piece.text)?;

        if options.manifest {
            records.push(ManifestRecord {
                source: relative.display().to_string(),
                source_sha256: source_sha256.clone(),
                file: dst
                    .strip_prefix(output)
                    .unwrap_or(&dst)
                    .display()
                    .to_string(),
                index: i + 1,
                total,
                start_char: piece.span.map(|s| s.start),
                end_char: piece.span.map(|s| s.end),
                overlap_chars,
                generator: generator(),
                created_at: created_at.to_string(),
            });
        }
        outputs.push(dst);
    }

    tracing::debug!(source = %source.display(), segments = total, "wrote segments");
    Ok(SplitFile { outputs, records })
}
