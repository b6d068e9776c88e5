//! Directory-level split and merge.
//!
//! Discovers `.txt` files, mirrors their relative layout under an output
//! root, and isolates per-file failures so one bad document never stops a
//! batch.

mod error;
mod files;
mod manifest;
mod merge;
mod split;

#[cfg(test)]
mod tests;

pub use error::{BatchError, FileFailure};
pub use files::{collect_text_files, hash_bytes};
pub use manifest::{MANIFEST_FILE, ManifestRecord, generator, read_manifest, write_manifest};
pub use merge::{MergeReport, MergedGroup, SkippedGroup, merge_directory};
pub use split::{Piece, SplitOptions, SplitOutcome, SplitReport, split_directory, split_text};
