//! Segment grouping and reassembly.
//!
//! Segments are grouped by `(parent directory, base name)`, validated for a
//! consistent total and completeness, then concatenated in index order.

mod error;
mod group;
mod reassemble;

#[cfg(test)]
mod tests;

pub use error::MergeError;
pub use group::{GroupKey, GroupPart, Grouping, SegmentGroup, group_parts};
pub use reassemble::{MergeOptions, Segment, merge, merge_texts};
