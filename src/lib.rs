// Public API exports
pub mod batch;
pub mod boundary;
pub mod chunker;
pub mod config;
pub mod merge;
pub mod naming;
pub mod security;
pub mod text;

// Re-export main types for convenience
pub use boundary::{BoundaryClassifier, BoundaryVocabulary, LineKind, VocabularyError, VocabularySpec};
pub use security::{PathSanitizer, SanitizeError};
pub use text::CharIndex;

pub use chunker::{
    BreakpointSource, ChunkConfig, Chunker, LegalBreakpoints, ParagraphBreakpoints, Span, Strategy,
    chunk_text, sliding_window, split_minmax,
};

pub use naming::{SplitName, output_file_names, parse_split_name, split_file_name};

pub use merge::{GroupKey, MergeError, MergeOptions, SegmentGroup, group_parts, merge, merge_texts};

pub use batch::{BatchError, SplitOptions, merge_directory, split_directory};

pub use config::AppConfig;
