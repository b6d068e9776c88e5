//! Text chunking.
//!
//! Three strategies share one configuration:
//! - `Breakpoints`: greedy selection over a candidate breakpoint set
//! - `Units`: pack sections/sentences, then retrofit overlap
//! - `Window`: plain min/max accumulation over paragraphs and lines
//!
//! All sizes and offsets are in chars.

mod breakpoints;
mod config;
mod minmax;
mod splitter;
mod units;


pub use breakpoints::{BreakpointSource, LegalBreakpoints, ParagraphBreakpoints};
pub use config::{
    ChunkConfig, DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS, DEFAULT_OVERLAP_CHARS,
    DEFAULT_TARGET_CHARS, Strategy,
};
pub use minmax::split_minmax;
pub use splitter::{Chunker, Span, chunk_text, next_boundary, sliding_window, split_at_breakpoints};
pub use units::{
    assemble_chunks, chunk_units, split_into_sections, split_legal_sentences,
    split_section_into_units,
};
