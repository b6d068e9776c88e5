use serde::{Deserialize, Serialize};

/// Default minimum chunk size in chars
pub const DEFAULT_MIN_CHARS: usize = 600;
/// Default target chunk size in chars
pub const DEFAULT_TARGET_CHARS: usize = 1000;
/// Default hard maximum chunk size in chars
pub const DEFAULT_MAX_CHARS: usize = 1400;
/// Default overlap carried into the next chunk
pub const DEFAULT_OVERLAP_CHARS: usize = 150;

/// How a text is cut into chunks
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Greedy selection over a candidate breakpoint set
    #[default]
    Breakpoints,
    /// Assemble pre-segmented sections/sentences, then retrofit overlap
    Units,
    /// Plain min/max accumulation over paragraphs and lines
    Window,
}

/// Size limits and strategy selection for chunking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub min_chars: usize,
    pub target_chars: usize,
    pub max_chars: usize,
    pub overlap_chars: usize,
    /// Use heading/step/punctuation boundaries instead of plain paragraphs and lines
    pub domain_aware: bool,
    /// Split into heading-led sections before building units (units strategy only)
    pub by_section: bool,
    pub strategy: Strategy,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            target_chars: DEFAULT_TARGET_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
            overlap_chars: DEFAULT_OVERLAP_CHARS,
            domain_aware: true,
            by_section: true,
            strategy: Strategy::Breakpoints,
        }
    }
}

impl ChunkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_chars(mut self, chars: usize) -> Self {
        self.min_chars = chars;
        self
    }

    pub fn target_chars(mut self, chars: usize) -> Self {
        self.target_chars = chars;
        self
    }

    pub fn max_chars(mut self, chars: usize) -> Self {
        self.max_chars = chars;
        self
    }

    pub fn overlap_chars(mut self, chars: usize) -> Self {
        self.overlap_chars = chars;
        self
    }

    pub fn domain_aware(mut self, enabled: bool) -> Self {
        self.domain_aware = enabled;
        self
    }

    pub fn by_section(mut self, enabled: bool) -> Self {
        self.by_section = enabled;
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Repair inconsistent limits instead of rejecting them:
    /// - zero thresholds become 1
    /// - `min > max` is swapped
    /// - target is clamped into `[min, max]`
    /// - overlap is kept below `max` so every step makes progress
    pub fn normalized(&self) -> Self {
        let mut min_chars = self.min_chars.max(1);
        let mut max_chars = self.max_chars.max(1);
        if min_chars > max_chars {
            std::mem::swap(&mut min_chars, &mut max_chars);
        }
        Self {
            min_chars,
            target_chars: self.target_chars.clamp(min_chars, max_chars),
            max_chars,
            overlap_chars: self.overlap_chars.min(max_chars - 1),
            ..self.clone()
        }
    }
}
