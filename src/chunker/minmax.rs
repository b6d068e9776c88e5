use crate::text::{CharIndex, char_len};

const PARAGRAPH_SEP: &str = "\n\n";
const LINE_SEP: &str = "\n";

/// Split text into chunks of roughly `[min_chars, max_chars]` chars.
///
/// Works on paragraphs first, then lines for paragraphs that exceed
/// `max_chars`, then exact hard cuts for single lines that still exceed it.
/// A chunk may overflow `max_chars` when that is the only way to reach
/// `min_chars`, and a trailing chunk below `min_chars` is folded into the one
/// before it.
pub fn split_minmax(text: &str, min_chars: usize, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if min_chars == 0 || max_chars == 0 {
        return vec![text.to_string()];
    }
    let (min_chars, max_chars) = if min_chars > max_chars {
        (max_chars, min_chars)
    } else {
        (min_chars, max_chars)
    };

    let mut window = Window::new(min_chars, max_chars);

    for para in text.split(PARAGRAPH_SEP) {
        if char_len(para) <= max_chars {
            window.push(para, PARAGRAPH_SEP);
            continue;
        }

        // Paragraph too large on its own: fall back to lines
        for (i, line) in para.split(LINE_SEP).enumerate() {
            let sep = if i == 0 { PARAGRAPH_SEP } else { LINE_SEP };
            if char_len(line) <= max_chars {
                window.push(line, sep);
            } else {
                window.push_oversized(line, sep);
            }
        }
    }

    window.finish()
}

/// Accumulates pieces into chunks under the min/max rules
struct Window {
    min_chars: usize,
    max_chars: usize,
    chunks: Vec<String>,
    buf: String,
    buf_len: usize,
    parts: usize,
    /// Separator that preceded the first piece of `buf`
    lead: &'static str,
}

impl Window {
    fn new(min_chars: usize, max_chars: usize) -> Self {
        Self {
            min_chars,
            max_chars,
            chunks: Vec::new(),
            buf: String::new(),
            buf_len: 0,
            parts: 0,
            lead: PARAGRAPH_SEP,
        }
    }

    /// Add a piece that fits within `max_chars` on its own
    fn push(&mut self, piece: &str, sep: &'static str) {
        let piece_len = char_len(piece);
        let sep_len = if self.parts > 0 { sep.len() } else { 0 };

        if self.buf_len + sep_len + piece_len <= self.max_chars {
            self.append(piece, piece_len, sep);
            return;
        }

        if self.buf_len < self.min_chars {
            // Overflow max to satisfy min
            self.append(piece, piece_len, sep);
            self.flush();
            return;
        }

        self.flush();
        self.append(piece, piece_len, sep);
    }

    /// Add a single line longer than `max_chars`
    fn push_oversized(&mut self, line: &str, sep: &'static str) {
        if self.parts > 0 && self.buf_len < self.min_chars {
            // The pending buffer can only reach min by taking the whole line
            self.append(line, char_len(line), sep);
            self.flush();
            return;
        }

        self.flush();
        self.chunks
            .extend(hard_cut(line, self.min_chars, self.max_chars));
    }

    fn append(&mut self, piece: &str, piece_len: usize, sep: &'static str) {
        if self.parts == 0 {
            self.lead = sep;
        } else {
            self.buf.push_str(sep);
            self.buf_len += sep.len();
        }
        self.buf.push_str(piece);
        self.buf_len += piece_len;
        self.parts += 1;
    }

    fn flush(&mut self) {
        if self.parts == 0 {
            return;
        }
        self.chunks.push(std::mem::take(&mut self.buf));
        self.buf_len = 0;
        self.parts = 0;
    }

    fn finish(mut self) -> Vec<String> {
        if self.parts == 0 {
            return self.chunks;
        }
        if self.buf_len < self.min_chars && !self.chunks.is_empty() {
            let last = self.chunks.len() - 1;
            self.chunks[last].push_str(self.lead);
            self.chunks[last].push_str(&self.buf);
        } else {
            let tail = std::mem::take(&mut self.buf);
            self.chunks.push(tail);
        }
        self.chunks
    }
}

/// Cut a line at exact `max_chars` boundaries. When the remainder after a cut
/// would be non-empty but under `min_chars`, the cut is pulled back so the last
/// piece reaches `min_chars`, as long as the current piece stays at or above it.
pub(crate) fn hard_cut(line: &str, min_chars: usize, max_chars: usize) -> Vec<String> {
    let idx = CharIndex::new(line);
    let len = idx.len();
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = (start + max_chars).min(len);
        let rest = len - end;
        if rest > 0 && rest < min_chars && len - min_chars >= start + min_chars {
            end = len - min_chars;
        }
        pieces.push(idx.slice(start, end).to_string());
        start = end;
    }

    pieces
}
