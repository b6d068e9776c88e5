/// Char-offset view over an immutable string.
///
/// Every size and offset used by the chunkers is counted in `char`s, while
/// regex matches and slicing work on bytes. This table maps between the two
/// so that cuts always land on char boundaries.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of every char, followed by `text.len()`
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offset of a char offset, clamped to the end of the text
    pub fn byte_offset(&self, char_idx: usize) -> usize {
        self.offsets[char_idx.min(self.len())]
    }

    /// Char offset of a byte offset. Byte offsets inside a multi-byte char
    /// resolve to the char that contains them.
    pub fn char_offset(&self, byte_idx: usize) -> usize {
        match self.offsets.binary_search(&byte_idx) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    /// Char at a char offset
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx >= self.len() {
            return None;
        }
        self.text[self.offsets[char_idx]..].chars().next()
    }

    /// Substring between two char offsets (`start..end`)
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    /// Substring of a window that may extend past either end of the text
    pub fn window(&self, start: isize, end: isize) -> &'a str {
        let clamp = |v: isize| v.clamp(0, self.len() as isize) as usize;
        self.slice(clamp(start), clamp(end))
    }
}

/// Number of chars in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `n` chars of `text`
pub fn tail_chars(text: &str, n: usize) -> &str {
    let len = char_len(text);
    if n >= len {
        return text;
    }
    let skip = len - n;
    match text.char_indices().nth(skip) {
        Some((b, _)) => &text[b..],
        None => "",
    }
}
