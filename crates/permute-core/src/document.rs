//! Host document abstraction.
//!
//! The permutation core only needs a handful of line queries and one batched mutation. Hosts
//! implement [`LineSource`] and [`LineDocument`]; [`TextDocument`] is the rope-backed
//! implementation used by the CLI and the tests.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::edit::{CharRange, LineEdit};
use crate::error::PermuteError;
use crate::line_ending::{LineEnding, normalize_to_lf};
use ropey::Rope;

/// Read-only line queries.
///
/// Every per-line query fails with [`PermuteError::LineOutOfBounds`] for `line >= line_count()`.
pub trait LineSource {
    /// Number of lines. A document whose text ends with a line break has a final empty line.
    fn line_count(&self) -> usize;

    /// Content range of `line`, excluding its terminator.
    fn line_range(&self, line: usize) -> Result<CharRange, PermuteError>;

    /// Range of `line` including its terminator. Equal to [`line_range`](Self::line_range)
    /// for a final line without terminator.
    fn line_range_with_terminator(&self, line: usize) -> Result<CharRange, PermuteError>;

    /// Text of `line`, excluding its terminator.
    fn line_text(&self, line: usize) -> Result<String, PermuteError>;

    /// Content length of `line` in characters.
    fn line_len(&self, line: usize) -> Result<usize, PermuteError> {
        Ok(self.line_range(line)?.len())
    }
}

/// A [`LineSource`] that can apply an edit batch.
pub trait LineDocument: LineSource {
    /// Apply `edits` as one atomic batch.
    ///
    /// Ranges are interpreted against the document before the batch. Implementations must
    /// reject the whole batch, leaving the document untouched, if any range is out of bounds
    /// or two edits overlap. Zero-width edits may touch the boundaries of other edits; at equal
    /// offsets, later-issued edits end up after earlier ones in the resulting text.
    fn apply_edits(&mut self, edits: &[LineEdit]) -> Result<TextDelta, PermuteError>;
}

/// Rope-backed in-memory document.
///
/// Text is stored with LF line breaks; CRLF and lone CR are normalized on load and on insert,
/// and the detected [`LineEnding`] is used by [`text_for_saving`](Self::text_for_saving).
///
/// # Example
///
/// ```rust
/// use permute_core::{LineSource, TextDocument};
///
/// let doc = TextDocument::new("one\r\ntwo\r\n");
/// assert_eq!(doc.line_count(), 3);
/// assert_eq!(doc.line_text(1).unwrap(), "two");
/// assert_eq!(doc.text_for_saving(), "one\r\ntwo\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct TextDocument {
    rope: Rope,
    line_ending: LineEnding,
}

impl TextDocument {
    /// Build a document from text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&normalize_to_lf(text)),
            line_ending: LineEnding::detect_in_text(text),
        }
    }

    /// Build a document from lines joined by `\n` (no trailing break).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(&text)
    }

    /// Get complete LF-normalized text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text converted to the preferred line ending.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.apply_to_text(&self.text())
    }

    /// Preferred line ending detected on load.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// All lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        (0..self.rope.len_lines())
            .map(|line| self.content_slice(line).to_string())
            .collect()
    }

    fn check_line(&self, line: usize) -> Result<(), PermuteError> {
        let line_count = self.rope.len_lines();
        if line >= line_count {
            return Err(PermuteError::LineOutOfBounds { line, line_count });
        }
        Ok(())
    }

    fn full_range(&self, line: usize) -> CharRange {
        let start = self.rope.line_to_char(line);
        let end = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            self.rope.len_chars()
        };
        CharRange::new(start, end)
    }

    fn content_range(&self, line: usize) -> CharRange {
        let full = self.full_range(line);
        if line + 1 < self.rope.len_lines() {
            // -1 for newline
            CharRange::new(full.start, full.end - 1)
        } else {
            full
        }
    }

    fn content_slice(&self, line: usize) -> ropey::RopeSlice<'_> {
        let range = self.content_range(line);
        self.rope.slice(range.start..range.end)
    }

    fn validate(&self, edits: &[LineEdit]) -> Result<Vec<usize>, PermuteError> {
        let char_count = self.rope.len_chars();
        for edit in edits {
            let range = edit.range();
            if range.start > range.end || range.end > char_count {
                return Err(PermuteError::RangeOutOfBounds {
                    start: range.start,
                    end: range.end,
                    char_count,
                });
            }
        }

        let mut asc_indices: Vec<usize> = (0..edits.len()).collect();
        asc_indices.sort_by_key(|&idx| (edits[idx].range().start, idx));

        // Sweep against the range reaching furthest so far. The strict comparison lets
        // zero-width edits touch range boundaries but not sit inside a range.
        let mut widest: Option<CharRange> = None;
        for &idx in &asc_indices {
            let range = edits[idx].range();
            match widest {
                Some(prev) if range.start < prev.end && prev.start < range.end => {
                    return Err(PermuteError::OverlappingEdits {
                        first: prev,
                        second: range,
                    });
                }
                Some(prev) if range.end <= prev.end => {}
                _ => widest = Some(range),
            }
        }

        Ok(asc_indices)
    }
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new("")
    }
}

impl LineSource for TextDocument {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_range(&self, line: usize) -> Result<CharRange, PermuteError> {
        self.check_line(line)?;
        Ok(self.content_range(line))
    }

    fn line_range_with_terminator(&self, line: usize) -> Result<CharRange, PermuteError> {
        self.check_line(line)?;
        Ok(self.full_range(line))
    }

    fn line_text(&self, line: usize) -> Result<String, PermuteError> {
        self.check_line(line)?;
        Ok(self.content_slice(line).to_string())
    }
}

impl LineDocument for TextDocument {
    fn apply_edits(&mut self, edits: &[LineEdit]) -> Result<TextDelta, PermuteError> {
        let before_char_count = self.rope.len_chars();
        let asc_indices = self.validate(edits)?;

        // Apply edits safely (descending offsets). Edits sharing a start offset are applied as
        // one: at most one of them covers a non-empty range, and their texts are joined in issue
        // order.
        let mut delta_edits: Vec<TextDeltaEdit> = Vec::with_capacity(edits.len());
        let groups =
            asc_indices.chunk_by(|&a, &b| edits[a].range().start == edits[b].range().start);
        for group in groups.rev() {
            let start = edits[group[0]].range().start;
            let end = group
                .iter()
                .map(|&idx| edits[idx].range().end)
                .max()
                .unwrap_or(start);
            let range = CharRange::new(start, end);
            let deleted_text = self.rope.slice(range.start..range.end).to_string();
            let inserted_text: String = group
                .iter()
                .map(|&idx| normalize_to_lf(edits[idx].inserted_text()))
                .collect();

            if !range.is_empty() {
                self.rope.remove(range.start..range.end);
            }
            if !inserted_text.is_empty() {
                self.rope.insert(range.start, &inserted_text);
            }

            tracing::trace!(start = range.start, end = range.end, "applied edit");
            delta_edits.push(TextDeltaEdit {
                start: range.start,
                deleted_text,
                inserted_text,
            });
        }

        Ok(TextDelta {
            before_char_count,
            after_char_count: self.rope.len_chars(),
            edits: delta_edits,
        })
    }
}
