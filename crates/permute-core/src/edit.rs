//! Edit operations requested against a document.
//!
//! All ranges and offsets are **character offsets** (Unicode scalar values) into the document
//! as it was *before* any edit of the batch is applied, the same way a host editor's edit
//! builder collects a batch.

use std::fmt;

/// Half-open character range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharRange {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl CharRange {
    /// Create a range. `start` must not exceed `end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    /// Zero-width range at `offset`.
    pub fn empty_at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-width range.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One operation of an edit batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Replace the text in `range` with `text`.
    Replace {
        /// Range to replace.
        range: CharRange,
        /// Replacement text.
        text: String,
    },
    /// Delete the text in `range`.
    Delete {
        /// Range to delete.
        range: CharRange,
    },
    /// Insert `text` at `offset`.
    Insert {
        /// Character offset to insert at.
        offset: usize,
        /// Text to insert.
        text: String,
    },
}

impl LineEdit {
    /// The range of pre-edit text this operation consumes (zero-width for inserts).
    pub fn range(&self) -> CharRange {
        match self {
            LineEdit::Replace { range, .. } | LineEdit::Delete { range } => *range,
            LineEdit::Insert { offset, .. } => CharRange::empty_at(*offset),
        }
    }

    /// The text this operation writes.
    pub fn inserted_text(&self) -> &str {
        match self {
            LineEdit::Replace { text, .. } | LineEdit::Insert { text, .. } => text,
            LineEdit::Delete { .. } => "",
        }
    }

    /// Returns `true` for [`LineEdit::Replace`].
    pub fn is_replace(&self) -> bool {
        matches!(self, LineEdit::Replace { .. })
    }

    /// Returns `true` for [`LineEdit::Delete`].
    pub fn is_delete(&self) -> bool {
        matches!(self, LineEdit::Delete { .. })
    }

    /// Returns `true` for [`LineEdit::Insert`].
    pub fn is_insert(&self) -> bool {
        matches!(self, LineEdit::Insert { .. })
    }
}
