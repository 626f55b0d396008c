//! What a permutation changed.
//!
//! [`LineDocument::apply_edits`](crate::LineDocument::apply_edits) reports the applied batch as
//! a [`TextDelta`]. The CLI logs its size and the net number of removed lines; hosts that keep
//! their own buffers can replay it instead of re-reading the document.

/// One applied change, in character offsets.
///
/// `start` is measured in the document as it stood when this change was made, so the edits of
/// a delta replay correctly only in their recorded order (highest offset first for a permutation
/// batch). Zero-width edits sharing an offset with a range are folded into one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Where the change starts.
    pub start: usize,
    /// Text taken out; empty for a pure insertion.
    pub deleted_text: String,
    /// Text put in, with LF line breaks; empty for a pure deletion.
    pub inserted_text: String,
}

/// Record of one applied edit batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Document length in characters before the batch.
    pub before_char_count: usize,
    /// Document length in characters after the batch.
    pub after_char_count: usize,
    /// Applied changes, in application order.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// `true` for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Net number of lines the batch removed; negative when a transform produced extra lines.
    pub fn removed_line_breaks(&self) -> isize {
        self.edits
            .iter()
            .map(|edit| {
                let removed = edit.deleted_text.matches('\n').count() as isize;
                removed - edit.inserted_text.matches('\n').count() as isize
            })
            .sum()
    }
}
