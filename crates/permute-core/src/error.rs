use thiserror::Error;

use crate::edit::CharRange;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while resolving, reconciling or applying a line permutation.
///
/// Degenerate inputs (a single drag selection, a one-line candidate set) are not errors;
/// they resolve to "nothing to do".
pub enum PermuteError {
    #[error("line {line} is out of bounds (document has {line_count} lines)")]
    /// A line query went past the last line of the document.
    LineOutOfBounds {
        /// Requested zero-based line.
        line: usize,
        /// Line count of the document at query time.
        line_count: usize,
    },

    #[error("range {start}..{end} is out of bounds (document has {char_count} characters)")]
    /// An edit range does not fit in the document.
    RangeOutOfBounds {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Character count of the document at query time.
        char_count: usize,
    },

    #[error("edits overlap: {first:?} and {second:?}")]
    /// Two edits of one batch touch the same characters.
    OverlappingEdits {
        /// The earlier range (by start offset).
        first: CharRange,
        /// The later range.
        second: CharRange,
    },

    #[error("cannot append lines without an anchor line")]
    /// New lines were produced but no line was resolved to append them after.
    NoAnchorLine,
}
