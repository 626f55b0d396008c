//! Range resolution: turning a selection state into the set of whole lines to permute.
//!
//! Editors report a drag over several lines as a span that usually starts at the very end of
//! its first line or stops at column 0 of its last line. Those boundary lines carry nothing
//! selected and are trimmed off before the lines are collected.

use std::collections::BTreeSet;

use crate::document::LineSource;
use crate::edit::CharRange;
use crate::error::PermuteError;
use crate::position::{Position, Selection};

/// A resolved line and its two textual extents.
///
/// Descriptors are read-only facts about the document at resolution time; any applied edit
/// invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDescriptor {
    /// Zero-based line number.
    pub line: usize,
    /// Content range, excluding the terminator.
    pub content: CharRange,
    /// Range including the terminator; equal to `content` for an unterminated last line.
    pub full: CharRange,
}

impl LineDescriptor {
    /// Read the descriptor of `line` from the document.
    pub fn from_source<S: LineSource + ?Sized>(
        source: &S,
        line: usize,
    ) -> Result<Self, PermuteError> {
        Ok(Self {
            line,
            content: source.line_range(line)?,
            full: source.line_range_with_terminator(line)?,
        })
    }

    /// Returns `true` if the line ends with a line break.
    pub fn has_terminator(&self) -> bool {
        self.full != self.content
    }
}

/// Line number a span effectively starts on.
///
/// Steps over line ends: while `pos` sits at (or past) the end of its line's content and that
/// line is not the last one, move to the start of the next line.
pub fn trim_selection_start<F>(
    pos: Position,
    line_count: usize,
    mut line_len: F,
) -> Result<usize, PermuteError>
where
    F: FnMut(usize) -> Result<usize, PermuteError>,
{
    let mut line = pos.line;
    let mut column = pos.column;
    while line + 1 < line_count && column >= line_len(line)? {
        line += 1;
        column = 0;
    }
    Ok(line)
}

/// Line number a span effectively ends on.
///
/// While `pos` sits at column 0 of a line other than line 0, move to the end of the previous
/// line.
pub fn trim_selection_end<F>(pos: Position, mut line_len: F) -> Result<usize, PermuteError>
where
    F: FnMut(usize) -> Result<usize, PermuteError>,
{
    let mut line = pos.line;
    let mut column = pos.column;
    while line > 0 && column == 0 {
        line -= 1;
        column = line_len(line)?;
    }
    Ok(line)
}

/// Resolve the selection state into the ordered lines to permute.
///
/// Returns `Ok(None)` when there is nothing to do:
/// - exactly one non-empty selection (ordinary text selection),
/// - an empty document,
/// - fewer than two distinct lines after trimming.
///
/// Zero selections, or a single caret, stand for the whole document. Two or more selections are
/// trimmed individually and their lines merged; the result is sorted and free of duplicates no
/// matter how the selections are ordered or overlap.
///
/// # Example
///
/// ```rust
/// use permute_core::{Position, Selection, TextDocument, resolve};
///
/// let doc = TextDocument::new("c\nb\na\n");
/// let lines = resolve(&doc, &[Selection::caret(Position::new(0, 0))])
///     .unwrap()
///     .unwrap();
/// // The trailing empty line is not part of the set.
/// assert_eq!(lines.iter().map(|d| d.line).collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
pub fn resolve<S: LineSource + ?Sized>(
    source: &S,
    selections: &[Selection],
) -> Result<Option<Vec<LineDescriptor>>, PermuteError> {
    if let [single] = selections
        && !single.is_empty()
    {
        return Ok(None);
    }

    let line_count = source.line_count();
    if line_count == 0 {
        return Ok(None);
    }

    let mut lines: BTreeSet<usize> = BTreeSet::new();
    if selections.len() < 2 {
        // Whole document: only trailing empty lines are trimmed, leading ones stay.
        let last_line = line_count - 1;
        let end_of_file = Position::new(last_line, source.line_len(last_line)?);
        let end_line = trim_selection_end(end_of_file, |line| source.line_len(line))?;
        lines.extend(0..=end_line);
    } else {
        for selection in selections {
            collect_span_lines(source, selection, &mut lines)?;
        }
    }

    if lines.len() < 2 {
        tracing::debug!(lines = lines.len(), "fewer than two lines selected");
        return Ok(None);
    }

    let descriptors = lines
        .into_iter()
        .map(|line| LineDescriptor::from_source(source, line))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        first = descriptors[0].line,
        last = descriptors[descriptors.len() - 1].line,
        count = descriptors.len(),
        "resolved line set"
    );
    Ok(Some(descriptors))
}

fn collect_span_lines<S: LineSource + ?Sized>(
    source: &S,
    selection: &Selection,
    lines: &mut BTreeSet<usize>,
) -> Result<(), PermuteError> {
    let line_count = source.line_count();
    let (start, end) = selection.min_max();
    for pos in [start, end] {
        if pos.line >= line_count {
            return Err(PermuteError::LineOutOfBounds {
                line: pos.line,
                line_count,
            });
        }
    }

    let start_line = trim_selection_start(start, line_count, |line| source.line_len(line))?;
    let end_line = trim_selection_end(end, |line| source.line_len(line))?;
    lines.extend(start_line..=end_line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    fn line_numbers(descriptors: &[LineDescriptor]) -> Vec<usize> {
        descriptors.iter().map(|d| d.line).collect()
    }

    fn span(a: (usize, usize), b: (usize, usize)) -> Selection {
        Selection::new(Position::new(a.0, a.1), Position::new(b.0, b.1))
    }

    struct NoLines;

    impl LineSource for NoLines {
        fn line_count(&self) -> usize {
            0
        }

        fn line_range(&self, line: usize) -> Result<CharRange, PermuteError> {
            Err(PermuteError::LineOutOfBounds {
                line,
                line_count: 0,
            })
        }

        fn line_range_with_terminator(&self, line: usize) -> Result<CharRange, PermuteError> {
            self.line_range(line)
        }

        fn line_text(&self, line: usize) -> Result<String, PermuteError> {
            self.line_range(line).map(|_| String::new())
        }
    }

    #[test]
    fn test_trim_start_skips_line_ends() {
        let lens = [3usize, 0, 0, 4];
        let len = |line: usize| Ok(lens[line]);
        assert_eq!(trim_selection_start(Position::new(0, 3), 4, len).unwrap(), 3);
        assert_eq!(trim_selection_start(Position::new(0, 2), 4, len).unwrap(), 0);
        // Never moves past the last line.
        assert_eq!(trim_selection_start(Position::new(3, 4), 4, len).unwrap(), 3);
    }

    #[test]
    fn test_trim_end_skips_line_starts() {
        let lens = [3usize, 0, 0, 4];
        let len = |line: usize| Ok(lens[line]);
        assert_eq!(trim_selection_end(Position::new(3, 0), len).unwrap(), 0);
        assert_eq!(trim_selection_end(Position::new(3, 1), len).unwrap(), 3);
        assert_eq!(trim_selection_end(Position::new(0, 0), len).unwrap(), 0);
    }

    #[test]
    fn test_single_drag_selection_is_noop() {
        let doc = TextDocument::new("a\nb\nc\nd");
        assert_eq!(resolve(&doc, &[span((0, 0), (3, 1))]).unwrap(), None);
        assert_eq!(resolve(&doc, &[span((1, 0), (1, 1))]).unwrap(), None);
    }

    #[test]
    fn test_empty_document_is_noop() {
        assert_eq!(resolve(&NoLines, &[]).unwrap(), None);
    }

    #[test]
    fn test_no_selection_means_whole_document() {
        let doc = TextDocument::new("a\nb\nc");
        let lines = resolve(&doc, &[]).unwrap().unwrap();
        assert_eq!(line_numbers(&lines), vec![0, 1, 2]);
    }

    #[test]
    fn test_whole_document_drops_only_trailing_empty_lines() {
        let doc = TextDocument::new("\n\na\n\nb\n\n");
        let lines = resolve(&doc, &[Selection::caret(Position::new(3, 0))])
            .unwrap()
            .unwrap();
        assert_eq!(line_numbers(&lines), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_whole_document_keeps_leading_empty_line() {
        let doc = TextDocument::new("\nb\na");
        let lines = resolve(&doc, &[]).unwrap().unwrap();
        assert_eq!(line_numbers(&lines), vec![0, 1, 2]);
    }

    #[test]
    fn test_whole_document_of_empty_lines_is_noop() {
        let doc = TextDocument::new("\n\n\n");
        assert_eq!(resolve(&doc, &[]).unwrap(), None);
    }

    #[test]
    fn test_single_line_document_is_noop() {
        let doc = TextDocument::new("only\n");
        assert_eq!(resolve(&doc, &[]).unwrap(), None);
    }

    #[test]
    fn test_multiple_carets_collect_their_lines() {
        let doc = TextDocument::new("ab\ncd\nef\ngh");
        let lines = resolve(
            &doc,
            &[
                Selection::caret(Position::new(3, 1)),
                Selection::caret(Position::new(1, 1)),
            ],
        )
        .unwrap()
        .unwrap();
        assert_eq!(line_numbers(&lines), vec![1, 3]);
    }

    #[test]
    fn test_carets_on_line_boundaries_are_trimmed_away() {
        let doc = TextDocument::new("ab\ncd\nef\ngh");
        // Column 0 trims back to the previous line; line end trims forward to the next one.
        let lines = resolve(
            &doc,
            &[
                Selection::caret(Position::new(1, 0)),
                Selection::caret(Position::new(2, 2)),
            ],
        )
        .unwrap();
        assert_eq!(lines, None);
    }

    #[test]
    fn test_spans_ending_at_column_zero_exclude_next_line() {
        let doc = TextDocument::new("a\nb\nc\nd\ne");
        let lines = resolve(&doc, &[span((0, 0), (1, 0)), span((2, 0), (3, 0))])
            .unwrap()
            .unwrap();
        assert_eq!(line_numbers(&lines), vec![0, 2]);
    }

    #[test]
    fn test_span_starting_at_line_end_excludes_that_line() {
        let doc = TextDocument::new("aa\nbb\ncc\ndd");
        let lines = resolve(&doc, &[span((0, 2), (1, 1)), span((3, 0), (3, 2))])
            .unwrap()
            .unwrap();
        assert_eq!(line_numbers(&lines), vec![1, 3]);
    }

    #[test]
    fn test_overlapping_and_unsorted_spans_are_canonical() {
        let doc = TextDocument::new("a\nb\nc\nd\ne");
        let lines = resolve(
            &doc,
            &[span((4, 1), (2, 0)), span((1, 0), (3, 1)), span((2, 0), (2, 1))],
        )
        .unwrap()
        .unwrap();
        assert_eq!(line_numbers(&lines), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_span_trimmed_to_nothing_contributes_no_lines() {
        let doc = TextDocument::new("abc\ndef\nghi");
        // Starts at the end of line 0 and ends at column 0 of line 1.
        let lines = resolve(&doc, &[span((0, 3), (1, 0)), span((2, 1), (2, 1))]).unwrap();
        assert_eq!(lines, None);
    }

    #[test]
    fn test_descriptor_extents() {
        let doc = TextDocument::new("ab\ncd");
        let lines = resolve(&doc, &[]).unwrap().unwrap();
        assert_eq!(lines[0].content, CharRange::new(0, 2));
        assert_eq!(lines[0].full, CharRange::new(0, 3));
        assert!(lines[0].has_terminator());
        assert_eq!(lines[1].content, CharRange::new(3, 5));
        assert_eq!(lines[1].full, lines[1].content);
    }

    #[test]
    fn test_selection_past_last_line_is_an_error() {
        let doc = TextDocument::new("a\nb");
        let result = resolve(&doc, &[span((0, 0), (0, 1)), span((5, 0), (5, 0))]);
        assert_eq!(
            result,
            Err(PermuteError::LineOutOfBounds {
                line: 5,
                line_count: 2
            })
        );
    }
}
