//! Edit reconciliation: mapping a transformed list of line texts back onto the document.
//!
//! The batch is built in three phases, always in this order:
//!
//! 1. **replace** the content of the first `min(n, m)` lines (terminators untouched),
//! 2. **delete** surplus lines when the transform returned fewer lines,
//! 3. **insert** extra lines after the last resolved line when it returned more.
//!
//! No two operations of a batch overlap, so the whole batch can be handed to
//! [`LineDocument::apply_edits`](crate::LineDocument::apply_edits) in one go.

use crate::document::LineSource;
use crate::edit::{CharRange, LineEdit};
use crate::error::PermuteError;
use crate::resolver::LineDescriptor;

/// Compute the edit batch turning the lines in `descriptors` into `new_texts`.
///
/// `new_texts` may be shorter than, as long as, or longer than `descriptors`.
///
/// # Example
///
/// ```rust
/// use permute_core::{LineDocument, TextDocument, reconcile, resolve};
///
/// let mut doc = TextDocument::new("x\nx\ny");
/// let lines = resolve(&doc, &[]).unwrap().unwrap();
/// let edits = reconcile(&doc, &lines, &["x", "y"]).unwrap();
/// doc.apply_edits(&edits).unwrap();
/// assert_eq!(doc.text(), "x\ny");
/// ```
pub fn reconcile<S, T>(
    source: &S,
    descriptors: &[LineDescriptor],
    new_texts: &[T],
) -> Result<Vec<LineEdit>, PermuteError>
where
    S: LineSource + ?Sized,
    T: AsRef<str>,
{
    let n = descriptors.len();
    let m = new_texts.len();
    let mut edits: Vec<LineEdit> = Vec::with_capacity(n.max(m));

    for (descriptor, text) in descriptors.iter().zip(new_texts) {
        edits.push(LineEdit::Replace {
            range: descriptor.content,
            text: text.as_ref().to_string(),
        });
    }

    if m < n {
        let deletions = deletion_ranges(source, &descriptors[m..])?;
        edits.extend(deletions.into_iter().map(|range| LineEdit::Delete { range }));
    }

    if m > n {
        let anchor = descriptors.last().ok_or(PermuteError::NoAnchorLine)?;
        let mut appendix = String::new();
        for text in &new_texts[n..] {
            appendix.push('\n');
            appendix.push_str(text.as_ref());
        }
        edits.push(LineEdit::Insert {
            offset: anchor.content.end,
            text: appendix,
        });
    }

    tracing::debug!(
        resolved = n,
        produced = m,
        edits = edits.len(),
        "reconciled line edits"
    );
    Ok(edits)
}

/// Ranges removing the `surplus` lines together with their terminators.
///
/// When the last surplus line is the unterminated final line of the document, the contiguous
/// run ending there is removed as one range that starts at the end of the preceding line's
/// content: that line gives up its terminator and becomes the new unterminated last line.
fn deletion_ranges<S: LineSource + ?Sized>(
    source: &S,
    surplus: &[LineDescriptor],
) -> Result<Vec<CharRange>, PermuteError> {
    let Some(last) = surplus.last() else {
        return Ok(Vec::new());
    };

    let mut whole_lines = surplus;
    let mut tail: Option<CharRange> = None;
    if !last.has_terminator() {
        let mut run_start = surplus.len() - 1;
        while run_start > 0 && surplus[run_start - 1].line + 1 == surplus[run_start].line {
            run_start -= 1;
        }

        let first = &surplus[run_start];
        let start = if first.line > 0 {
            source.line_range(first.line - 1)?.end
        } else {
            first.full.start
        };
        tail = Some(CharRange::new(start, last.full.end));
        whole_lines = &surplus[..run_start];
    }

    let mut ranges: Vec<CharRange> = whole_lines.iter().map(|d| d.full).collect();
    ranges.extend(tail);
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{LineDocument, TextDocument};
    use crate::position::{Position, Selection};
    use crate::resolver::resolve;

    fn descriptors(doc: &TextDocument, lines: &[usize]) -> Vec<LineDescriptor> {
        lines
            .iter()
            .map(|&line| LineDescriptor::from_source(doc, line).unwrap())
            .collect()
    }

    fn apply(doc: &mut TextDocument, edits: &[LineEdit]) {
        doc.apply_edits(edits).unwrap();
    }

    #[test]
    fn test_equal_length_replaces_only() {
        let mut doc = TextDocument::new("a\nb\nc\nd");
        let lines = descriptors(&doc, &[0, 1, 2, 3]);
        let edits = reconcile(&doc, &lines, &["d", "c", "b", "a"]).unwrap();

        assert_eq!(edits.len(), 4);
        assert!(edits.iter().all(LineEdit::is_replace));
        for (edit, line) in edits.iter().zip(&lines) {
            assert_eq!(edit.range(), line.content);
        }

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "d\nc\nb\na");
    }

    #[test]
    fn test_shrink_through_unterminated_last_line() {
        let mut doc = TextDocument::new("l0\nl1\nl2\nl3\nl4\nl5");
        let lines = descriptors(&doc, &[2, 3, 4, 5]);
        let edits = reconcile(&doc, &lines, &["X", "Y"]).unwrap();

        let deletes: Vec<&LineEdit> = edits.iter().filter(|e| e.is_delete()).collect();
        assert_eq!(deletes.len(), 1);
        // From the end of line 3's content through the end of the document.
        assert_eq!(deletes[0].range(), CharRange::new(11, 17));

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "l0\nl1\nX\nY");
        assert_eq!(doc.line_count(), 4);
    }

    #[test]
    fn test_shrink_of_terminated_lines_deletes_whole_lines() {
        let mut doc = TextDocument::new("a\nb\nc\nd\n");
        let lines = descriptors(&doc, &[0, 1, 2, 3]);
        let edits = reconcile(&doc, &lines, &["a"]).unwrap();

        assert_eq!(edits.iter().filter(|e| e.is_delete()).count(), 3);
        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "a\n");
    }

    #[test]
    fn test_shrink_with_gap_before_final_run() {
        let mut doc = TextDocument::new("a\nb\nc\nd\ne");
        let lines = descriptors(&doc, &[0, 2, 3, 4]);
        let edits = reconcile(&doc, &lines, &["q"]).unwrap();

        let deletes: Vec<CharRange> = edits
            .iter()
            .filter(|e| e.is_delete())
            .map(LineEdit::range)
            .collect();
        // Lines 2..=4 are adjacent, so they go as one run starting at the end of line 1.
        assert_eq!(deletes, vec![CharRange::new(3, 9)]);

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "q\nb");
    }

    #[test]
    fn test_shrink_non_adjacent_surplus_before_final_line() {
        let mut doc = TextDocument::new("a\nb\nc\nd\ne");
        let lines = descriptors(&doc, &[0, 1, 2, 4]);
        let edits = reconcile(&doc, &lines, &["z", "y"]).unwrap();

        let deletes: Vec<CharRange> = edits
            .iter()
            .filter(|e| e.is_delete())
            .map(LineEdit::range)
            .collect();
        // Line 2 with its terminator, then line 4 together with line 3's terminator.
        assert_eq!(deletes, vec![CharRange::new(4, 6), CharRange::new(7, 9)]);

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "z\ny\nd");
    }

    #[test]
    fn test_shrink_to_nothing_from_line_zero() {
        let mut doc = TextDocument::new("a\nb");
        let lines = descriptors(&doc, &[0, 1]);
        let edits = reconcile::<_, &str>(&doc, &lines, &[]).unwrap();

        assert_eq!(edits, vec![LineEdit::Delete {
            range: CharRange::new(0, 3)
        }]);
        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_grow_appends_after_last_line() {
        let mut doc = TextDocument::new("0\n1\n2");
        let lines = descriptors(&doc, &[0, 1]);
        let edits = reconcile(&doc, &lines, &["a", "b", "c"]).unwrap();

        assert_eq!(edits.len(), 3);
        assert!(edits[2].is_insert());
        assert_eq!(
            edits[2],
            LineEdit::Insert {
                offset: 3,
                text: "\nc".to_string()
            }
        );

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "a\nb\nc\n2");
        assert_eq!(doc.line_count(), 4);
    }

    #[test]
    fn test_grow_after_empty_last_line() {
        let mut doc = TextDocument::new("x\n\ny");
        let lines = descriptors(&doc, &[0, 1]);
        let edits = reconcile(&doc, &lines, &["p", "q", "r", "s"]).unwrap();

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "p\nq\nr\ns\ny");
    }

    #[test]
    fn test_grow_without_anchor_is_an_error() {
        let doc = TextDocument::new("a");
        assert_eq!(
            reconcile(&doc, &[], &["x"]),
            Err(PermuteError::NoAnchorLine)
        );
        assert_eq!(reconcile::<_, &str>(&doc, &[], &[]), Ok(Vec::new()));
    }

    #[test]
    fn test_reconcile_after_resolve_preserves_unselected_lines() {
        let mut doc = TextDocument::new("keep\nb\na\nkeep too\nb");
        let selections = [
            Selection::new(Position::new(1, 0), Position::new(2, 1)),
            Selection::new(Position::new(4, 0), Position::new(4, 1)),
        ];
        let lines = resolve(&doc, &selections).unwrap().unwrap();
        let edits = reconcile(&doc, &lines, &["a", "b"]).unwrap();

        apply(&mut doc, &edits);
        assert_eq!(doc.text(), "keep\na\nb\nkeep too");
    }
}
