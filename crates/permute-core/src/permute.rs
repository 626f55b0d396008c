//! Running a transform over the selected lines of a document.
//!
//! One invocation is a strict read-then-write pass: the line set is resolved and every line
//! text is read before the single batched [`LineDocument::apply_edits`] call. A failure at any
//! point therefore leaves the document untouched.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::delta::TextDelta;
use crate::document::LineDocument;
use crate::error::PermuteError;
use crate::position::Selection;
use crate::reconcile::reconcile;
use crate::resolver::resolve;
use crate::transform::{reverse, shuffle, unique};

/// Apply `transform` to the lines picked out by `selections`.
///
/// Returns `Ok(None)` if the selection state resolves to nothing to do, otherwise the delta of
/// the applied batch. Errors are logged and returned unchanged.
///
/// # Example
///
/// ```rust
/// use permute_core::{TextDocument, permute_lines, reverse};
///
/// let mut doc = TextDocument::new("b\na\nb\nc");
/// let delta = permute_lines(&mut doc, &[], reverse).unwrap();
/// assert!(delta.is_some());
/// assert_eq!(doc.text(), "c\nb\na\nb");
/// ```
pub fn permute_lines<D, F>(
    doc: &mut D,
    selections: &[Selection],
    transform: F,
) -> Result<Option<TextDelta>, PermuteError>
where
    D: LineDocument + ?Sized,
    F: FnOnce(Vec<String>) -> Vec<String>,
{
    let result = read_transform_write(doc, selections, transform);
    if let Err(err) = &result {
        tracing::error!(error = %err, "line permutation failed");
    }
    result
}

fn read_transform_write<D, F>(
    doc: &mut D,
    selections: &[Selection],
    transform: F,
) -> Result<Option<TextDelta>, PermuteError>
where
    D: LineDocument + ?Sized,
    F: FnOnce(Vec<String>) -> Vec<String>,
{
    let Some(descriptors) = resolve(&*doc, selections)? else {
        tracing::debug!(selections = selections.len(), "nothing to permute");
        return Ok(None);
    };

    let texts = descriptors
        .iter()
        .map(|descriptor| doc.line_text(descriptor.line))
        .collect::<Result<Vec<_>, _>>()?;
    let new_texts = transform(texts);
    let edits = reconcile(&*doc, &descriptors, &new_texts)?;

    let delta = doc.apply_edits(&edits)?;
    tracing::debug!(
        before = delta.before_char_count,
        after = delta.after_char_count,
        "applied line permutation"
    );
    Ok(Some(delta))
}

/// The named line commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermuteCommand {
    /// Reverse the order of the lines.
    Reverse,
    /// Drop repeated lines, keeping first occurrences.
    Unique,
    /// Shuffle the lines.
    Shuffle {
        /// Seed for a reproducible order; `None` uses the thread RNG.
        seed: Option<u64>,
    },
}

impl PermuteCommand {
    /// Command name as used by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            PermuteCommand::Reverse => "reverse",
            PermuteCommand::Unique => "unique",
            PermuteCommand::Shuffle { .. } => "shuffle",
        }
    }

    /// Transform line texts.
    pub fn apply(&self, lines: Vec<String>) -> Vec<String> {
        match *self {
            PermuteCommand::Reverse => reverse(lines),
            PermuteCommand::Unique => unique(lines),
            PermuteCommand::Shuffle { seed: Some(seed) } => {
                shuffle(lines, &mut StdRng::seed_from_u64(seed))
            }
            PermuteCommand::Shuffle { seed: None } => shuffle(lines, &mut rand::thread_rng()),
        }
    }

    /// Run the command against `doc`; see [`permute_lines`].
    pub fn execute<D: LineDocument + ?Sized>(
        &self,
        doc: &mut D,
        selections: &[Selection],
    ) -> Result<Option<TextDelta>, PermuteError> {
        tracing::debug!(command = self.name(), "executing line command");
        permute_lines(doc, selections, |lines| self.apply(lines))
    }
}

impl fmt::Display for PermuteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized command name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown line command '{0}' (expected reverse, unique or shuffle)")]
pub struct ParseCommandError(pub String);

impl FromStr for PermuteCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reverse" => Ok(PermuteCommand::Reverse),
            "unique" => Ok(PermuteCommand::Unique),
            "shuffle" => Ok(PermuteCommand::Shuffle { seed: None }),
            _ => Err(ParseCommandError(s.to_string())),
        }
    }
}
