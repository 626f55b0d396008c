#![warn(missing_docs)]
//! Permute Core - Whole-Line Reverse, Unique and Shuffle for Multi-Selection Editors
//!
//! # Overview
//!
//! `permute-core` reorders, deduplicates or shuffles whole lines inside the selected regions of
//! a document and leaves everything else untouched. It does not own the document or the
//! selection state: the host exposes its lines through [`LineSource`] / [`LineDocument`] and
//! hands over its current selections.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands (reverse / unique / shuffle)      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Range Resolver                             │  selections → sorted line descriptors
//! ├─────────────────────────────────────────────┤
//! │  Transform                                  │  line texts → new line texts
//! ├─────────────────────────────────────────────┤
//! │  Edit Reconciler                            │  replace / delete / insert batch
//! ├─────────────────────────────────────────────┤
//! │  Document (Rope-based)                      │  atomic batch application
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use permute_core::{PermuteCommand, Position, Selection, TextDocument};
//!
//! let mut doc = TextDocument::new("x\nx\ny\n");
//!
//! // No selection (or a single caret) means the whole document.
//! PermuteCommand::Unique
//!     .execute(&mut doc, &[Selection::caret(Position::new(0, 0))])
//!     .unwrap();
//! assert_eq!(doc.text(), "x\ny\n");
//! ```
//!
//! # Selection Rules
//!
//! - A single non-empty selection is ordinary text selection: nothing happens.
//! - Zero selections or a single caret select the whole document.
//! - Two or more selections each contribute the lines they cover, after trimming a start that
//!   sits at the end of its line and an end that sits at column 0.
//! - Fewer than two resolved lines: nothing happens.
//!
//! # Module Description
//!
//! - [`resolver`] - selection trimming and line-set resolution
//! - [`reconcile`] - edit batch computation
//! - [`transform`] - reverse / unique / shuffle
//! - [`document`] - host document traits and the rope-backed [`TextDocument`]
//! - [`permute`] - the read-transform-write pass and [`PermuteCommand`]

pub mod delta;
pub mod document;
pub mod edit;
mod error;
pub mod line_ending;
pub mod permute;
mod position;
pub mod reconcile;
pub mod resolver;
pub mod transform;

pub use delta::{TextDelta, TextDeltaEdit};
pub use document::{LineDocument, LineSource, TextDocument};
pub use edit::{CharRange, LineEdit};
pub use error::PermuteError;
pub use line_ending::LineEnding;
pub use permute::{ParseCommandError, PermuteCommand, permute_lines};
pub use position::{Position, Selection};
pub use reconcile::reconcile;
pub use resolver::{LineDescriptor, resolve, trim_selection_end, trim_selection_start};
pub use transform::{reverse, shuffle, unique};
