//! Diff alignment for sidediff.
//!
//! Turns two texts into row-aligned "old vs new" table data, ready to be
//! drawn as a side-by-side view.
//!
//! # Key Types
//!
//! - [`EditSegment`] / [`SegmentKind`] -- Line-level edit script produced by [`diff_lines`]
//! - [`Row`] / [`RowKind`] / [`RowSummary`] -- Aligned rows produced by [`align`]
//! - [`InlineSpan`] / [`Emphasis`] / [`InlineMode`] -- Intra-line spans produced by [`highlight`]

pub mod align;
pub mod inline;
pub mod line_diff;
pub mod text;

pub use align::{align, compare, Row, RowKind, RowSummary};
pub use inline::{highlight, Emphasis, InlineMode, InlineSpan};
pub use line_diff::{diff_lines, EditSegment, SegmentKind};
pub use text::{count_lines, normalize, segment_lines, text_lines};
