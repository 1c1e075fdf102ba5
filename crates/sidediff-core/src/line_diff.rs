//! Line-level edit script between two texts.
//!
//! Uses the `similar` crate (Myers diff algorithm) over whole lines and
//! regroups its operations into tagged text segments.

use similar::{capture_diff_slices, Algorithm, DiffTag};
use tracing::debug;

use crate::text::{normalize, segment_lines, text_lines};

/// How a segment relates the old text to the new text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Lines present on both sides.
    Equal,
    /// Lines present only in the new text.
    Added,
    /// Lines present only in the old text.
    Removed,
}

/// One unit of a line-level edit script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSegment {
    /// Whether the lines were kept, added, or removed.
    pub kind: SegmentKind,
    /// Newline-joined lines, usually with a trailing newline.
    pub text: String,
    /// New-side text of an equal segment whose lines only matched after
    /// whitespace was ignored. `None` when both sides are byte-identical.
    pub new_text: Option<String>,
}

impl EditSegment {
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Equal, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    /// An equal segment whose sides differ only in whitespace.
    pub fn equal_ignoring_whitespace(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Equal,
            text: old.into(),
            new_text: Some(new.into()),
        }
    }

    fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            new_text: None,
        }
    }

    /// The segment's lines as seen from the old side (or the only side).
    pub fn lines(&self) -> Vec<&str> {
        segment_lines(&self.text)
    }

    /// The segment's lines as seen from the new side.
    pub fn new_lines(&self) -> Vec<&str> {
        segment_lines(self.new_text.as_deref().unwrap_or(&self.text))
    }
}

/// Compute the line-level edit script between two texts.
///
/// Both texts are normalized first. A line compares together with whether
/// it ends in a newline, so a missing final newline shows up as a change of
/// the last line. With `ignore_whitespace`, lines are compared with leading
/// and trailing whitespace (newline included) trimmed; matched lines keep
/// their original text on each side.
pub fn diff_lines(old: &str, new: &str, ignore_whitespace: bool) -> Vec<EditSegment> {
    let old = normalize(old);
    let new = normalize(new);
    let old_lines = text_lines(&old);
    let new_lines = text_lines(&new);

    let old_keys = comparison_keys(&old_lines, old.ends_with('\n'), ignore_whitespace);
    let new_keys = comparison_keys(&new_lines, new.ends_with('\n'), ignore_whitespace);

    let ops = capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys);
    let mut segments = Vec::with_capacity(ops.len() + 1);

    for op in &ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let old_text = join_lines(&old_lines[old_range]);
        let new_text = join_lines(&new_lines[new_range]);
        match tag {
            DiffTag::Equal if old_text == new_text => segments.push(EditSegment::equal(old_text)),
            DiffTag::Equal => {
                segments.push(EditSegment::equal_ignoring_whitespace(old_text, new_text))
            }
            DiffTag::Delete => segments.push(EditSegment::removed(old_text)),
            DiffTag::Insert => segments.push(EditSegment::added(new_text)),
            DiffTag::Replace => {
                segments.push(EditSegment::removed(old_text));
                segments.push(EditSegment::added(new_text));
            }
        }
    }

    debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        segments = segments.len(),
        ignore_whitespace,
        "computed line diff"
    );
    segments
}

/// Key for each line: its text and whether a newline terminates it.
fn comparison_keys<'a>(
    lines: &[&'a str],
    terminated: bool,
    ignore_whitespace: bool,
) -> Vec<(&'a str, bool)> {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, &line)| {
            if ignore_whitespace {
                (line.trim(), true)
            } else {
                (line, i < last || terminated)
            }
        })
        .collect()
}

fn join_lines(lines: &[&str]) -> String {
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}
