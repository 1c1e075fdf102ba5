//! Intra-line highlighting for a changed line pair.
//!
//! Each side keeps the parts it shares with the other side plus its own
//! changes: the left side shows what was removed, the right side what was
//! added.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// Granularity of the inline diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineMode {
    /// Words and the whitespace runs between them.
    Words,
    /// Individual characters.
    Chars,
}

/// How an inline span is emphasized on its side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Shared by both lines.
    None,
    /// Present only in the left line.
    Removed,
    /// Present only in the right line.
    Added,
}

/// A run of text within one side of a changed line pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    /// The span's text, whitespace included.
    pub text: String,
    /// Whether the span is shared or specific to its side.
    pub emphasis: Emphasis,
}

/// Compute the left and right spans of a changed line pair.
///
/// Concatenating the text of the left spans gives back `left`, and the right
/// spans give back `right`. Adjacent parts with the same emphasis are merged.
pub fn highlight(left: &str, right: &str, mode: InlineMode) -> (Vec<InlineSpan>, Vec<InlineSpan>) {
    let diff = match mode {
        InlineMode::Words => TextDiff::from_words(left, right),
        InlineMode::Chars => TextDiff::from_chars(left, right),
    };

    let mut left_spans = Vec::new();
    let mut right_spans = Vec::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                push_span(&mut left_spans, text, Emphasis::None);
                push_span(&mut right_spans, text, Emphasis::None);
            }
            ChangeTag::Delete => push_span(&mut left_spans, text, Emphasis::Removed),
            ChangeTag::Insert => push_span(&mut right_spans, text, Emphasis::Added),
        }
    }

    (left_spans, right_spans)
}

fn push_span(spans: &mut Vec<InlineSpan>, text: &str, emphasis: Emphasis) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.emphasis == emphasis => last.text.push_str(text),
        _ => spans.push(InlineSpan {
            text: text.to_string(),
            emphasis,
        }),
    }
}
