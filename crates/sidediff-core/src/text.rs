//! Line-ending normalization and line splitting.

use std::borrow::Cow;

/// Collapse `\r\n` and lone `\r` line terminators to `\n`.
pub fn normalize(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Number of `\n`-separated pieces in the normalized text.
///
/// This is the count shown next to each input: an empty text counts as one
/// line and a trailing newline opens a new (empty) line.
pub fn count_lines(text: &str) -> usize {
    normalize(text).split('\n').count()
}

/// Split a whole normalized text into the lines fed to the line diff.
///
/// A trailing newline terminates the last line rather than starting a new
/// one. An empty text is a single empty line, never zero lines.
pub fn text_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }
    segment_lines(text)
}

/// Split a segment blob into lines, dropping the empty entry left behind by
/// a trailing newline.
pub fn segment_lines(blob: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = blob.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}
