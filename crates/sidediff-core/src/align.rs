//! Row alignment: turns a line-level edit script into side-by-side rows.
//!
//! Removed runs are held back until the next segment is known. A removed run
//! directly followed by an added run is paired position by position into
//! `Changed` rows; whatever is left over on the longer side becomes plain
//! `Deleted` or `Added` rows.

use serde::Serialize;
use tracing::debug;

use crate::line_diff::{diff_lines, EditSegment, SegmentKind};

/// Classification of one rendered line pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// Same line on both sides.
    Equal,
    /// Line only on the old (left) side.
    Deleted,
    /// Line only on the new (right) side.
    Added,
    /// Old line replaced by a new line.
    Changed,
}

/// One rendered line pair.
///
/// `left_line` is present for `Equal`, `Deleted`, and `Changed` rows;
/// `right_line` for `Equal`, `Added`, and `Changed` rows. A line number is
/// present exactly when its side's line is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    /// How the two sides of this row relate.
    pub kind: RowKind,
    /// Old-side line text, without its newline.
    pub left_line: Option<String>,
    /// New-side line text, without its newline.
    pub right_line: Option<String>,
    /// 1-based line number in the old text.
    pub left_line_number: Option<usize>,
    /// 1-based line number in the new text.
    pub right_line_number: Option<usize>,
}

/// Per-kind row counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RowSummary {
    /// Number of `Equal` rows.
    pub equal: usize,
    /// Number of `Deleted` rows.
    pub deleted: usize,
    /// Number of `Added` rows.
    pub added: usize,
    /// Number of `Changed` rows.
    pub changed: usize,
}

impl RowSummary {
    /// Count the rows of each kind.
    pub fn from_rows(rows: &[Row]) -> Self {
        rows.iter().fold(Self::default(), |mut summary, row| {
            match row.kind {
                RowKind::Equal => summary.equal += 1,
                RowKind::Deleted => summary.deleted += 1,
                RowKind::Added => summary.added += 1,
                RowKind::Changed => summary.changed += 1,
            }
            summary
        })
    }

    /// Returns `true` if every row is `Equal`.
    pub fn is_identical(&self) -> bool {
        self.deleted == 0 && self.added == 0 && self.changed == 0
    }
}

/// Accumulates rows while handing out line numbers for each side.
struct RowBuilder {
    rows: Vec<Row>,
    old_no: usize,
    new_no: usize,
}

impl RowBuilder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            old_no: 1,
            new_no: 1,
        }
    }

    fn next_old(&mut self) -> usize {
        let n = self.old_no;
        self.old_no += 1;
        n
    }

    fn next_new(&mut self) -> usize {
        let n = self.new_no;
        self.new_no += 1;
        n
    }

    fn equal(&mut self, left: &str, right: &str) {
        let row = Row {
            kind: RowKind::Equal,
            left_line: Some(left.to_string()),
            right_line: Some(right.to_string()),
            left_line_number: Some(self.next_old()),
            right_line_number: Some(self.next_new()),
        };
        self.rows.push(row);
    }

    fn deleted(&mut self, left: &str) {
        let row = Row {
            kind: RowKind::Deleted,
            left_line: Some(left.to_string()),
            right_line: None,
            left_line_number: Some(self.next_old()),
            right_line_number: None,
        };
        self.rows.push(row);
    }

    fn added(&mut self, right: &str) {
        let row = Row {
            kind: RowKind::Added,
            left_line: None,
            right_line: Some(right.to_string()),
            left_line_number: None,
            right_line_number: Some(self.next_new()),
        };
        self.rows.push(row);
    }

    fn changed(&mut self, left: &str, right: &str) {
        let row = Row {
            kind: RowKind::Changed,
            left_line: Some(left.to_string()),
            right_line: Some(right.to_string()),
            left_line_number: Some(self.next_old()),
            right_line_number: Some(self.next_new()),
        };
        self.rows.push(row);
    }

    fn flush_removed(&mut self, removed: &mut Vec<&str>) {
        for line in removed.drain(..) {
            self.deleted(line);
        }
    }

    /// Pair a buffered removed run against an added run, index by index.
    fn pair(&mut self, removed: &mut Vec<&str>, added: &[&str]) {
        let len = removed.len().max(added.len());
        for i in 0..len {
            match (removed.get(i), added.get(i)) {
                (Some(left), Some(right)) => self.changed(left, right),
                (Some(left), None) => self.deleted(left),
                (None, Some(right)) => self.added(right),
                (None, None) => break,
            }
        }
        removed.clear();
    }
}

/// Align a line-level edit script into side-by-side rows.
pub fn align(segments: &[EditSegment]) -> Vec<Row> {
    let mut builder = RowBuilder::new();
    let mut removed: Vec<&str> = Vec::new();

    for segment in segments {
        match segment.kind {
            SegmentKind::Removed => removed.extend(segment.lines()),
            SegmentKind::Added => {
                let added = segment.lines();
                if removed.is_empty() {
                    for line in added {
                        builder.added(line);
                    }
                } else {
                    builder.pair(&mut removed, &added);
                }
            }
            SegmentKind::Equal => {
                builder.flush_removed(&mut removed);
                for (left, right) in segment.lines().into_iter().zip(segment.new_lines()) {
                    builder.equal(left, right);
                }
            }
        }
    }
    builder.flush_removed(&mut removed);

    builder.rows
}

/// Diff two texts and align the result.
pub fn compare(old: &str, new: &str, ignore_whitespace: bool) -> Vec<Row> {
    let rows = align(&diff_lines(old, new, ignore_whitespace));
    debug!(rows = rows.len(), "aligned rows");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::text::{normalize, text_lines};

    type RowShape<'a> = (RowKind, Option<&'a str>, Option<&'a str>, Option<usize>, Option<usize>);

    fn shape(rows: &[Row]) -> Vec<RowShape<'_>> {
        rows.iter()
            .map(|r| {
                (
                    r.kind,
                    r.left_line.as_deref(),
                    r.right_line.as_deref(),
                    r.left_line_number,
                    r.right_line_number,
                )
            })
            .collect()
    }

    #[test]
    fn identity_yields_only_equal_rows() {
        let text = "one\ntwo\nthree";
        let rows = compare(text, text, false);
        assert_eq!(rows.len(), 3);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.kind, RowKind::Equal);
            assert_eq!(row.left_line_number, Some(i + 1));
            assert_eq!(row.right_line_number, Some(i + 1));
        }
        assert!(RowSummary::from_rows(&rows).is_identical());
    }

    #[test]
    fn pure_insertion() {
        let rows = compare("a\nb", "a\nx\nb", false);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Equal, Some("a"), Some("a"), Some(1), Some(1)),
                (RowKind::Added, None, Some("x"), None, Some(2)),
                (RowKind::Equal, Some("b"), Some("b"), Some(2), Some(3)),
            ]
        );
    }

    #[test]
    fn pure_deletion() {
        let rows = compare("a\nb\nc", "a\nc", false);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Equal, Some("a"), Some("a"), Some(1), Some(1)),
                (RowKind::Deleted, Some("b"), None, Some(2), None),
                (RowKind::Equal, Some("c"), Some("c"), Some(3), Some(2)),
            ]
        );
    }

    #[test]
    fn replacement_with_longer_removed_run() {
        let rows = compare("x\ny", "z", false);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Changed, Some("x"), Some("z"), Some(1), Some(1)),
                (RowKind::Deleted, Some("y"), None, Some(2), None),
            ]
        );
    }

    #[test]
    fn replacement_with_longer_added_run() {
        let segments = vec![
            EditSegment::removed("x\n"),
            EditSegment::added("p\nq\nr\n"),
        ];
        let rows = align(&segments);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Changed, Some("x"), Some("p"), Some(1), Some(1)),
                (RowKind::Added, None, Some("q"), None, Some(2)),
                (RowKind::Added, None, Some("r"), None, Some(3)),
            ]
        );
    }

    #[test]
    fn missing_final_newline_is_a_changed_last_line() {
        let rows = compare("a\nb", "a\nb\n", false);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Equal, Some("a"), Some("a"), Some(1), Some(1)),
                (RowKind::Changed, Some("b"), Some("b"), Some(2), Some(2)),
            ]
        );
        assert!(!RowSummary::from_rows(&rows).is_identical());
    }

    #[test]
    fn crlf_and_cr_texts_align_with_lf_text() {
        let rows = compare("a\r\nb\rc\n", "a\nb\nc\n", false);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.kind == RowKind::Equal));
    }

    #[test]
    fn empty_vs_empty_is_one_equal_row() {
        let rows = compare("", "", false);
        assert_eq!(
            shape(&rows),
            vec![(RowKind::Equal, Some(""), Some(""), Some(1), Some(1))]
        );
    }

    #[test]
    fn empty_script_yields_no_rows() {
        assert!(align(&[]).is_empty());
    }

    #[test]
    fn removed_run_before_equal_is_flushed_as_deleted() {
        let segments = vec![
            EditSegment::removed("gone\n"),
            EditSegment::equal("kept\n"),
            EditSegment::added("new\n"),
        ];
        let rows = align(&segments);
        assert_eq!(
            shape(&rows),
            vec![
                (RowKind::Deleted, Some("gone"), None, Some(1), None),
                (RowKind::Equal, Some("kept"), Some("kept"), Some(2), Some(1)),
                (RowKind::Added, None, Some("new"), None, Some(2)),
            ]
        );
    }

    #[test]
    fn trailing_removed_run_is_flushed() {
        let segments = vec![EditSegment::equal("a\n"), EditSegment::removed("b\nc\n")];
        let rows = align(&segments);
        let summary = RowSummary::from_rows(&rows);
        assert_eq!(summary.equal, 1);
        assert_eq!(summary.deleted, 2);
        assert_eq!(rows[2].left_line_number, Some(3));
    }

    #[test]
    fn consecutive_removed_segments_are_paired_together() {
        let segments = vec![
            EditSegment::removed("a\n"),
            EditSegment::removed("b\n"),
            EditSegment::added("c\nd\n"),
        ];
        let summary = RowSummary::from_rows(&align(&segments));
        assert_eq!(summary.changed, 2);
        assert_eq!(summary.deleted, 0);
    }

    #[test]
    fn ignore_whitespace_shows_each_side_verbatim() {
        let rows = compare("a\n\tb", "a\nb", true);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].kind, RowKind::Equal);
        assert_eq!(rows[1].left_line.as_deref(), Some("\tb"));
        assert_eq!(rows[1].right_line.as_deref(), Some("b"));
    }

    #[test]
    fn rows_serialize_with_snake_case_kind() {
        let rows = compare("a", "b", false);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["kind"], "changed");
        assert_eq!(json[0]["left_line_number"], 1);
    }

    fn terminator() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["\n", "\r\n", "\r"])
    }

    /// Lines joined by a mix of LF, CRLF, and CR, with an optional final
    /// terminator.
    fn text_strategy() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(("[ab ]{0,3}", terminator()), 0..8),
            prop::option::of(terminator()),
        )
            .prop_map(|(lines, last)| {
                let mut text = String::new();
                for (i, (line, sep)) in lines.iter().enumerate() {
                    if i > 0 {
                        text.push_str(sep);
                    }
                    text.push_str(line);
                }
                if let Some(last) = last {
                    text.push_str(last);
                }
                text
            })
    }

    fn expected_lines(text: &str) -> Vec<String> {
        text_lines(&normalize(text)).into_iter().map(String::from).collect()
    }

    fn side_lines(rows: &[Row], left: bool) -> Vec<String> {
        rows.iter()
            .filter_map(|r| if left { r.left_line.clone() } else { r.right_line.clone() })
            .collect()
    }

    fn side_numbers(rows: &[Row], left: bool) -> Vec<usize> {
        rows.iter()
            .filter_map(|r| if left { r.left_line_number } else { r.right_line_number })
            .collect()
    }

    proptest! {
        #[test]
        fn rows_cover_both_texts(old in text_strategy(), new in text_strategy(), ignore_ws: bool) {
            let rows = compare(&old, &new, ignore_ws);
            prop_assert_eq!(side_lines(&rows, true), expected_lines(&old));
            prop_assert_eq!(side_lines(&rows, false), expected_lines(&new));
        }

        #[test]
        fn line_numbers_count_up_from_one(old in text_strategy(), new in text_strategy()) {
            let rows = compare(&old, &new, false);
            let left = side_numbers(&rows, true);
            let right = side_numbers(&rows, false);
            prop_assert_eq!(left.clone(), (1..=left.len()).collect::<Vec<_>>());
            prop_assert_eq!(right.clone(), (1..=right.len()).collect::<Vec<_>>());
        }

        #[test]
        fn line_presence_follows_row_kind(old in text_strategy(), new in text_strategy()) {
            for row in compare(&old, &new, false) {
                let has_left =
                    matches!(row.kind, RowKind::Equal | RowKind::Deleted | RowKind::Changed);
                let has_right =
                    matches!(row.kind, RowKind::Equal | RowKind::Added | RowKind::Changed);
                prop_assert_eq!(row.left_line.is_some(), has_left);
                prop_assert_eq!(row.right_line.is_some(), has_right);
                prop_assert_eq!(row.left_line_number.is_some(), has_left);
                prop_assert_eq!(row.right_line_number.is_some(), has_right);
            }
        }
    }
}
