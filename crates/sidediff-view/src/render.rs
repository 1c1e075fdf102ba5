//! Side-by-side text rendering of aligned rows.
//!
//! Each row becomes a left cell and a right cell, each with a line-number
//! gutter and a one-character marker. A side without a line is drawn as a
//! blank placeholder. Widths are display columns, so wide characters take
//! two.

use colored::Colorize;
use sidediff_core::{highlight, Emphasis, Row, RowKind};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::prefs::DiffMode;

const SEPARATOR: &str = " │ ";
const TAB_WIDTH: usize = 4;
const MIN_CONTENT_WIDTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Deleted,
    Added,
    Changed,
    Removal,
    Addition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Piece {
    text: String,
    tone: Tone,
}

/// Draws rows as two fixed-width text columns.
#[derive(Clone, Debug)]
pub struct Renderer {
    width: usize,
    mode: DiffMode,
    wrap: bool,
    color: bool,
}

impl Renderer {
    pub fn new(width: usize, mode: DiffMode) -> Self {
        Self {
            width,
            mode,
            wrap: false,
            color: true,
        }
    }

    /// Wrap long lines onto continuation lines instead of truncating them.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Width of one pane, gutter included.
    pub fn pane_width(&self) -> usize {
        self.width.saturating_sub(SEPARATOR.width()) / 2
    }

    pub fn render(&self, rows: &[Row]) -> String {
        let number_width = rows
            .iter()
            .flat_map(|r| [r.left_line_number, r.right_line_number])
            .flatten()
            .max()
            .map_or(1, |n| n.to_string().len());
        let pane = self.pane_width();
        let content_width = pane
            .saturating_sub(number_width + 3)
            .max(MIN_CONTENT_WIDTH);

        let mut out = String::new();
        for row in rows {
            let (left, right) = self.row_pieces(row);
            let left_cell = self.cell(
                row.left_line_number,
                marker(row.kind, true),
                left,
                number_width,
                content_width,
            );
            let right_cell = self.cell(
                row.right_line_number,
                marker(row.kind, false),
                right,
                number_width,
                content_width,
            );

            let height = left_cell.len().max(right_cell.len());
            for i in 0..height {
                let (l, l_width) = left_cell.get(i).cloned().unwrap_or_default();
                let (r, _) = right_cell.get(i).cloned().unwrap_or_default();
                let mut line = l;
                line.push_str(&" ".repeat(pane.saturating_sub(l_width)));
                // A side with nothing to show ends the line at the separator.
                if r.is_empty() {
                    line.push_str(SEPARATOR.trim_end());
                } else {
                    line.push_str(SEPARATOR);
                    line.push_str(&r);
                }
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    fn row_pieces(&self, row: &Row) -> (Option<Vec<Piece>>, Option<Vec<Piece>>) {
        let base = match row.kind {
            RowKind::Equal => Tone::Plain,
            RowKind::Deleted => Tone::Deleted,
            RowKind::Added => Tone::Added,
            RowKind::Changed => Tone::Changed,
        };

        if let (RowKind::Changed, Some(inline), Some(left), Some(right)) = (
            row.kind,
            self.mode.inline(),
            row.left_line.as_deref(),
            row.right_line.as_deref(),
        ) {
            let (left_spans, right_spans) = highlight(left, right, inline);
            let to_pieces = |spans: Vec<sidediff_core::InlineSpan>| -> Vec<Piece> {
                spans
                    .into_iter()
                    .map(|span| Piece {
                        text: expand_tabs(&span.text),
                        tone: match span.emphasis {
                            Emphasis::None => Tone::Changed,
                            Emphasis::Removed => Tone::Removal,
                            Emphasis::Added => Tone::Addition,
                        },
                    })
                    .collect()
            };
            return (Some(to_pieces(left_spans)), Some(to_pieces(right_spans)));
        }

        let plain = |line: &Option<String>| {
            line.as_deref().map(|text| {
                vec![Piece {
                    text: expand_tabs(text),
                    tone: base,
                }]
            })
        };
        (plain(&row.left_line), plain(&row.right_line))
    }

    /// Lay out one side of a row. Each entry is the painted text and its
    /// display width. A side without a line is a single empty entry.
    fn cell(
        &self,
        number: Option<usize>,
        marker: char,
        pieces: Option<Vec<Piece>>,
        number_width: usize,
        content_width: usize,
    ) -> Vec<(String, usize)> {
        let Some(pieces) = pieces else {
            return vec![(String::new(), 0)];
        };
        let blank_gutter = " ".repeat(number_width + 3);

        let mut chunks = chunk(&pieces, content_width);
        if !self.wrap {
            chunks.truncate(1);
        }

        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let gutter = match (i, number) {
                    (0, Some(n)) => format!("{n:>number_width$} {marker} "),
                    _ => blank_gutter.clone(),
                };
                let visible =
                    gutter.width() + chunk.iter().map(|p| p.text.width()).sum::<usize>();
                let mut text = self.paint_gutter(&gutter);
                for piece in &chunk {
                    text.push_str(&self.paint(&piece.text, piece.tone));
                }
                (text, visible)
            })
            .collect()
    }

    fn paint_gutter(&self, gutter: &str) -> String {
        if self.color {
            gutter.dimmed().to_string()
        } else {
            gutter.to_string()
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Deleted => text.red().to_string(),
            Tone::Added => text.green().to_string(),
            Tone::Changed => text.yellow().to_string(),
            Tone::Removal => text.white().on_red().to_string(),
            Tone::Addition => text.black().on_green().to_string(),
        }
    }
}

fn marker(kind: RowKind, left: bool) -> char {
    match (kind, left) {
        (RowKind::Equal, _) => ' ',
        (RowKind::Changed, _) => '~',
        (RowKind::Deleted, true) => '-',
        (RowKind::Added, false) => '+',
        _ => ' ',
    }
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Split pieces into lines of at most `width` display columns, keeping tones.
///
/// A character wider than `width` still gets a line of its own.
fn chunk(pieces: &[Piece], width: usize) -> Vec<Vec<Piece>> {
    let mut lines: Vec<Vec<Piece>> = vec![Vec::new()];
    let mut used = 0;

    for piece in pieces {
        let mut current = String::new();
        for ch in piece.text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used > 0 && used + ch_width > width {
                if !current.is_empty() {
                    push_piece(&mut lines, std::mem::take(&mut current), piece.tone);
                }
                lines.push(Vec::new());
                used = 0;
            }
            current.push(ch);
            used += ch_width;
        }
        if !current.is_empty() {
            push_piece(&mut lines, current, piece.tone);
        }
    }
    lines
}

fn push_piece(lines: &mut [Vec<Piece>], text: String, tone: Tone) {
    if let Some(line) = lines.last_mut() {
        line.push(Piece { text, tone });
    }
}
