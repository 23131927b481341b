use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::buffer::TextBuffer;
use crate::host::{Position, RowView};

/// Placeholder drawn when the palette has no matching rows.
pub const EMPTY_PALETTE_TEXT: &str = "no matching command";

const GLYPH_COLUMN: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorVisualPosition {
    pub line: usize,
    pub column: u16,
}

/// Characters of one buffer line that share a visual row.
#[derive(Clone, Debug)]
struct VisualRow {
    line: usize,
    start: usize,
    widths: Vec<u16>,
    last_of_line: bool,
}

impl VisualRow {
    fn end(&self) -> usize {
        self.start + self.widths.len()
    }

    fn holds(&self, position: Position) -> bool {
        position.line == self.line
            && position.ch >= self.start
            && (position.ch < self.end() || (self.last_of_line && position.ch == self.end()))
    }

    fn column_of(&self, ch: usize) -> u16 {
        self.widths[..ch - self.start].iter().sum()
    }
}

/// Part of the buffer drawn with a different style, e.g. the trigger
/// fragment while the palette is open.
#[derive(Clone, Copy, Debug)]
pub struct Highlight {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub cursor: Option<CursorVisualPosition>,
    pub total_lines: usize,
    rows: Vec<VisualRow>,
}

impl RenderResult {
    /// Visual location of a buffer position.
    pub fn visual_position(&self, position: Position) -> Option<CursorVisualPosition> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.holds(position))
            .map(|(line, row)| CursorVisualPosition {
                line,
                column: row.column_of(position.ch),
            })
    }

    /// Buffer position drawn at `column` of visual row `line`. Columns past
    /// the end of the row map to its last position.
    pub fn position_at(&self, line: usize, column: u16) -> Option<Position> {
        let row = self.rows.get(line)?;
        let mut offset = 0u16;
        for (idx, width) in row.widths.iter().enumerate() {
            if column < offset + width {
                return Some(Position::new(row.line, row.start + idx));
            }
            offset += width;
        }
        let end = if row.last_of_line {
            row.end()
        } else {
            row.end().saturating_sub(1).max(row.start)
        };
        Some(Position::new(row.line, end))
    }
}

pub fn render_buffer(buffer: &TextBuffer, width: usize, highlight: Option<Highlight>) -> RenderResult {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut rows = Vec::new();

    for (line_index, text) in buffer.lines().enumerate() {
        let chars: Vec<char> = text.chars().collect();
        let ranges = wrap_line(&chars, width);
        let count = ranges.len();
        for (n, (start, end)) in ranges.into_iter().enumerate() {
            let marked = highlight
                .filter(|h| h.line == line_index)
                .map(|h| (h.start.clamp(start, end), h.end.clamp(start, end), h.style));
            lines.push(styled_row(&chars[start..end], start, marked));
            rows.push(VisualRow {
                line: line_index,
                start,
                widths: chars[start..end].iter().map(|ch| char_width(*ch) as u16).collect(),
                last_of_line: n + 1 == count,
            });
        }
    }

    let mut result = RenderResult {
        total_lines: lines.len(),
        lines,
        cursor: None,
        rows,
    };
    result.cursor = result.visual_position(buffer.cursor());
    result
}

/// Word-wraps a line into `[start, end)` character ranges no wider than
/// `width`. Words longer than a row are split.
fn wrap_line(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut used = 0;
    let mut last_break: Option<usize> = None;
    let mut idx = 0;

    while idx < chars.len() {
        let cell = char_width(chars[idx]);
        if used + cell > width && idx > start {
            let end = match last_break {
                Some(brk) if brk > start => brk,
                _ => idx,
            };
            ranges.push((start, end));
            start = end;
            used = chars[start..idx].iter().map(|ch| char_width(*ch)).sum();
            last_break = None;
            continue;
        }
        used += cell;
        if chars[idx].is_whitespace() {
            last_break = Some(idx + 1);
        }
        idx += 1;
    }

    ranges.push((start, chars.len()));
    ranges
}

fn styled_row(chars: &[char], offset: usize, marked: Option<(usize, usize, Style)>) -> Line<'static> {
    let text = |range: std::ops::Range<usize>| -> String {
        chars[range.start - offset..range.end - offset]
            .iter()
            .map(|ch| if *ch == '\t' { ' ' } else { *ch })
            .collect()
    };
    let end = offset + chars.len();

    match marked {
        Some((from, to, style)) if from < to => {
            let mut spans = Vec::new();
            if from > offset {
                spans.push(Span::raw(text(offset..from)));
            }
            spans.push(Span::styled(text(from..to), style));
            if to < end {
                spans.push(Span::raw(text(to..end)));
            }
            Line::from(spans)
        }
        _ => Line::from(text(offset..end)),
    }
}

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        1
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

pub fn visible_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Width of the popup's text area: a fixed glyph column plus the widest
/// label.
pub fn popup_content_width(rows: &[RowView]) -> u16 {
    let labels = rows
        .iter()
        .map(|row| visible_width(row.label))
        .max()
        .unwrap_or(0);
    (GLYPH_COLUMN + 1 + labels).max(visible_width(EMPTY_PALETTE_TEXT)) as u16
}

/// Text drawn in the glyph column, padded to its fixed width.
pub fn glyph_cell(glyph: &str) -> String {
    let width = visible_width(glyph);
    let mut cell: String = if width > GLYPH_COLUMN {
        glyph.chars().take(GLYPH_COLUMN).collect()
    } else {
        glyph.to_string()
    };
    cell.extend(std::iter::repeat_n(' ', GLYPH_COLUMN.saturating_sub(width) + 1));
    cell
}

/// Where to draw a bordered popup with `rows` rows next to `anchor`, an
/// absolute screen cell. Prefers the row below the anchor and flips above
/// it when there is no room.
pub fn popup_area(anchor: (u16, u16), rows: usize, content_width: u16, area: Rect) -> Rect {
    let height = (rows.max(1) as u16 + 2).min(area.height);
    let width = (content_width + 2).min(area.width);
    let (x, y) = anchor;

    let below = y.saturating_add(1);
    let top = if below + height <= area.bottom() {
        below
    } else {
        y.saturating_sub(height).max(area.y)
    };
    let left = x.min(area.right().saturating_sub(width)).max(area.x);

    Rect::new(left, top, width, height)
}

/// Index of the popup row drawn at the absolute screen cell.
pub fn popup_row_at(popup: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column > popup.x
        && column + 1 < popup.right()
        && row > popup.y
        && row + 1 < popup.bottom();
    inside.then(|| (row - popup.y - 1) as usize)
}
