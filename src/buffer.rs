use crate::host::Position;

/// Plain-text document stored as lines, with a single cursor.
///
/// All column values are character offsets. Every mutation bumps
/// [`TextBuffer::revision`], which hosts use to detect document changes.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    preferred_column: Option<usize>,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            preferred_column: None,
            revision: 0,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self {
            lines,
            ..Self::new()
        }
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn line_len(&self, index: usize) -> usize {
        self.line(index).map_or(0, |line| line.chars().count())
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Nearest valid position to `position`.
    pub fn clamp(&self, position: Position) -> Position {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        Position::new(line, position.ch.min(self.line_len(line)))
    }

    pub fn set_cursor(&mut self, position: Position) -> bool {
        self.preferred_column = None;
        let position = self.clamp(position);
        if position == self.cursor {
            return false;
        }
        self.cursor = position;
        true
    }

    /// Replaces the text between `from` and `to` with `text`, which may
    /// span several lines.
    ///
    /// A cursor inside the replaced range, ends included, moves to the end
    /// of the inserted text. A cursor after the range shifts with it.
    pub fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let (from, to) = {
            let a = self.clamp(from);
            let b = self.clamp(to);
            if a <= b { (a, b) } else { (b, a) }
        };

        let head = &self.lines[from.line][..byte_offset(&self.lines[from.line], from.ch)];
        let tail = &self.lines[to.line][byte_offset(&self.lines[to.line], to.ch)..];
        let joined = format!("{head}{text}{tail}");
        let replacement: Vec<String> = joined.split('\n').map(str::to_string).collect();
        self.lines.splice(from.line..=to.line, replacement);

        let end = from.advanced_by(text);
        let cursor = self.cursor;
        self.cursor = if cursor < from {
            cursor
        } else if cursor <= to {
            end
        } else if cursor.line == to.line {
            Position::new(end.line, end.ch + (cursor.ch - to.ch))
        } else {
            Position::new(cursor.line + end.line - to.line, cursor.ch)
        };
        self.preferred_column = None;
        self.revision += 1;
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf))
    }

    pub fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let at = self.cursor;
        self.replace_range(text, at, at);
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_text("\n")
    }

    pub fn backspace(&mut self) -> bool {
        let to = self.cursor;
        let from = if to.ch > 0 {
            Position::new(to.line, to.ch - 1)
        } else if to.line > 0 {
            Position::new(to.line - 1, self.line_len(to.line - 1))
        } else {
            return false;
        };
        self.replace_range("", from, to);
        true
    }

    pub fn delete(&mut self) -> bool {
        let from = self.cursor;
        let to = if from.ch < self.line_len(from.line) {
            Position::new(from.line, from.ch + 1)
        } else if from.line + 1 < self.lines.len() {
            Position::new(from.line + 1, 0)
        } else {
            return false;
        };
        self.replace_range("", from, to);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let Position { line, ch } = self.cursor;
        if ch > 0 {
            self.set_cursor(Position::new(line, ch - 1))
        } else if line > 0 {
            self.set_cursor(Position::new(line - 1, self.line_len(line - 1)))
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        let Position { line, ch } = self.cursor;
        if ch < self.line_len(line) {
            self.set_cursor(Position::new(line, ch + 1))
        } else if line + 1 < self.lines.len() {
            self.set_cursor(Position::new(line + 1, 0))
        } else {
            false
        }
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor.line == 0 {
            return false;
        }
        self.move_vertically(self.cursor.line - 1);
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor.line + 1 >= self.lines.len() {
            return false;
        }
        self.move_vertically(self.cursor.line + 1);
        true
    }

    fn move_vertically(&mut self, line: usize) {
        let column = self.preferred_column.unwrap_or(self.cursor.ch);
        self.cursor = Position::new(line, column.min(self.line_len(line)));
        self.preferred_column = Some(column);
    }

    pub fn move_line_start(&mut self) -> bool {
        self.set_cursor(Position::new(self.cursor.line, 0))
    }

    pub fn move_line_end(&mut self) -> bool {
        let line = self.cursor.line;
        self.set_cursor(Position::new(line, self.line_len(line)))
    }

    pub fn move_word_left(&mut self) -> bool {
        let Position { line, ch } = self.cursor;
        if ch == 0 {
            return self.move_left();
        }
        let chars: Vec<char> = self.lines[line].chars().collect();
        let mut target = ch;
        while target > 0 && chars[target - 1].is_whitespace() {
            target -= 1;
        }
        while target > 0 && !chars[target - 1].is_whitespace() {
            target -= 1;
        }
        self.set_cursor(Position::new(line, target))
    }

    pub fn move_word_right(&mut self) -> bool {
        let Position { line, ch } = self.cursor;
        let chars: Vec<char> = self.lines[line].chars().collect();
        if ch >= chars.len() {
            return self.move_right();
        }
        let mut target = ch;
        while target < chars.len() && !chars[target].is_whitespace() {
            target += 1;
        }
        while target < chars.len() && chars[target].is_whitespace() {
            target += 1;
        }
        self.set_cursor(Position::new(line, target))
    }
}

pub(crate) fn byte_offset(line: &str, ch: usize) -> usize {
    line.char_indices()
        .nth(ch)
        .map_or(line.len(), |(idx, _)| idx)
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod buffer_tests;
