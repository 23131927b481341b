//! The seam between the palette and whatever editor hosts it.
//!
//! A host exposes its cursor, a way to replace text, a floating popup
//! surface and a keyboard intercept registration. The palette never
//! touches editor state through any other path.

use crate::catalog::{CommandGroup, CommandId, Glyph};

/// Well-known identifier of the one popup node the palette may own.
pub const PALETTE_POPUP_ID: PopupId = PopupId("format-palette");

/// Line/character position inside a document. `ch` counts characters,
/// not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    pub const fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// Position reached after typing `text` starting at `self`.
    pub fn advanced_by(self, text: &str) -> Self {
        let mut position = self;
        for ch in text.chars() {
            if ch == '\n' {
                position.line += 1;
                position.ch = 0;
            } else {
                position.ch += 1;
            }
        }
        position
    }
}

/// Snapshot of the cursor and the text of the line it sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorContext<'a> {
    pub position: Position,
    pub line: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PopupId(pub &'static str);

/// Token handed out by a host when the palette starts intercepting keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterceptHandle(pub u64);

/// Result of offering a key press to the palette before the editor sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The palette handled the key; the editor must not apply it.
    Consumed,
    /// The editor should process the key as usual.
    PassThrough,
}

/// Change flags a view-driven host reports after each event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_changed: bool,
}

impl ViewUpdate {
    pub fn is_relevant(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_changed
    }
}

/// One row of the popup as the host should draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub id: CommandId,
    pub group: CommandGroup,
    pub label: &'static str,
    pub glyph: Glyph,
}

/// Everything a host needs to draw the popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupView {
    pub id: PopupId,
    pub anchor: Position,
    pub rows: Vec<RowView>,
    pub selected: Option<usize>,
}

pub trait EditorHost {
    fn cursor_context(&self) -> Option<CursorContext<'_>>;

    /// Replaces `[from, to)` with `text`. A cursor inside the range, ends
    /// included, moves to the end of the inserted text; a cursor behind it
    /// shifts with the edit.
    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    fn set_cursor(&mut self, position: Position);

    fn show_popup(&mut self, view: PopupView);

    fn highlight_row(&mut self, popup: PopupId, row: Option<usize>);

    fn hide_popup(&mut self, popup: PopupId);

    fn register_key_intercept(&mut self) -> InterceptHandle;

    fn unregister_key_intercept(&mut self, handle: InterceptHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_by_counts_characters() {
        let start = Position::new(2, 3);
        assert_eq!(start.advanced_by("αβγ"), Position::new(2, 6));
    }

    #[test]
    fn advanced_by_crosses_lines() {
        let start = Position::new(0, 5);
        assert_eq!(start.advanced_by("```\n"), Position::new(1, 0));
        assert_eq!(start.advanced_by("a\nbc"), Position::new(1, 2));
    }

    #[test]
    fn view_update_relevance() {
        assert!(!ViewUpdate::default().is_relevant());
        let update = ViewUpdate {
            viewport_changed: true,
            ..ViewUpdate::default()
        };
        assert!(update.is_relevant());
    }
}
