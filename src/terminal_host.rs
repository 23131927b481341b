use crate::buffer::TextBuffer;
use crate::host::{
    CursorContext, EditorHost, InterceptHandle, PopupId, PopupView, Position,
};

/// [`EditorHost`] backed by a [`TextBuffer`] and drawn by the terminal UI.
///
/// The host keeps the popup description the palette last asked for; the
/// UI layer reads it back each frame.
#[derive(Debug, Default)]
pub struct TerminalHost {
    buffer: TextBuffer,
    popup: Option<PopupView>,
    intercept: Option<InterceptHandle>,
    next_intercept: u64,
}

impl TerminalHost {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            ..Self::default()
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn popup(&self) -> Option<&PopupView> {
        self.popup.as_ref()
    }

    /// True while a key intercept is registered; key presses must then be
    /// offered to the palette first.
    pub fn is_intercepting(&self) -> bool {
        self.intercept.is_some()
    }
}

impl EditorHost for TerminalHost {
    fn cursor_context(&self) -> Option<CursorContext<'_>> {
        let position = self.buffer.cursor();
        let line = self.buffer.line(position.line)?;
        Some(CursorContext { position, line })
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        self.buffer.replace_range(text, from, to);
    }

    fn set_cursor(&mut self, position: Position) {
        self.buffer.set_cursor(position);
    }

    fn show_popup(&mut self, view: PopupView) {
        if self.popup.is_some() {
            tracing::warn!(id = view.id.0, "replacing a popup that was never hidden");
        }
        self.popup = Some(view);
    }

    fn highlight_row(&mut self, popup: PopupId, row: Option<usize>) {
        if let Some(view) = self.popup.as_mut().filter(|view| view.id == popup) {
            view.selected = row;
        }
    }

    fn hide_popup(&mut self, popup: PopupId) {
        if self.popup.as_ref().is_some_and(|view| view.id == popup) {
            self.popup = None;
        }
    }

    fn register_key_intercept(&mut self) -> InterceptHandle {
        self.next_intercept += 1;
        let handle = InterceptHandle(self.next_intercept);
        if let Some(previous) = self.intercept.replace(handle) {
            tracing::warn!(previous = previous.0, "key intercept registered twice");
        }
        handle
    }

    fn unregister_key_intercept(&mut self, handle: InterceptHandle) {
        if self.intercept == Some(handle) {
            self.intercept = None;
        }
    }
}
