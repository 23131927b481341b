//! The format palette: a popup of formatting commands that opens while the
//! cursor sits inside a trigger fragment such as `/bo`.
//!
//! [`Palette`] owns the only popup instance. Hosts feed it key presses and
//! view updates through one of two integration styles and it talks back
//! exclusively through [`EditorHost`].

pub mod filter;
pub mod replace;
pub mod selection;
pub mod trigger;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::catalog::{CommandCatalog, CommandEntry, CommandId, MATH_DELIMITER};
use crate::host::{
    EditorHost, InterceptHandle, KeyOutcome, PALETTE_POPUP_ID, PopupView, Position, RowView,
    ViewUpdate,
};

pub use filter::{VISIBLE_ROWS, filter};
pub use replace::confirm;
pub use selection::move_selection;
pub use trigger::{SpanEnd, TriggerScanner, TriggerSpan};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteSettings {
    pub trigger: char,
    /// Treated as whitespace when looking for the end of a fragment.
    pub boundary_escape: Option<char>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            trigger: '/',
            boundary_escape: Some(MATH_DELIMITER),
        }
    }
}

/// How the host drives the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Integration {
    /// Rescan after every key press via [`Palette::after_key`].
    #[default]
    Keydown,
    /// Rebuild whenever the host reports a change via
    /// [`Palette::on_view_update`].
    ViewUpdate,
}

/// The keys the palette distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteKey {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

impl From<KeyCode> for PaletteKey {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => PaletteKey::Up,
            KeyCode::Down => PaletteKey::Down,
            KeyCode::Enter => PaletteKey::Enter,
            KeyCode::Esc => PaletteKey::Escape,
            _ => PaletteKey::Other,
        }
    }
}

#[derive(Debug)]
struct PopupInstance {
    span: TriggerSpan,
    rows: Vec<CommandEntry>,
    selection: Option<CommandId>,
    intercept: InterceptHandle,
}

impl PopupInstance {
    fn ids(&self) -> Vec<CommandId> {
        self.rows.iter().map(|entry| entry.id).collect()
    }

    fn selected_row(&self) -> Option<usize> {
        let selection = self.selection?;
        self.rows.iter().position(|entry| entry.id == selection)
    }
}

pub struct Palette {
    scanner: TriggerScanner,
    catalog: CommandCatalog,
    popup: Option<PopupInstance>,
}

impl Palette {
    pub fn new(settings: PaletteSettings, catalog: CommandCatalog) -> Self {
        Self {
            scanner: TriggerScanner::new(settings.trigger, settings.boundary_escape),
            catalog,
            popup: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Span of the open popup.
    pub fn span(&self) -> Option<TriggerSpan> {
        self.popup.as_ref().map(|popup| popup.span)
    }

    pub fn visible_rows(&self) -> &[CommandEntry] {
        self.popup
            .as_ref()
            .map(|popup| popup.rows.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.popup.as_ref().and_then(PopupInstance::selected_row)
    }

    /// Offers a key press to the palette before the editor applies it.
    ///
    /// While open, arrow keys and Enter are consumed. Escape closes the
    /// popup but still reaches the editor.
    pub fn handle_key<H>(&mut self, host: &mut H, key: PaletteKey) -> KeyOutcome
    where
        H: EditorHost + ?Sized,
    {
        if self.popup.is_none() {
            return KeyOutcome::PassThrough;
        }
        tracing::trace!(?key, "palette key");

        match key {
            PaletteKey::Up => {
                self.step(host, -1);
                KeyOutcome::Consumed
            }
            PaletteKey::Down => {
                self.step(host, 1);
                KeyOutcome::Consumed
            }
            PaletteKey::Enter => {
                self.confirm_selected(host);
                KeyOutcome::Consumed
            }
            PaletteKey::Escape => {
                self.close(host);
                KeyOutcome::PassThrough
            }
            PaletteKey::Other => KeyOutcome::PassThrough,
        }
    }

    /// Keydown integration: runs after the editor has applied `key`.
    pub fn after_key<H>(&mut self, host: &mut H, key: PaletteKey)
    where
        H: EditorHost + ?Sized,
    {
        match key {
            PaletteKey::Up | PaletteKey::Down | PaletteKey::Enter => {}
            PaletteKey::Escape => self.close(host),
            PaletteKey::Other => self.refresh(host),
        }
    }

    /// View-update integration: rebuilds on any reported change.
    pub fn on_view_update<H>(&mut self, host: &mut H, update: ViewUpdate)
    where
        H: EditorHost + ?Sized,
    {
        if update.is_relevant() {
            self.refresh(host);
        }
    }

    /// Closes any open popup, rescans the cursor line and opens a fresh
    /// popup when the cursor sits inside a trigger span.
    pub fn refresh<H>(&mut self, host: &mut H)
    where
        H: EditorHost + ?Sized,
    {
        self.close(host);

        let Some(context) = host.cursor_context() else {
            return;
        };
        let cursor = context.position;
        let Some(span) = self.scanner.scan(cursor.line, context.line, cursor.ch) else {
            return;
        };
        let fragment = span.fragment(context.line, cursor.ch);
        let rows: Vec<CommandEntry> = filter(&fragment, &self.catalog)
            .into_iter()
            .copied()
            .collect();
        self.open(host, span, rows, cursor);
    }

    fn open<H>(&mut self, host: &mut H, span: TriggerSpan, rows: Vec<CommandEntry>, anchor: Position)
    where
        H: EditorHost + ?Sized,
    {
        debug_assert!(self.popup.is_none(), "refresh closes before opening");
        let selection = rows.first().map(|entry| entry.id);
        let view = PopupView {
            id: PALETTE_POPUP_ID,
            anchor,
            rows: rows
                .iter()
                .map(|entry| RowView {
                    id: entry.id,
                    group: entry.group,
                    label: entry.label,
                    glyph: entry.glyph,
                })
                .collect(),
            selected: selection.map(|_| 0),
        };

        tracing::debug!(
            line = span.line,
            start = span.start,
            rows = rows.len(),
            "opening format palette"
        );
        host.show_popup(view);
        let intercept = host.register_key_intercept();
        self.popup = Some(PopupInstance {
            span,
            rows,
            selection,
            intercept,
        });
    }

    /// Hides the popup and drops the key intercept together.
    pub fn close<H>(&mut self, host: &mut H)
    where
        H: EditorHost + ?Sized,
    {
        if let Some(popup) = self.popup.take() {
            Self::teardown(host, popup);
        }
    }

    fn teardown<H>(host: &mut H, popup: PopupInstance)
    where
        H: EditorHost + ?Sized,
    {
        tracing::debug!(line = popup.span.line, "closing format palette");
        host.hide_popup(PALETTE_POPUP_ID);
        host.unregister_key_intercept(popup.intercept);
    }

    fn step<H>(&mut self, host: &mut H, offset: isize)
    where
        H: EditorHost + ?Sized,
    {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        popup.selection = move_selection(popup.selection, offset, &popup.ids());
        let row = popup.selected_row();
        tracing::trace!(offset, ?row, "moved palette selection");
        host.highlight_row(PALETTE_POPUP_ID, row);
    }

    fn confirm_selected<H>(&mut self, host: &mut H)
    where
        H: EditorHost + ?Sized,
    {
        match self.selected_row() {
            Some(row) => {
                self.confirm_row(host, row);
            }
            None => self.close(host),
        }
    }

    /// Pointer confirmation of a visible row. Returns whether a command
    /// was applied.
    pub fn click_row<H>(&mut self, host: &mut H, row: usize) -> bool
    where
        H: EditorHost + ?Sized,
    {
        tracing::trace!(row, "palette row clicked");
        self.confirm_row(host, row)
    }

    /// Applies the entry shown at `row` and closes the popup. An
    /// out-of-range row leaves the popup untouched.
    pub fn confirm_row<H>(&mut self, host: &mut H, row: usize) -> bool
    where
        H: EditorHost + ?Sized,
    {
        let Some(entry) = self.popup.as_ref().and_then(|popup| popup.rows.get(row).copied())
        else {
            return false;
        };
        let Some(popup) = self.popup.take() else {
            return false;
        };

        let applied = confirm(host, &popup.span, &entry);
        Self::teardown(host, popup);
        applied
    }

    /// Disposes the palette, tearing down any live popup.
    pub fn deactivate<H>(mut self, host: &mut H)
    where
        H: EditorHost + ?Sized,
    {
        self.close(host);
        tracing::debug!("format palette deactivated");
    }
}

#[cfg(test)]
#[path = "palette_tests.rs"]
mod palette_tests;
