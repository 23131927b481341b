use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{self, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState,
    },
};
use tracing_subscriber::EnvFilter;

use pure_format::buffer::TextBuffer;
use pure_format::catalog::CommandCatalog;
use pure_format::config::Config;
use pure_format::host::{KeyOutcome, PopupView, Position, ViewUpdate};
use pure_format::palette::{Integration, Palette, PaletteKey, PaletteSettings};
use pure_format::render::{
    CursorVisualPosition, EMPTY_PALETTE_TEXT, Highlight, RenderResult, glyph_cell, popup_area,
    popup_content_width, popup_row_at, render_buffer,
};
use pure_format::terminal_host::TerminalHost;
use pure_format::theme::Theme;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const MOUSE_SCROLL_LINES: isize = 3;

/// Terminal text editor with an inline formatting palette.
#[derive(Debug, Parser)]
#[command(name = "pure-format", version, about)]
struct Args {
    /// File to edit. Created on first save if it does not exist.
    file: PathBuf,

    /// Read settings from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Character that opens the palette.
    #[arg(long, value_name = "CHAR")]
    trigger: Option<char>,

    /// How the editor drives the palette.
    #[arg(long, value_enum)]
    integration: Option<Integration>,

    /// Write diagnostics to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if let Some(trigger) = args.trigger {
        config.palette.trigger = trigger;
    }
    if let Some(integration) = args.integration {
        config.palette.integration = integration;
    }
    config.validate().context("invalid palette settings")?;

    init_logging(args.log_file.as_deref(), &config.logging.level)?;

    let (buffer, initial_status) = load_buffer(&args.file)?;
    let mut app = App::new(buffer, args.file, &config, initial_status);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn init_logging(log_file: Option<&Path>, level: &str) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {level:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_buffer(path: &Path) -> Result<(TextBuffer, Option<String>)> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok((TextBuffer::from_text(&content), None))
    } else {
        Ok((TextBuffer::new(), Some("New file".to_string())))
    }
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt)?;
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// What the palette needs to compare before and after an event.
#[derive(Clone, Copy)]
struct ViewSnapshot {
    revision: u64,
    cursor: Position,
    scroll_top: usize,
}

struct App {
    host: TerminalHost,
    palette: Option<Palette>,
    palette_settings: PaletteSettings,
    integration: Integration,
    theme: Theme,
    file_path: PathBuf,
    scroll_top: usize,
    last_view_height: usize,
    last_text_area: Rect,
    last_popup_area: Option<Rect>,
    last_render: Option<RenderResult>,
    follow_cursor: bool,
    should_quit: bool,
    dirty: bool,
    status_message: Option<(String, Instant)>,
    last_cursor_visual: Option<CursorVisualPosition>,
}

impl App {
    fn new(
        buffer: TextBuffer,
        path: PathBuf,
        config: &Config,
        initial_status: Option<String>,
    ) -> Self {
        let palette_settings = config.palette_settings();
        let palette = config
            .palette
            .enabled
            .then(|| Palette::new(palette_settings, CommandCatalog::builtin()));

        Self {
            host: TerminalHost::new(buffer),
            palette,
            palette_settings,
            integration: config.palette.integration,
            theme: Theme::new(),
            file_path: path,
            scroll_top: 0,
            last_view_height: 1,
            last_text_area: Rect::default(),
            last_popup_area: None,
            last_render: None,
            follow_cursor: true,
            should_quit: false,
            dirty: false,
            status_message: initial_status.map(|msg| (msg, Instant::now())),
            last_cursor_visual: None,
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let status_height = if area.height > 1 { 2 } else { 1 };
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(status_height)])
            .split(area);

        let editor_area = vertical[0];
        let status_area = vertical[1];

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(editor_area);
        let text_area = horizontal[0];
        let scrollbar_area = horizontal[1];

        let render = render_buffer(
            self.host.buffer(),
            text_area.width.max(1) as usize,
            self.trigger_highlight(),
        );
        let cursor_visual = render.cursor;
        self.last_cursor_visual = cursor_visual;

        let viewport_height = text_area.height as usize;
        self.last_view_height = viewport_height.max(1);
        self.last_text_area = text_area;
        self.adjust_scroll(&render, viewport_height);

        let paragraph = Paragraph::new(Text::from(render.lines.clone()))
            .style(Style::default().bg(self.theme.background))
            .scroll((self.scroll_top as u16, 0));
        frame.render_widget(paragraph, text_area);

        let mut scrollbar_state = ScrollbarState::new(render.total_lines).position(self.scroll_top);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(self.theme.scrollbar_knob_style())
            .track_style(self.theme.scrollbar_track_style());
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);

        if let Some(cursor) = cursor_visual
            && let Some((x, y)) = self.screen_cell(cursor)
        {
            frame.set_cursor_position(layout::Position::new(x, y));
        }

        let status_text = self.status_line(render.total_lines);
        let status_widget = Paragraph::new(Line::from(Span::styled(
            status_text,
            self.theme.status_bar_style(),
        )))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status_widget, status_area);

        self.last_popup_area = self
            .host
            .popup()
            .and_then(|view| self.render_palette(frame, view, &render, editor_area));
        self.last_render = Some(render);
    }

    /// Absolute screen cell of a visual position, if it is scrolled into
    /// view.
    fn screen_cell(&self, position: CursorVisualPosition) -> Option<(u16, u16)> {
        let area = self.last_text_area;
        let visible = position.line >= self.scroll_top
            && position.line < self.scroll_top + area.height as usize
            && area.width > 0;
        visible.then(|| {
            (
                area.x + position.column.min(area.width - 1),
                area.y + (position.line - self.scroll_top) as u16,
            )
        })
    }

    fn trigger_highlight(&self) -> Option<Highlight> {
        let span = self.palette.as_ref()?.span()?;
        let cursor = self.host.buffer().cursor();
        Some(Highlight {
            line: span.line,
            start: span.start,
            end: span.end_or(cursor.ch),
            style: self.theme.trigger_style(),
        })
    }

    fn render_palette(
        &self,
        frame: &mut Frame,
        view: &PopupView,
        render: &RenderResult,
        area: Rect,
    ) -> Option<Rect> {
        if area.width < 3 || area.height < 3 {
            return None;
        }
        let anchor = render.visual_position(view.anchor)?;
        let cell = self.screen_cell(anchor)?;
        let popup = popup_area(cell, view.rows.len(), popup_content_width(&view.rows), area);

        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = if view.rows.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                EMPTY_PALETTE_TEXT,
                self.theme.empty_style(),
            )))]
        } else {
            view.rows
                .iter()
                .map(|row| {
                    ListItem::new(Line::from(vec![
                        Span::styled(glyph_cell(row.glyph.text()), self.theme.glyph_style(row.group)),
                        Span::styled(row.label, self.theme.label_style(row.group)),
                    ]))
                })
                .collect()
        };

        let mut state = ListState::default();
        state.select(view.selected);

        let list = List::new(items)
            .highlight_style(self.theme.menu_selected_style())
            .style(self.theme.menu_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(self.theme.menu_style())
                    .border_style(self.theme.menu_border_style()),
            );

        frame.render_stateful_widget(list, popup, &mut state);
        Some(popup)
    }

    fn status_line(&mut self, total_lines: usize) -> String {
        self.prune_status_message();
        let cursor_details = self.cursor_status_text();
        if let Some((message, _)) = &self.status_message {
            return format!("{cursor_details} | {message}");
        }

        let marker = if self.dirty { "*" } else { "" };
        let palette = if self.palette.is_some() {
            format!("palette {}", self.palette_settings.trigger)
        } else {
            "palette off".to_string()
        };
        format!(
            "{} | {}{} | Lines: {} | {} | F2 toggle | Ctrl-S save | Ctrl-Q quit",
            cursor_details,
            self.file_path.display(),
            marker,
            total_lines,
            palette
        )
    }

    fn prune_status_message(&mut self) {
        if let Some((_, instant)) = &self.status_message
            && instant.elapsed() > STATUS_TIMEOUT
        {
            self.status_message = None;
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn adjust_scroll(&mut self, render: &RenderResult, viewport_height: usize) {
        let viewport = viewport_height.max(1);
        let max_scroll = render.total_lines.saturating_sub(viewport);
        if self.follow_cursor
            && let Some(cursor) = &render.cursor
        {
            if cursor.line < self.scroll_top {
                self.scroll_top = cursor.line;
            } else if cursor.line >= self.scroll_top + viewport {
                self.scroll_top = (cursor.line + 1).saturating_sub(viewport);
            }
        }
        if self.scroll_top > max_scroll {
            self.scroll_top = max_scroll;
        }
    }

    fn scroll_by_lines(&mut self, delta: isize) {
        let total = self
            .last_render
            .as_ref()
            .map_or(0, |render| render.total_lines);
        let max_scroll = total.saturating_sub(self.last_view_height);
        self.scroll_top = self.scroll_top.saturating_add_signed(delta).min(max_scroll);
        self.follow_cursor = false;
    }

    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            revision: self.host.buffer().revision(),
            cursor: self.host.buffer().cursor(),
            scroll_top: self.scroll_top,
        }
    }

    /// Tells the palette what happened since `before`, in the style the
    /// configuration asked for. `key` is the key the editor just applied.
    fn sync_palette(&mut self, before: ViewSnapshot, key: Option<PaletteKey>) {
        let doc_changed = self.host.buffer().revision() != before.revision;
        if doc_changed {
            self.dirty = true;
        }
        let update = ViewUpdate {
            doc_changed,
            viewport_changed: self.scroll_top != before.scroll_top,
            selection_changed: self.host.buffer().cursor() != before.cursor,
        };

        let Some(palette) = self.palette.as_mut() else {
            return;
        };
        match self.integration {
            Integration::Keydown => {
                if let Some(key) = key {
                    palette.after_key(&mut self.host, key);
                }
            }
            Integration::ViewUpdate => palette.on_view_update(&mut self.host, update),
        }
    }

    fn toggle_palette(&mut self) {
        match self.palette.take() {
            Some(palette) => {
                palette.deactivate(&mut self.host);
                self.set_status("Format palette off");
            }
            None => {
                self.palette = Some(Palette::new(
                    self.palette_settings,
                    CommandCatalog::builtin(),
                ));
                self.set_status(format!(
                    "Format palette on, type {} to open it",
                    self.palette_settings.trigger
                ));
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers)?,
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            Event::Resize(..) => {
                if let Some(palette) = self.palette.as_mut()
                    && self.integration == Integration::ViewUpdate
                {
                    palette.on_view_update(&mut self.host, ViewUpdate {
                        viewport_changed: true,
                        ..ViewUpdate::default()
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        let before = self.snapshot();
        let key = PaletteKey::from(code);

        if self.host.is_intercepting()
            && let Some(palette) = self.palette.as_mut()
            && palette.handle_key(&mut self.host, key) == KeyOutcome::Consumed
        {
            self.follow_cursor = true;
            self.sync_palette(before, None);
            return Ok(());
        }

        match (code, modifiers) {
            (KeyCode::Char('q'), m) | (KeyCode::Char('c'), m)
                if m.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return Ok(());
            }
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => {
                return self.save();
            }
            (KeyCode::F(2), _) => {
                self.toggle_palette();
                return Ok(());
            }
            (KeyCode::PageUp, _) => {
                self.scroll_by_lines(-(self.last_view_height.max(1) as isize));
            }
            (KeyCode::PageDown, _) => {
                self.scroll_by_lines(self.last_view_height.max(1) as isize);
            }
            _ => self.apply_editing_key(code, modifiers),
        }

        if self.host.buffer().cursor() != before.cursor {
            self.follow_cursor = true;
        }
        self.sync_palette(before, Some(key));
        Ok(())
    }

    fn apply_editing_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let buffer = self.host.buffer_mut();
        match (code, modifiers) {
            (KeyCode::Left, m) if m.contains(KeyModifiers::CONTROL) => {
                buffer.move_word_left();
            }
            (KeyCode::Right, m) if m.contains(KeyModifiers::CONTROL) => {
                buffer.move_word_right();
            }
            (KeyCode::Left, _) => {
                buffer.move_left();
            }
            (KeyCode::Right, _) => {
                buffer.move_right();
            }
            (KeyCode::Up, _) => {
                buffer.move_up();
            }
            (KeyCode::Down, _) => {
                buffer.move_down();
            }
            (KeyCode::Home, _) => {
                buffer.move_line_start();
            }
            (KeyCode::End, _) => {
                buffer.move_line_end();
            }
            (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                buffer.move_line_start();
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                buffer.move_line_end();
            }
            (KeyCode::Backspace, _) => {
                buffer.backspace();
            }
            (KeyCode::Delete, _) => {
                buffer.delete();
            }
            (KeyCode::Enter, _) => {
                buffer.insert_newline();
            }
            (KeyCode::Tab, _) => {
                buffer.insert_char('\t');
            }
            (KeyCode::Char(ch), m)
                if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
            {
                buffer.insert_char(ch);
            }
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        let before = self.snapshot();
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_by_lines(-MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollDown => self.scroll_by_lines(MOUSE_SCROLL_LINES),
            MouseEventKind::Down(MouseButton::Left) => self.handle_mouse_down(event),
            _ => return,
        }
        self.sync_palette(before, None);
    }

    fn handle_mouse_down(&mut self, event: MouseEvent) {
        if let Some(popup) = self.last_popup_area
            && rect_contains(popup, event.column, event.row)
        {
            if let Some(row) = popup_row_at(popup, event.column, event.row)
                && let Some(palette) = self.palette.as_mut()
                && palette.click_row(&mut self.host, row)
            {
                self.follow_cursor = true;
            }
            return;
        }

        let Some(position) = self.position_from_mouse(event.column, event.row) else {
            return;
        };
        self.host.buffer_mut().set_cursor(position);
        self.follow_cursor = true;

        // Keydown hosts only rescan on keys, so a click away ends the popup.
        if self.integration == Integration::Keydown
            && let Some(palette) = self.palette.as_mut()
        {
            palette.close(&mut self.host);
        }
    }

    fn position_from_mouse(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.last_text_area;
        if !rect_contains(area, column, row) {
            return None;
        }
        let render = self.last_render.as_ref()?;
        let line = self.scroll_top + (row - area.y) as usize;
        render.position_at(line, column - area.x)
    }

    fn on_tick(&mut self) {
        self.prune_status_message();
    }

    fn save(&mut self) -> Result<()> {
        fs::write(&self.file_path, self.host.buffer().to_text())
            .with_context(|| format!("failed to write {}", self.file_path.display()))?;

        self.dirty = false;
        self.set_status("Saved");
        Ok(())
    }

    fn cursor_status_text(&self) -> String {
        let cursor = self.host.buffer().cursor();
        let mut text = format!("[{},{}]", cursor.line + 1, cursor.ch + 1);
        if self.last_cursor_visual.is_none() {
            text.push_str(" (off screen)");
        }
        text
    }
}
