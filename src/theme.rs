use ratatui::style::{Color, Modifier, Style};

use crate::catalog::CommandGroup;

/// Colours for the editor and the format palette
#[derive(Clone, Debug)]
pub struct Theme {
    /// Background color for the editor
    pub background: Color,

    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Foreground color for the trigger fragment while the palette is open
    pub trigger_fg: Color,

    /// Background color for the trigger fragment while the palette is open
    pub trigger_bg: Color,

    /// Foreground color for the scrollbar knob
    pub scrollbar_knob_fg: Color,

    /// Foreground color for the scrollbar track
    pub scrollbar_track_fg: Color,

    /// Foreground color for palette rows
    pub menu_fg: Color,

    /// Background color for the palette
    pub menu_bg: Color,

    /// Border color for the palette
    pub menu_border: Color,

    /// Foreground color for the highlighted row
    pub menu_selected_fg: Color,

    /// Background color for the highlighted row
    pub menu_selected_bg: Color,

    /// Color of the glyph column
    pub glyph_fg: Color,

    /// Label color for HTML commands
    pub html_label: Color,

    /// Label color for Greek letters and LaTeX snippets
    pub math_label: Color,

    /// Color of the placeholder shown when nothing matches
    pub empty_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            trigger_fg: Color::Black,
            trigger_bg: Color::LightYellow,
            scrollbar_knob_fg: Color::Reset,
            scrollbar_track_fg: Color::DarkGray,
            menu_fg: Color::White,
            menu_bg: Color::Black,
            menu_border: Color::Gray,
            menu_selected_fg: Color::White,
            menu_selected_bg: Color::LightBlue,
            glyph_fg: Color::Gray,
            html_label: Color::Rgb(0x00, 0x55, 0xF2),
            math_label: Color::Rgb(0x25, 0xE7, 0x12),
            empty_fg: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    /// Style for the trigger character and the fragment typed after it
    pub fn trigger_style(&self) -> Style {
        Style::default().fg(self.trigger_fg).bg(self.trigger_bg)
    }

    pub fn scrollbar_knob_style(&self) -> Style {
        Style::default().fg(self.scrollbar_knob_fg)
    }

    pub fn scrollbar_track_style(&self) -> Style {
        Style::default().fg(self.scrollbar_track_fg)
    }

    pub fn menu_style(&self) -> Style {
        Style::default().fg(self.menu_fg).bg(self.menu_bg)
    }

    pub fn menu_border_style(&self) -> Style {
        Style::default().fg(self.menu_border).bg(self.menu_bg)
    }

    pub fn menu_selected_style(&self) -> Style {
        Style::default()
            .fg(self.menu_selected_fg)
            .bg(self.menu_selected_bg)
    }

    pub fn glyph_style(&self, group: CommandGroup) -> Style {
        let style = Style::default().fg(self.glyph_fg);
        match group {
            CommandGroup::Html => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }

    /// Label colour per command family
    pub fn label_style(&self, group: CommandGroup) -> Style {
        match group {
            CommandGroup::Plain => Style::default().fg(self.menu_fg),
            CommandGroup::Html => Style::default().fg(self.html_label),
            CommandGroup::GreekLower | CommandGroup::GreekUpper | CommandGroup::Latex => {
                Style::default().fg(self.math_label)
            }
        }
    }

    pub fn empty_style(&self) -> Style {
        Style::default()
            .fg(self.empty_fg)
            .add_modifier(Modifier::ITALIC)
    }
}
