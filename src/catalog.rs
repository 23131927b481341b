//! The formatting commands the palette can offer.
//!
//! Entries are grouped into five families which are always searched in
//! the same priority order. Every entry carries a stable [`CommandId`];
//! labels are for display and filtering only.

use std::fmt;

mod builtin;

/// Marks inline math in Markdown documents.
pub const MATH_DELIMITER: char = '$';

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandGroup {
    Plain,
    Html,
    GreekLower,
    GreekUpper,
    Latex,
}

impl CommandGroup {
    /// Groups in filtering priority order.
    pub const ALL: [CommandGroup; 5] = [
        CommandGroup::Plain,
        CommandGroup::Html,
        CommandGroup::GreekLower,
        CommandGroup::GreekUpper,
        CommandGroup::Latex,
    ];

    const fn index(self) -> usize {
        match self {
            CommandGroup::Plain => 0,
            CommandGroup::Html => 1,
            CommandGroup::GreekLower => 2,
            CommandGroup::GreekUpper => 3,
            CommandGroup::Latex => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandGroup::Plain => "plain",
            CommandGroup::Html => "html",
            CommandGroup::GreekLower => "greek-lowercase",
            CommandGroup::GreekUpper => "greek-uppercase",
            CommandGroup::Latex => "latex",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandId(&'static str);

impl CommandId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What a row shows in front of its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// A small pictogram standing in for the formatting it applies.
    Icon(&'static str),
    /// A text badge naming the family, e.g. `HTML`.
    Badge(&'static str),
    /// The character the command produces.
    Letter(&'static str),
    /// A rendered preview of a snippet.
    Preview(&'static str),
}

impl Glyph {
    pub fn text(&self) -> &'static str {
        match *self {
            Glyph::Icon(text) | Glyph::Badge(text) | Glyph::Letter(text) | Glyph::Preview(text) => {
                text
            }
        }
    }
}

/// Text to insert at the cursor and where the cursor ends up inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    /// Character offset into `text`.
    pub cursor: usize,
}

impl Insertion {
    fn new(text: String, cursor: usize) -> Self {
        Self { text, cursor }
    }

    /// The part of the text in front of the final cursor position.
    pub fn text_before_cursor(&self) -> &str {
        match self.text.char_indices().nth(self.cursor) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// The cursor line as it looks right before a formatter inserts its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatContext<'a> {
    pub line: &'a str,
    pub cursor: usize,
}

impl<'a> FormatContext<'a> {
    pub fn new(line: &'a str, cursor: usize) -> Self {
        Self { line, cursor }
    }

    /// True when an odd number of unescaped math delimiters precede the
    /// cursor.
    pub fn in_math(&self) -> bool {
        let mut open = false;
        let mut escaped = false;
        for ch in self.line.chars().take(self.cursor) {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                MATH_DELIMITER => open = !open,
                _ => {}
            }
        }
        open
    }

    fn at_line_start(&self) -> bool {
        self.line
            .chars()
            .take(self.cursor)
            .all(|ch| ch.is_whitespace())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatAction {
    /// Surround the cursor with Markdown markers.
    Wrap {
        open: &'static str,
        close: &'static str,
    },
    /// Start a block construct; breaks the line first unless the cursor is
    /// already at its start.
    LinePrefix(&'static str),
    /// Surround the cursor with an HTML element.
    HtmlTag(&'static str),
    /// A single LaTeX command such as `\alpha`.
    MathSymbol(&'static str),
    /// A LaTeX template; `cursor` is the character offset to land on.
    MathSnippet {
        snippet: &'static str,
        cursor: usize,
    },
}

impl FormatAction {
    pub fn apply(&self, context: &FormatContext<'_>) -> Insertion {
        match *self {
            FormatAction::Wrap { open, close } => {
                Insertion::new(format!("{open}{close}"), open.chars().count())
            }
            FormatAction::LinePrefix(prefix) => {
                let text = if context.at_line_start() {
                    prefix.to_string()
                } else {
                    format!("\n{prefix}")
                };
                let cursor = text.chars().count();
                Insertion::new(text, cursor)
            }
            FormatAction::HtmlTag(tag) => {
                let open = format!("<{tag}>");
                let cursor = open.chars().count();
                Insertion::new(format!("{open}</{tag}>"), cursor)
            }
            FormatAction::MathSymbol(command) => {
                let text = math(command, context.in_math());
                let cursor = text.chars().count();
                Insertion::new(text, cursor)
            }
            FormatAction::MathSnippet { snippet, cursor } => {
                if context.in_math() {
                    Insertion::new(snippet.to_string(), cursor)
                } else {
                    Insertion::new(math(snippet, false), cursor + 1)
                }
            }
        }
    }
}

fn math(body: &str, inside_math: bool) -> String {
    if inside_math {
        body.to_string()
    } else {
        format!("{MATH_DELIMITER}{body}{MATH_DELIMITER}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    pub id: CommandId,
    pub group: CommandGroup,
    pub label: &'static str,
    pub glyph: Glyph,
    pub action: FormatAction,
}

impl CommandEntry {
    pub const fn new(
        group: CommandGroup,
        id: &'static str,
        label: &'static str,
        glyph: Glyph,
        action: FormatAction,
    ) -> Self {
        Self {
            id: CommandId::new(id),
            group,
            label,
            glyph,
            action,
        }
    }

    pub fn apply(&self, context: &FormatContext<'_>) -> Insertion {
        self.action.apply(context)
    }
}

/// All entries, bucketed by group. Order within a group is insertion order.
#[derive(Clone, Debug, Default)]
pub struct CommandCatalog {
    groups: [Vec<CommandEntry>; 5],
}

impl CommandCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The formatting commands shipped with the editor.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.extend(builtin::PLAIN.iter().copied());
        catalog.extend(builtin::HTML.iter().copied());
        catalog.extend(builtin::GREEK_LOWER.iter().copied());
        catalog.extend(builtin::GREEK_UPPER.iter().copied());
        catalog.extend(builtin::LATEX.iter().copied());
        catalog
    }

    pub fn push(&mut self, entry: CommandEntry) {
        self.groups[entry.group.index()].push(entry);
    }

    pub fn with_entries(mut self, entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        self.extend(entries);
        self
    }

    pub fn group(&self, group: CommandGroup) -> &[CommandEntry] {
        &self.groups[group.index()]
    }

    /// Every entry in group priority order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        CommandGroup::ALL
            .iter()
            .flat_map(move |group| self.group(*group).iter())
    }

    pub fn get(&self, id: CommandId) -> Option<&CommandEntry> {
        self.entries().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<CommandEntry> for CommandCatalog {
    fn extend<T: IntoIterator<Item = CommandEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.push(entry);
        }
    }
}
