use super::trigger::TriggerSpan;
use crate::catalog::{CommandEntry, FormatContext};
use crate::host::{EditorHost, Position};

/// Deletes the trigger text covered by `span`, then inserts `entry`'s
/// output at the cursor and places the cursor where the formatter wants it.
///
/// The formatter sees the line as it is after the deletion. Returns false
/// when the host has no cursor, in which case nothing is changed.
pub fn confirm<H>(host: &mut H, span: &TriggerSpan, entry: &CommandEntry) -> bool
where
    H: EditorHost + ?Sized,
{
    let Some(context) = host.cursor_context() else {
        return false;
    };
    let from = Position::new(span.line, span.start);
    let to = Position::new(span.line, span.end_or(context.position.ch));
    host.replace_range("", from, to);

    let Some(context) = host.cursor_context() else {
        return false;
    };
    let at = context.position;
    let insertion = entry.apply(&FormatContext::new(context.line, at.ch));
    host.replace_range(&insertion.text, at, at);
    host.set_cursor(at.advanced_by(insertion.text_before_cursor()));

    tracing::debug!(
        command = %entry.id,
        line = span.line,
        start = span.start,
        inserted = %insertion.text,
        "applied format command"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::catalog::{CommandGroup, FormatAction, Glyph};
    use crate::palette::trigger::TriggerScanner;
    use crate::terminal_host::TerminalHost;

    fn host(text: &str, cursor: Position) -> TerminalHost {
        let mut buffer = TextBuffer::from_text(text);
        buffer.set_cursor(cursor);
        TerminalHost::new(buffer)
    }

    fn bold() -> CommandEntry {
        CommandEntry::new(
            CommandGroup::Plain,
            "plain.bold",
            "bold",
            Glyph::Icon("B"),
            FormatAction::Wrap {
                open: "**",
                close: "**",
            },
        )
    }

    fn scan(host: &TerminalHost) -> TriggerSpan {
        let context = host.cursor_context().unwrap();
        TriggerScanner::new('#', Some('$'))
            .scan(context.position.line, context.line, context.position.ch)
            .unwrap()
    }

    #[test]
    fn replaces_exactly_the_span() {
        let mut host = host("foo #bar baz", Position::new(0, 6));
        let span = scan(&host);
        assert!(confirm(&mut host, &span, &bold()));
        assert_eq!(host.buffer().to_text(), "foo **** baz");
        assert_eq!(host.buffer().cursor(), Position::new(0, 6));
    }

    #[test]
    fn deletion_alone_leaves_rest_of_line() {
        let empty = CommandEntry::new(
            CommandGroup::Plain,
            "plain.none",
            "none",
            Glyph::Icon(" "),
            FormatAction::Wrap { open: "", close: "" },
        );
        let mut host = host("foo #bar baz", Position::new(0, 8));
        let span = scan(&host);
        assert!(confirm(&mut host, &span, &empty));
        assert_eq!(host.buffer().to_text(), "foo  baz");
        assert_eq!(host.buffer().cursor(), Position::new(0, 4));
    }

    #[test]
    fn open_ended_span_ends_at_cursor() {
        let mut host = host("x #alp", Position::new(0, 6));
        let span = scan(&host);
        let alpha = CommandEntry::new(
            CommandGroup::GreekLower,
            "greek-lowercase.alpha",
            "alpha",
            Glyph::Letter("α"),
            FormatAction::MathSymbol("\\alpha"),
        );
        assert!(confirm(&mut host, &span, &alpha));
        assert_eq!(host.buffer().to_text(), "x $\\alpha$");
        assert_eq!(host.buffer().cursor(), Position::new(0, 10));
    }

    #[test]
    fn formatter_sees_line_without_trigger() {
        // After "#q" is gone the cursor sits at the start of the line.
        let mut host = host("text\n#q", Position::new(1, 2));
        let span = scan(&host);
        let quote = CommandEntry::new(
            CommandGroup::Plain,
            "plain.quote",
            "quote",
            Glyph::Icon(">"),
            FormatAction::LinePrefix("> "),
        );
        assert!(confirm(&mut host, &span, &quote));
        assert_eq!(host.buffer().to_text(), "text\n> ");
        assert_eq!(host.buffer().cursor(), Position::new(1, 2));
    }

    #[test]
    fn line_prefix_mid_line_moves_cursor_to_next_line() {
        let mut host = host("abc #h", Position::new(0, 6));
        let span = scan(&host);
        let heading = CommandEntry::new(
            CommandGroup::Plain,
            "plain.heading-1",
            "heading 1",
            Glyph::Icon("1"),
            FormatAction::LinePrefix("# "),
        );
        assert!(confirm(&mut host, &span, &heading));
        assert_eq!(host.buffer().to_text(), "abc \n# ");
        assert_eq!(host.buffer().cursor(), Position::new(1, 2));
    }
}
