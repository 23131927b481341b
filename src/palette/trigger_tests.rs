use proptest::prelude::*;

use super::*;

fn scanner() -> TriggerScanner {
    TriggerScanner::new('#', Some('$'))
}

fn delimited(start: usize, end: usize) -> Option<TriggerSpan> {
    Some(TriggerSpan {
        line: 0,
        start,
        end: SpanEnd::Delimited(end),
    })
}

#[test]
fn cursor_inside_fragment() {
    let span = scanner().scan(0, "x #ca y", 5);
    assert_eq!(span, delimited(2, 5));
    assert_eq!(span.unwrap().fragment("x #ca y", 5), "ca");
}

#[test]
fn cursor_past_delimiter_closes_span() {
    assert_eq!(scanner().scan(0, "x #ca y", 6), None);
}

#[test]
fn cursor_on_trigger_is_inside() {
    assert_eq!(scanner().scan(0, "x #ca y", 2), delimited(2, 5));
}

#[test]
fn cursor_before_trigger_is_outside() {
    assert_eq!(scanner().scan(0, "x #ca y", 1), None);
}

#[test]
fn missing_trigger_yields_nothing() {
    assert_eq!(scanner().scan(0, "plain text", 3), None);
    assert_eq!(scanner().scan(0, "", 0), None);
}

#[test]
fn open_ended_span_runs_to_cursor() {
    let line = "see #gam";
    let span = scanner().scan(4, line, 8).unwrap();
    assert_eq!(span.line, 4);
    assert_eq!(span.start, 4);
    assert_eq!(span.end, SpanEnd::OpenEnded);
    assert_eq!(span.fragment(line, 8), "gam");
    assert_eq!(span.fragment(line, 6), "g");
    assert_eq!(span.end_or(8), 8);
}

#[test]
fn bare_trigger_has_empty_fragment() {
    let span = scanner().scan(0, "#", 1).unwrap();
    assert_eq!(span.fragment("#", 1), "");
    assert_eq!(span.fragment("#", 0), "");
}

#[test]
fn second_trigger_wins_when_cursor_is_inside_it() {
    let line = "#one and #two";
    assert_eq!(scanner().scan(0, line, 12), Some(TriggerSpan {
        line: 0,
        start: 9,
        end: SpanEnd::OpenEnded,
    }));
    assert_eq!(scanner().scan(0, line, 2), delimited(0, 4));
    assert_eq!(scanner().scan(0, line, 6), None);
}

#[test]
fn adjacent_triggers_prefer_leftmost_candidate() {
    // Both occurrences cover offset 1; the scan stops at the first.
    assert_eq!(scanner().scan(0, "##ab", 1), Some(TriggerSpan {
        line: 0,
        start: 0,
        end: SpanEnd::OpenEnded,
    }));
}

#[test]
fn escape_character_acts_as_boundary() {
    let line = "$#alpha$ rest";
    assert_eq!(scanner().scan(0, line, 4), delimited(1, 7));
    assert_eq!(scanner().scan(0, line, 7), delimited(1, 7));
    assert_eq!(scanner().scan(0, line, 8), None);
}

#[test]
fn escape_can_be_disabled() {
    let scanner = TriggerScanner::new('#', None);
    assert_eq!(scanner.scan(0, "$#alpha$ rest", 8), delimited(1, 8));
}

#[test]
fn tabs_are_delimiters() {
    assert_eq!(scanner().scan(0, "#ab\tcd", 3), delimited(0, 3));
}

#[test]
fn offsets_count_characters() {
    let line = "αβ #δ x";
    let span = scanner().scan(0, line, 5).unwrap();
    assert_eq!(span, delimited(3, 5).unwrap());
    assert_eq!(span.fragment(line, 5), "δ");
}

#[test]
fn replacement_range_for_delimited_span() {
    let span = scanner().scan(0, "foo #bar baz", 6).unwrap();
    assert_eq!(span.start, 4);
    assert_eq!(span.end_or(6), 8);
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{0,6}"
}

proptest! {
    #[test]
    fn cursor_within_extent_yields_span(prefix in word(), body in word(), suffix in word()) {
        let line = format!("{prefix} #{body} {suffix}");
        let start = prefix.chars().count() + 1;
        let end = start + 1 + body.chars().count();
        for cursor in start..=end {
            prop_assert_eq!(scanner().scan(0, &line, cursor), delimited(start, end));
        }
    }

    #[test]
    fn cursor_outside_extent_yields_nothing(prefix in word(), body in word(), suffix in word()) {
        let line = format!("{prefix} #{body} {suffix}");
        let start = prefix.chars().count() + 1;
        let end = start + 1 + body.chars().count();
        let length = line.chars().count();
        for cursor in (0..start).chain(end + 1..=length) {
            prop_assert_eq!(scanner().scan(0, &line, cursor), None);
        }
    }

    #[test]
    fn found_span_always_contains_cursor(line in "[a-c# $]{0,16}", cursor in 0usize..20) {
        if let Some(span) = scanner().scan(0, &line, cursor) {
            prop_assert!(span.contains(cursor));
            prop_assert_eq!(line.chars().nth(span.start), Some('#'));
        }
    }
}
