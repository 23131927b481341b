//! Finding the trigger occurrence the cursor currently sits in.

/// Where a trigger span stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanEnd {
    /// Offset of the first delimiter after the trigger.
    Delimited(usize),
    /// No delimiter yet: the span runs up to the cursor.
    OpenEnded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerSpan {
    pub line: usize,
    /// Offset of the trigger character.
    pub start: usize,
    pub end: SpanEnd,
}

impl TriggerSpan {
    /// End offset to use for the given cursor position.
    pub fn end_or(&self, cursor: usize) -> usize {
        match self.end {
            SpanEnd::Delimited(end) => end,
            SpanEnd::OpenEnded => cursor.max(self.start),
        }
    }

    /// Does `cursor` lie inside the span? Both bounds are inclusive.
    pub fn contains(&self, cursor: usize) -> bool {
        cursor >= self.start
            && match self.end {
                SpanEnd::Delimited(end) => cursor <= end,
                SpanEnd::OpenEnded => true,
            }
    }

    /// The text typed after the trigger character.
    pub fn fragment(&self, line: &str, cursor: usize) -> String {
        let from = self.start + 1;
        let to = self.end_or(cursor);
        if to <= from {
            return String::new();
        }
        line.chars().skip(from).take(to - from).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerScanner {
    trigger: char,
    boundary_escape: Option<char>,
}

impl TriggerScanner {
    pub fn new(trigger: char, boundary_escape: Option<char>) -> Self {
        Self {
            trigger,
            boundary_escape,
        }
    }

    /// Returns the first trigger occurrence, left to right, whose extent
    /// contains `cursor`.
    ///
    /// The extent of an occurrence at `s` reaches the first whitespace at or
    /// after `s`; the boundary escape character counts as whitespace for
    /// that search only.
    pub fn scan(&self, line_index: usize, line: &str, cursor: usize) -> Option<TriggerSpan> {
        if line.is_empty() {
            return None;
        }

        let chars: Vec<char> = line.chars().collect();
        let is_boundary = |ch: char| ch.is_whitespace() || Some(ch) == self.boundary_escape;

        chars
            .iter()
            .enumerate()
            .filter(|(_, ch)| **ch == self.trigger)
            .map(|(start, _)| {
                let end = chars[start..]
                    .iter()
                    .position(|ch| is_boundary(*ch))
                    .map(|offset| SpanEnd::Delimited(start + offset))
                    .unwrap_or(SpanEnd::OpenEnded);
                TriggerSpan {
                    line: line_index,
                    start,
                    end,
                }
            })
            .find(|span| span.contains(cursor))
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod trigger_tests;
