//! Logical line reader.
//!
//! [`LineSource`] walks raw text once, left to right, dropping blank lines and
//! comments. It owns the line counter used in every decode diagnostic.

use crate::{Error, Result};
use std::str::Lines;

/// Yields the logical lines of a document.
///
/// A logical line is a raw line with surrounding whitespace trimmed and any
/// comment removed. Blank and comment-only lines are skipped, so every line
/// returned is non-empty.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::LineSource;
///
/// let mut source = LineSource::new("# header\n\nname: 'demo' # trailing\n");
/// assert_eq!(source.next_logical_line(), Some("name: 'demo'"));
/// assert_eq!(source.line(), 3);
/// assert_eq!(source.next_logical_line(), None);
/// ```
#[derive(Debug, Clone)]
pub struct LineSource<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> LineSource<'a> {
    pub fn new(text: &'a str) -> Self {
        LineSource {
            lines: text.lines(),
            line: 0,
        }
    }

    /// The 1-based number of the last raw line consumed, or 0 before the first.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the next logical line, or `None` once the text is exhausted.
    pub fn next_logical_line(&mut self) -> Option<&'a str> {
        for raw in self.lines.by_ref() {
            self.line += 1;

            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Some(strip_comment(trimmed).trim_end());
        }

        None
    }

    /// Like [`next_logical_line`](Self::next_logical_line), but running out of input
    /// is an [`Error::EndOfInput`] naming what was `expected`.
    pub fn expect_line(&mut self, expected: &str) -> Result<&'a str> {
        match self.next_logical_line() {
            Some(line) => Ok(line),
            None => Err(Error::end_of_input(self.line, expected)),
        }
    }
}

impl<'a> Iterator for LineSource<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_logical_line()
    }
}

/// Cuts `line` at the first `#` that is not inside a quoted token.
///
/// A quote left open at the end of the line does not hide a comment: the line
/// is cut at the first `#` after that quote.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut quotes = Quotes::default();
    let mut quoted_hash = None;

    for (idx, ch) in line.char_indices() {
        let outside = quotes.step(ch);
        if ch == '#' {
            if outside {
                return &line[..idx];
            }
            quoted_hash.get_or_insert(idx);
        }
        if !quotes.is_open() {
            quoted_hash = None;
        }
    }

    match quoted_hash {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Tracks quoted tokens while scanning a single line.
///
/// A quote only opens a token at a token boundary: the start of the text, or
/// after whitespace, `:`, `,`, `[` or `{`. The token closes at the next
/// occurrence of the same quote character.
#[derive(Debug, Default)]
pub(crate) struct Quotes {
    open: Option<char>,
    prev: Option<char>,
}

impl Quotes {
    /// Feeds the next character; returns `true` when it lies outside any quotes.
    pub(crate) fn step(&mut self, ch: char) -> bool {
        let prev = self.prev.replace(ch);

        match self.open {
            Some(quote) => {
                if ch == quote {
                    self.open = None;
                }
                false
            }
            None if (ch == '\'' || ch == '"') && starts_token(prev) => {
                self.open = Some(ch);
                false
            }
            None => true,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

fn starts_token(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(p) => p.is_whitespace() || matches!(p, ':' | ',' | '[' | '{'),
    }
}
