//! Value classification and bracket/brace body resolution.
//!
//! The right-hand side of a `key: value` line is classified by the first
//! structural delimiter found outside quotes:
//!
//! | First delimiter | Closed on the same line | Result |
//! |-----------------|-------------------------|--------|
//! | none, or `]`/`}` | - | scalar token |
//! | `[` | yes | inline array |
//! | `[` | no | multi-line array |
//! | `{` | yes | inline nested block |
//! | `{` | no | multi-line nested block |
//!
//! Multi-line bodies are read from the [`LineSource`] with a depth counter, so
//! inner brackets and braces must balance before the body ends.

use crate::coerce::strip_trailing_comma;
use crate::line::{LineSource, Quotes};
use crate::Result;

/// A classified value, with any multi-line body already consumed.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    /// A scalar token with its trailing comma removed. Quotes are kept.
    Scalar(String),
    /// Array elements in document order, quotes kept.
    Array(Vec<String>),
    /// The text of a nested document, one entry per line.
    Block(String),
}

impl RawValue {
    /// Human-readable name of the value shape, used in type mismatch errors.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            RawValue::Scalar(_) => "scalar",
            RawValue::Array(_) => "array",
            RawValue::Block(_) => "nested block",
        }
    }
}

/// The structural shape of a value's first line.
///
/// Offsets are byte positions of the opening and closing delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    InlineArray { open: usize, close: usize },
    OpenArray { open: usize },
    InlineBlock { open: usize, close: usize },
    OpenBlock { open: usize },
}

/// Classifies a value by its first structural delimiter outside quotes.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::scan::{classify, Shape};
///
/// assert_eq!(classify("'plain'"), Shape::Scalar);
/// assert_eq!(classify("[a, b]"), Shape::InlineArray { open: 0, close: 5 });
/// assert_eq!(classify("{"), Shape::OpenBlock { open: 0 });
/// assert_eq!(classify("'[not an array]'"), Shape::Scalar);
/// ```
#[must_use]
pub fn classify(value: &str) -> Shape {
    let mut quotes = Quotes::default();

    for (idx, ch) in value.char_indices() {
        if !quotes.step(ch) {
            continue;
        }

        match ch {
            '[' => {
                let rest = &value[idx + 1..];
                return match close_at(rest, '[', ']', &mut 1) {
                    Some(offset) => Shape::InlineArray {
                        open: idx,
                        close: idx + 1 + offset,
                    },
                    None => Shape::OpenArray { open: idx },
                };
            }
            '{' => {
                let rest = &value[idx + 1..];
                return match close_at(rest, '{', '}', &mut 1) {
                    Some(offset) => Shape::InlineBlock {
                        open: idx,
                        close: idx + 1 + offset,
                    },
                    None => Shape::OpenBlock { open: idx },
                };
            }
            ']' | '}' => return Shape::Scalar,
            _ => {}
        }
    }

    Shape::Scalar
}

/// Classifies `value` and, for multi-line shapes, consumes the body from `source`.
pub fn scan_value(value: &str, source: &mut LineSource<'_>) -> Result<RawValue> {
    let raw = match classify(value) {
        Shape::Scalar => RawValue::Scalar(strip_trailing_comma(value).trim_end().to_string()),
        Shape::InlineArray { open, close } => RawValue::Array(split_elements(&value[open + 1..close])),
        Shape::OpenArray { open } => RawValue::Array(read_array(&value[open + 1..], source)?),
        Shape::InlineBlock { open, close } => {
            RawValue::Block(split_entries(&value[open + 1..close]).join("\n"))
        }
        Shape::OpenBlock { open } => RawValue::Block(read_block(&value[open + 1..], source)?),
    };

    Ok(raw)
}

/// Moves `depth` across `text`, returning the offset of the delimiter that
/// brings it to zero. Delimiters inside quoted tokens are ignored.
fn close_at(text: &str, open: char, close: char, depth: &mut usize) -> Option<usize> {
    let mut quotes = Quotes::default();

    for (idx, ch) in text.char_indices() {
        if !quotes.step(ch) {
            continue;
        }

        if ch == open {
            *depth += 1;
        } else if ch == close {
            *depth = depth.saturating_sub(1);
            if *depth == 0 {
                return Some(idx);
            }
        }
    }

    None
}

fn read_array(first: &str, source: &mut LineSource<'_>) -> Result<Vec<String>> {
    let mut elements = Vec::new();
    let mut depth = 1;

    close_at(first, '[', ']', &mut depth);
    push_element(&mut elements, first);

    while depth > 0 {
        let line = source.expect_line("closing `]`")?;
        let content = match close_at(line, '[', ']', &mut depth) {
            Some(end) => &line[..end],
            None => line,
        };
        push_element(&mut elements, content);
    }

    Ok(elements)
}

fn read_block(first: &str, source: &mut LineSource<'_>) -> Result<String> {
    let mut lines = Vec::new();
    let mut depth = 1;

    close_at(first, '{', '}', &mut depth);
    push_line(&mut lines, first);

    while depth > 0 {
        let line = source.expect_line("closing `}`")?;
        let content = match close_at(line, '{', '}', &mut depth) {
            Some(end) => &line[..end],
            None => line,
        };
        push_line(&mut lines, content);
    }

    Ok(lines.join("\n"))
}

fn push_element(elements: &mut Vec<String>, text: &str) {
    let token = strip_trailing_comma(text.trim()).trim_end();
    if !token.is_empty() {
        elements.push(token.to_string());
    }
}

fn push_line<'a>(lines: &mut Vec<&'a str>, text: &'a str) {
    let text = text.trim();
    if !text.is_empty() {
        lines.push(text);
    }
}

/// Splits an inline array body into elements.
///
/// Elements are separated by whitespace; a body that yields a single token is
/// re-split on commas so that `[a b c]` and `[a,b,c]` read alike.
fn split_elements(inner: &str) -> Vec<String> {
    let inner = inner.trim();

    let mut tokens = split_outside_quotes(inner, char::is_whitespace);
    if tokens.len() == 1 {
        tokens = split_outside_quotes(inner, |ch| ch == ',');
    }

    let mut elements = Vec::with_capacity(tokens.len());
    for token in tokens {
        push_element(&mut elements, token);
    }
    elements
}

fn split_outside_quotes(text: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quotes = Quotes::default();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if quotes.step(ch) && is_separator(ch) {
            if idx > start {
                pieces.push(&text[start..idx]);
            }
            start = idx + ch.len_utf8();
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

/// Splits an inline block body into entries at top-level commas.
fn split_entries(inner: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut quotes = Quotes::default();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in inner.char_indices() {
        if !quotes.step(ch) {
            continue;
        }

        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(inner[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }

    entries.push(inner[start..].trim());
    entries.retain(|entry| !entry.is_empty());
    entries
}
