//! Ordered key/value table produced by one decode pass.
//!
//! A [`Document`] maps each external key to the [`Entry`] read for it, in the
//! order keys first appear. It is the intermediate form between the line reader
//! and serde, and is available directly through [`parse_document`](crate::parse_document)
//! when the record shape is not known in advance.
//!
//! ## Repeated keys
//!
//! A key that appears more than once is merged into its first position:
//!
//! - arrays append the later elements
//! - nested blocks concatenate, so later entries inside them win
//! - any other combination is replaced by the later value
//!
//! ```rust
//! use serde_cfg::{parse_document, RawValue};
//!
//! let doc = parse_document("tags: [a]\nport: 1\ntags: [b]\nport: 2").unwrap();
//!
//! let tags = doc.get("tags").unwrap();
//! assert_eq!(tags.value, RawValue::Array(vec!["a".into(), "b".into()]));
//! assert_eq!(doc.get("port").and_then(|e| e.scalar()), Some("2"));
//! assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["tags", "port"]);
//! ```

use crate::coerce::unwrap_quotes;
use crate::scan::RawValue;
use indexmap::IndexMap;
use log::trace;

/// A value read from the document and the line its key was on.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub line: usize,
    pub value: RawValue,
}

impl Entry {
    #[must_use]
    pub fn new(line: usize, value: RawValue) -> Self {
        Entry { line, value }
    }

    /// The unquoted token of a scalar entry.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        match &self.value {
            RawValue::Scalar(token) => Some(unwrap_quotes(token)),
            _ => None,
        }
    }

    fn absorb(&mut self, later: Entry) {
        self.line = later.line;
        match (&mut self.value, later.value) {
            (RawValue::Array(items), RawValue::Array(more)) => items.extend(more),
            (RawValue::Block(text), RawValue::Block(more)) => {
                text.push('\n');
                text.push_str(&more);
            }
            (slot, value) => *slot = value,
        }
    }
}

/// Keys and entries of a decoded document, in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document(IndexMap<String, Entry>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    /// Records `entry` under `key`, merging with an earlier entry for the same key.
    pub fn merge(&mut self, key: String, entry: Entry) {
        match self.0.get_mut(&key) {
            Some(existing) => {
                trace!(
                    "key `{}` repeated on line {}, merging with line {}",
                    key,
                    entry.line,
                    existing.line
                );
                existing.absorb(entry);
            }
            None => {
                self.0.insert(key, entry);
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.0.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Entry);
    type IntoIter = indexmap::map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(line: usize, token: &str) -> Entry {
        Entry::new(line, RawValue::Scalar(token.to_string()))
    }

    #[test]
    fn test_scalar_last_wins_and_keeps_position() {
        let mut doc = Document::new();
        doc.merge("a".into(), scalar(1, "1"));
        doc.merge("b".into(), scalar(2, "2"));
        doc.merge("a".into(), scalar(3, "'3'"));

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = doc.get("a").unwrap();
        assert_eq!(a.scalar(), Some("3"));
        assert_eq!(a.line, 3);
    }

    #[test]
    fn test_blocks_concatenate() {
        let mut doc = Document::new();
        doc.merge("voice".into(), Entry::new(1, RawValue::Block("a: 1".into())));
        doc.merge("voice".into(), Entry::new(5, RawValue::Block("b: 2".into())));

        assert_eq!(
            doc.get("voice").unwrap().value,
            RawValue::Block("a: 1\nb: 2".into())
        );
    }

    #[test]
    fn test_kind_change_replaces() {
        let mut doc = Document::new();
        doc.merge("x".into(), Entry::new(1, RawValue::Array(vec!["a".into()])));
        doc.merge("x".into(), scalar(2, "b"));

        assert_eq!(doc.get("x").unwrap().value, RawValue::Scalar("b".into()));
    }
}
