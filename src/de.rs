//! CFG deserialization.
//!
//! This module provides the [`Deserializer`] that reads CFG text into Rust
//! records implementing `Deserialize`.
//!
//! ## Overview
//!
//! Decoding runs in two steps:
//!
//! 1. **Reading**: the [`LineSource`] yields logical lines; each is split at its
//!    first `:` and the value is classified (and any multi-line body consumed) by
//!    the [block scanner](crate::scan). Entries are collected into a
//!    [`Document`], merging repeated keys.
//! 2. **Mapping**: the document is handed to serde as a map. The derived
//!    `Deserialize` impl matches keys to fields and asks for each value's type,
//!    which drives [coercion](crate::coerce) or a recursive decode of a nested
//!    block.
//!
//! Keys with no matching field are ignored. Fields with no matching key are
//! zero-filled unless [`CfgOptions::fill_missing`] is disabled.
//!
//! Reading stops at the first line that cannot be read. The entries before it
//! are still mapped, so a type error on an earlier line is reported first.
//!
//! ## Usage
//!
//! ```rust
//! use serde_cfg::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Voice {
//!     bitrate: u32,
//!     #[serde(rename = "externalHost")]
//!     host: String,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     name: String,
//!     modules: Vec<String>,
//!     voice: Voice,
//! }
//!
//! let cfg = "name: 'TestServer',\nmodules: [\n  'a',\n  'b'\n],\nvoice: {\n  bitrate: 64000\n  externalHost: localhost\n}";
//! let server: Server = from_str(cfg).unwrap();
//! assert_eq!(server.modules, vec!["a", "b"]);
//! assert_eq!(server.voice.host, "localhost");
//! ```

use crate::coerce::{self, unwrap_quotes};
use crate::document::{Document, Entry};
use crate::field::{ScalarKind, EXCLUDED_KEY};
use crate::line::LineSource;
use crate::options::CfgOptions;
use crate::scan::{scan_value, RawValue};
use crate::{Error, Result};
use log::{debug, trace};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The CFG deserializer.
///
/// Holds the [`LineSource`] for one document. A deserializer decodes exactly one
/// record; the lines it consumes cannot be read again.
pub struct Deserializer<'a> {
    source: LineSource<'a>,
    options: CfgOptions,
}

impl<'a> Deserializer<'a> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Self::with_options(input, CfgOptions::default())
    }

    pub fn with_options(input: &'a str, options: CfgOptions) -> Self {
        Deserializer {
            source: LineSource::new(input),
            options,
        }
    }

    /// Reads every remaining line into a [`Document`].
    ///
    /// # Errors
    ///
    /// Fails on the first malformed line, unexpected key, or unterminated
    /// array or block.
    pub fn read_document(&mut self) -> Result<Document> {
        match self.read_entries() {
            (document, None) => Ok(document),
            (_, Some(err)) => Err(err),
        }
    }

    /// Reads entries until the input ends or a line fails to read.
    ///
    /// The entries before a failing line are returned alongside its error, so
    /// that a mismatch on an earlier line is still reported first.
    fn read_entries(&mut self) -> (Document, Option<Error>) {
        let mut document = Document::new();

        while let Some(line) = self.source.next_logical_line() {
            let (key, entry) = match self.read_entry(line) {
                Ok(read) => read,
                Err(err) => {
                    debug!("stopped reading at line {}", self.source.line());
                    return (document, Some(err));
                }
            };

            if key == EXCLUDED_KEY {
                trace!("line {}: skipping excluded key", entry.line);
                continue;
            }

            trace!("line {}: key `{}` ({})", entry.line, key, entry.value.describe());
            document.merge(key.to_string(), entry);
        }

        debug!(
            "read {} entries from {} lines",
            document.len(),
            self.source.line()
        );
        (document, None)
    }

    fn read_entry(&mut self, line: &'a str) -> Result<(&'a str, Entry)> {
        let line_no = self.source.line();

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| Error::malformed_line(line_no, line))?;

        let mut value = value.trim();
        if value.is_empty() {
            let next = self.source.expect_line("a value")?;
            if next.contains(':') {
                return Err(Error::unexpected_key(self.source.line(), next));
            }
            value = next;
        }

        let raw = scan_value(value, &mut self.source)?;
        Ok((key.trim(), Entry::new(line_no, raw)))
    }

    fn visit_document<'de, V>(
        &mut self,
        fields: Option<&'static [&'static str]>,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let (document, failure) = self.read_entries();
        let fill = if self.options.fill_missing {
            fields.unwrap_or(&[])
        } else {
            &[]
        };
        visitor.visit_map(EntryAccess::new(document, fill, self.options).fail_with(failure))
    }
}

macro_rules! reject_non_record {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                Err(not_a_record(&visitor))
            }
        )*
    };
}

fn not_a_record(expected: &dyn de::Expected) -> Error {
    Error::invalid_target(format!(
        "decode target must be a record, not {}",
        expected
    ))
}

impl<'de, 'a> de::Deserializer<'de> for &mut Deserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_document(None, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_document(None, visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_document(Some(fields), visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.read_document()?;
        visitor.visit_unit()
    }

    reject_non_record! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_unit deserialize_seq
        deserialize_identifier
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(not_a_record(&visitor))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(not_a_record(&visitor))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(not_a_record(&visitor))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(not_a_record(&visitor))
    }
}

enum Pending {
    Entry(String, Entry),
    Missing(&'static str),
}

/// Hands document entries to serde, followed by zero values for absent fields.
///
/// A read failure is reported once the entries before it have been handed out.
/// A field named `-` is always absent from the document, so it is zero-filled.
struct EntryAccess {
    entries: indexmap::map::IntoIter<String, Entry>,
    missing: std::vec::IntoIter<&'static str>,
    pending: Option<Pending>,
    failure: Option<Error>,
    options: CfgOptions,
}

impl EntryAccess {
    fn new(document: Document, fields: &'static [&'static str], options: CfgOptions) -> Self {
        let missing: Vec<&'static str> = fields
            .iter()
            .copied()
            .filter(|field| !document.contains_key(field))
            .collect();

        EntryAccess {
            entries: document.into_iter(),
            missing: missing.into_iter(),
            pending: None,
            failure: None,
            options,
        }
    }

    fn fail_with(mut self, failure: Option<Error>) -> Self {
        self.failure = failure;
        self
    }
}

impl<'de> de::MapAccess<'de> for EntryAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let Some((key, entry)) = self.entries.next() {
            self.pending = Some(Pending::Entry(key.clone(), entry));
            return seed.deserialize(key.into_deserializer()).map(Some);
        }

        if let Some(err) = self.failure.take() {
            return Err(err);
        }

        match self.missing.next() {
            Some(field) => {
                trace!("field `{}` absent, using its zero value", field);
                self.pending = Some(Pending::Missing(field));
                seed.deserialize(field.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(Pending::Entry(key, entry)) => {
                seed.deserialize(ValueDeserializer::new(key, entry, self.options))
            }
            Some(Pending::Missing(field)) => seed.deserialize(ZeroDeserializer {
                field,
                options: self.options,
            }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len() + self.missing.len())
    }
}

/// Deserializes one document value against the type the target field asks for.
struct ValueDeserializer {
    key: String,
    entry: Entry,
    options: CfgOptions,
}

impl ValueDeserializer {
    fn new(key: String, entry: Entry, options: CfgOptions) -> Self {
        ValueDeserializer {
            key,
            entry,
            options,
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        Error::type_mismatch(self.entry.line, expected, self.entry.value.describe())
    }

    /// The unquoted token of a scalar value, or a type mismatch naming `expected`.
    fn token(&self, expected: &str) -> Result<&str> {
        match &self.entry.value {
            RawValue::Scalar(token) => Ok(unwrap_quotes(token)),
            _ => Err(self.mismatch(expected)),
        }
    }

    fn number<T>(&self, kind: ScalarKind) -> Result<T>
    where
        T: std::str::FromStr + Default,
    {
        let token = self.token(&kind.to_string())?;
        coerce::parse_number(token, kind, self.entry.line, self.options.strict_numbers)
    }

    fn nested<'de, V>(self, fields: Option<&'static [&'static str]>, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let text = match &self.entry.value {
            RawValue::Block(text) => text,
            _ => return Err(self.mismatch("nested record")),
        };

        trace!("line {}: decoding nested block `{}`", self.entry.line, self.key);
        let mut nested = Deserializer::with_options(text, self.options);
        nested
            .visit_document(fields, visitor)
            .map_err(|err| Error::nested(&self.key, self.entry.line, err))
    }
}

macro_rules! deserialize_number {
    ($($method:ident => $visit:ident($ty:ty, $kind:expr);)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.number::<$ty>($kind)?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.entry.value {
            RawValue::Scalar(token) => visitor.visit_string(unwrap_quotes(token).to_string()),
            RawValue::Array(_) => self.deserialize_seq(visitor),
            RawValue::Block(_) => self.nested(None, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(coerce::parse_bool(self.token("bool")?))
    }

    deserialize_number! {
        deserialize_i8 => visit_i8(i8, ScalarKind::Int);
        deserialize_i16 => visit_i16(i16, ScalarKind::Int);
        deserialize_i32 => visit_i32(i32, ScalarKind::Int);
        deserialize_i64 => visit_i64(i64, ScalarKind::Int);
        deserialize_u8 => visit_u8(u8, ScalarKind::Uint);
        deserialize_u16 => visit_u16(u16, ScalarKind::Uint);
        deserialize_u32 => visit_u32(u32, ScalarKind::Uint);
        deserialize_u64 => visit_u64(u64, ScalarKind::Uint);
        deserialize_f32 => visit_f32(f32, ScalarKind::Float);
        deserialize_f64 => visit_f64(f64, ScalarKind::Float);
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.token("string")?.to_string())
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let ValueDeserializer {
            key,
            entry,
            options,
        } = self;

        match entry.value {
            RawValue::Array(items) => visitor.visit_seq(ElementAccess {
                key,
                line: entry.line,
                items: items.into_iter(),
                options,
            }),
            other => Err(Error::type_mismatch(entry.line, "array", other.describe())),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.nested(None, visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.nested(Some(fields), visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = self.token("enum variant")?.to_string();
        visitor.visit_enum(variant.into_deserializer())
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Yields array elements as scalar values.
struct ElementAccess {
    key: String,
    line: usize,
    items: std::vec::IntoIter<String>,
    options: CfgOptions,
}

impl<'de> de::SeqAccess<'de> for ElementAccess {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.items.next() {
            Some(item) => {
                let entry = Entry::new(self.line, RawValue::Scalar(item));
                seed.deserialize(ValueDeserializer::new(self.key.clone(), entry, self.options))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Produces the zero value of whatever type a missing field asks for.
struct ZeroDeserializer {
    field: &'static str,
    options: CfgOptions,
}

impl<'de> de::Deserializer<'de> for ZeroDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(false)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(0)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(0)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(0.0)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(String::new())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_none()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(de::value::SeqDeserializer::<_, Error>::new(
            std::iter::empty::<()>(),
        ))
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(EntryAccess::new(Document::new(), &[], self.options))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(EntryAccess::new(Document::new(), fields, self.options))
    }

    /// Enums zero-fill to their first variant.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match variants.first() {
            Some(variant) => visitor.visit_enum((*variant).into_deserializer()),
            None => Err(de::Error::missing_field(self.field)),
        }
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i128(0)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u128(0)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_char('\0')
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bytes(&[])
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_byte_buf(Vec::new())
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        unit tuple tuple_struct identifier ignored_any
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_i64(visitor)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_u64(visitor)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Pair {
        name: String,
        port: u16,
    }

    #[test]
    fn test_read_document_skips_excluded_key() {
        let mut de = Deserializer::from_str("-: 1\nname: x");
        let doc = de.read_document().unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_key_only_line_takes_next_line() {
        let mut de = Deserializer::from_str("name:\n\n  # value follows\n  'x'\nport: 1");
        let doc = de.read_document().unwrap();
        let name = doc.get("name").unwrap();
        assert_eq!(name.scalar(), Some("x"));
        assert_eq!(name.line, 1);
    }

    #[test]
    fn test_deserialize_pair() {
        let mut de = Deserializer::from_str("name: 'svc'\nport: 80");
        let pair = Pair::deserialize(&mut de).unwrap();
        assert_eq!(
            pair,
            Pair {
                name: "svc".into(),
                port: 80
            }
        );
    }

    #[test]
    fn test_zero_fill() {
        let mut de = Deserializer::from_str("");
        let pair = Pair::deserialize(&mut de).unwrap();
        assert_eq!(pair.name, "");
        assert_eq!(pair.port, 0);
    }

    #[test]
    fn test_zero_fill_enum_and_char() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Mode {
            Freeroam,
            Race,
        }

        #[derive(Deserialize, Debug)]
        struct Settings {
            mode: Mode,
            prefix: char,
            total: u128,
        }

        let mut de = Deserializer::from_str("");
        let settings = Settings::deserialize(&mut de).unwrap();
        assert_eq!(settings.mode, Mode::Freeroam);
        assert_eq!(settings.prefix, '\0');
        assert_eq!(settings.total, 0);

        let mut de = Deserializer::from_str("mode: Race");
        assert_eq!(Settings::deserialize(&mut de).unwrap().mode, Mode::Race);
    }

    #[test]
    fn test_dash_field_is_zero_filled() {
        #[derive(Deserialize, Debug)]
        struct Tagged {
            name: String,
            #[serde(rename = "-")]
            hidden: i32,
        }

        let mut de = Deserializer::from_str("name: a\n-: 5");
        let tagged = Tagged::deserialize(&mut de).unwrap();
        assert_eq!(tagged.name, "a");
        assert_eq!(tagged.hidden, 0);
    }

    #[test]
    fn test_earlier_mismatch_wins_over_later_read_error() {
        #[derive(Deserialize, Debug)]
        struct Two {
            #[allow(dead_code)]
            port: i32,
            #[allow(dead_code)]
            name: Vec<String>,
        }

        let mut de = Deserializer::from_str("port: [1]\nname: [\n'a'");
        let err = Two::deserialize(&mut de).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { line: 1, .. }));

        let mut de = Deserializer::from_str("port: 1\nname: [\n'a'");
        let err = Two::deserialize(&mut de).unwrap_err();
        assert!(matches!(err, Error::EndOfInput { line: 3, .. }));
    }

    #[test]
    fn test_missing_without_fill() {
        let options = CfgOptions::new().with_fill_missing(false);
        let mut de = Deserializer::with_options("name: x", options);
        let err = Pair::deserialize(&mut de).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_scalar_target_rejected() {
        let mut de = Deserializer::from_str("a: 1");
        let err = u32::deserialize(&mut de).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(_)));
    }
}
