//! Field mapping for records.
//!
//! [`extract_fields`] runs a record through a serde [`Serializer`](ser::Serializer)
//! that records each field's external key and value in declaration order. The
//! resulting [`Field`] list is what the encoder walks.
//!
//! On the decode side the same schema comes from `#[derive(Deserialize)]`: the
//! external key is the field name or its `#[serde(rename = "...")]`, and
//! `#[serde(skip)]` excludes a field entirely.
//!
//! ```rust
//! use serde::Serialize;
//! use serde_cfg::{extract_fields, ScalarKind};
//!
//! #[derive(Serialize)]
//! struct Server {
//!     port: u16,
//!     #[serde(rename = "tags")]
//!     labels: Vec<String>,
//! }
//!
//! let server = Server { port: 7788, labels: vec!["eu".into()] };
//! let fields = extract_fields(&server).unwrap();
//!
//! assert_eq!(fields[0].key, "port");
//! assert_eq!(fields[0].scalar_kind(), Some(ScalarKind::Uint));
//! assert_eq!(fields[1].key, "tags");
//! assert!(fields[1].is_array());
//! ```

use crate::{Error, Result};
use serde::ser::{self, Impossible, Serialize};
use std::fmt;

/// The key that excludes a field from decoding and encoding.
pub const EXCLUDED_KEY: &str = "-";

/// The scalar kinds the format can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Bool,
    Int,
    Uint,
    Float,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float",
        })
    }
}

/// A typed scalar value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Scalar {
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Uint(_) => ScalarKind::Uint,
            Scalar::Float(_) => ScalarKind::Float,
        }
    }
}

/// Plain form: strings unquoted, floats in shortest round-trip notation.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Uint(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
        }
    }
}

/// The value held by a field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Scalar(Scalar),
    Array(Vec<Scalar>),
    Record(Vec<Field>),
}

impl FieldValue {
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            FieldValue::Scalar(_) => "scalar",
            FieldValue::Array(_) => "array",
            FieldValue::Record(_) => "nested record",
        }
    }
}

/// One record field: its external key and current value.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    /// Creates a field, trimming whitespace around the key.
    pub fn new(key: &str, value: FieldValue) -> Self {
        Field {
            key: key.trim().to_string(),
            value,
        }
    }

    /// Whether the field carries the `-` key.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.key == EXCLUDED_KEY
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.value, FieldValue::Array(_))
    }

    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self.value, FieldValue::Record(_))
    }

    /// The scalar kind of the field, or of its elements for arrays.
    ///
    /// Empty arrays and nested records have no scalar kind.
    #[must_use]
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match &self.value {
            FieldValue::Scalar(scalar) => Some(scalar.kind()),
            FieldValue::Array(items) => items.first().map(Scalar::kind),
            FieldValue::Record(_) => None,
        }
    }
}

/// Lists the fields of `record` in declaration order.
///
/// `None` options and unit values produce no field. A value that is not a
/// record (a scalar, a sequence) is an [`Error::InvalidTarget`].
///
/// # Errors
///
/// Returns [`Error::EncodeUnsupportedKind`] for values the format cannot
/// represent: enum variants with data, nested arrays and arrays of records.
pub fn extract_fields<T>(record: &T) -> Result<Vec<Field>>
where
    T: ?Sized + Serialize,
{
    match record.serialize(FieldMapper)? {
        Some(FieldValue::Record(fields)) => Ok(fields),
        Some(other) => Err(Error::invalid_target(format!(
            "encode target must be a record, found {}",
            other.describe()
        ))),
        None => Err(Error::invalid_target(
            "encode target must be a record, found an empty value",
        )),
    }
}

/// Serializer producing the [`FieldValue`] of one value, or `None` for absent values.
pub struct FieldMapper;

impl FieldMapper {
    fn scalar(scalar: Scalar) -> Result<Option<FieldValue>> {
        Ok(Some(FieldValue::Scalar(scalar)))
    }
}

impl ser::Serializer for FieldMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    type SerializeSeq = ArrayMapper;
    type SerializeTuple = ArrayMapper;
    type SerializeTupleStruct = ArrayMapper;
    type SerializeTupleVariant = Impossible<Option<FieldValue>, Error>;
    type SerializeMap = RecordMapper;
    type SerializeStruct = RecordMapper;
    type SerializeStructVariant = Impossible<Option<FieldValue>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        Self::scalar(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        Self::scalar(Scalar::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        Self::scalar(Scalar::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        Self::scalar(Scalar::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        Self::scalar(Scalar::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Self::scalar(Scalar::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let items = v.iter().map(|b| Scalar::Uint(u64::from(*b))).collect();
        Ok(Some(FieldValue::Array(items)))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_kind(format!(
            "newtype variant `{}::{}`",
            name, variant
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ArrayMapper {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_kind(format!(
            "tuple variant `{}::{}`",
            name, variant
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(RecordMapper::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(RecordMapper::with_capacity(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_kind(format!(
            "struct variant `{}::{}`",
            name, variant
        )))
    }
}

/// Collects the scalar elements of an array field.
pub struct ArrayMapper {
    items: Vec<Scalar>,
}

impl ArrayMapper {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(FieldMapper)? {
            Some(FieldValue::Scalar(scalar)) => {
                self.items.push(scalar);
                Ok(())
            }
            Some(FieldValue::Array(_)) => Err(Error::unsupported_kind("nested arrays")),
            Some(FieldValue::Record(_)) => Err(Error::unsupported_kind("arrays of records")),
            None => Err(Error::unsupported_kind("empty array elements")),
        }
    }

    fn finish(self) -> Result<Option<FieldValue>> {
        Ok(Some(FieldValue::Array(self.items)))
    }
}

impl ser::SerializeSeq for ArrayMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for ArrayMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ArrayMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Collects the fields of a struct or map in order.
pub struct RecordMapper {
    fields: Vec<Field>,
    pending_key: Option<String>,
}

impl RecordMapper {
    fn with_capacity(capacity: usize) -> Self {
        RecordMapper {
            fields: Vec::with_capacity(capacity),
            pending_key: None,
        }
    }

    fn push<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(FieldMapper)? {
            self.fields.push(Field::new(key, value));
        }
        Ok(())
    }
}

impl ser::SerializeStruct for RecordMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(FieldValue::Record(self.fields)))
    }
}

impl ser::SerializeMap for RecordMapper {
    type Ok = Option<FieldValue>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(FieldMapper)? {
            Some(FieldValue::Scalar(scalar)) => {
                self.pending_key = Some(scalar.to_string());
                Ok(())
            }
            _ => Err(Error::unsupported_kind("non-scalar map keys")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.push(&key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(FieldValue::Record(self.fields)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Mixed {
        #[serde(rename = "F1")]
        f1: i32,
        #[serde(rename = "value_f2")]
        f2: bool,
        #[serde(rename = "F3")]
        f3: Vec<String>,
        #[serde(rename = "F4")]
        f4: String,
    }

    fn mixed() -> Mixed {
        Mixed {
            f1: 1,
            f2: true,
            f3: vec![],
            f4: "x".into(),
        }
    }

    #[test]
    fn test_keys_in_declaration_order() {
        let fields = extract_fields(&mixed()).unwrap();
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["F1", "value_f2", "F3", "F4"]);
    }

    #[test]
    fn test_references_are_transparent() {
        let value = mixed();
        let by_ref = extract_fields(&&value).unwrap();
        let boxed = extract_fields(&Box::new(mixed())).unwrap();
        assert_eq!(by_ref, boxed);
        assert_eq!(by_ref.len(), 4);
    }

    #[test]
    fn test_field_kinds() {
        #[derive(Serialize)]
        struct Inner {
            on: bool,
        }

        #[derive(Serialize)]
        struct Outer {
            ratio: f32,
            ports: Vec<u16>,
            inner: Inner,
        }

        let fields = extract_fields(&Outer {
            ratio: 0.5,
            ports: vec![80, 443],
            inner: Inner { on: true },
        })
        .unwrap();

        assert_eq!(fields[0].scalar_kind(), Some(ScalarKind::Float));
        assert!(fields[1].is_array());
        assert_eq!(fields[1].scalar_kind(), Some(ScalarKind::Uint));
        assert!(fields[2].is_record());
        assert_eq!(fields[2].scalar_kind(), None);
    }

    #[test]
    fn test_excluded_key_and_trimmed_rename() {
        #[derive(Serialize)]
        struct Tagged {
            #[serde(rename = "-")]
            hidden: i32,
            #[serde(rename = "  spaced ")]
            spaced: i32,
        }

        let fields = extract_fields(&Tagged { hidden: 1, spaced: 2 }).unwrap();
        assert!(fields[0].is_excluded());
        assert_eq!(fields[1].key, "spaced");
    }

    #[test]
    fn test_none_fields_are_omitted() {
        #[derive(Serialize)]
        struct Optional {
            a: Option<i32>,
            b: Option<i32>,
        }

        let fields = extract_fields(&Optional { a: None, b: Some(3) }).unwrap();
        assert_eq!(fields, vec![Field::new("b", FieldValue::Scalar(Scalar::Int(3)))]);
    }

    #[test]
    fn test_maps_are_records() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");

        let fields = extract_fields(&map).unwrap();
        assert_eq!(fields[0].key, "1");
        assert_eq!(fields[1].value, FieldValue::Scalar(Scalar::String("two".into())));
    }

    #[test]
    fn test_non_records_are_invalid_targets() {
        assert!(matches!(extract_fields(&42), Err(Error::InvalidTarget(_))));
        assert!(matches!(extract_fields(&vec![1, 2]), Err(Error::InvalidTarget(_))));
        assert!(matches!(extract_fields(&()), Err(Error::InvalidTarget(_))));
    }

    #[test]
    fn test_unsupported_kinds() {
        #[derive(Serialize)]
        enum Mode {
            Fixed(u8),
        }

        #[derive(Serialize)]
        struct WithVariant {
            mode: Mode,
        }

        #[derive(Serialize)]
        struct Grid {
            cells: Vec<Vec<u8>>,
        }

        assert!(matches!(
            extract_fields(&WithVariant { mode: Mode::Fixed(1) }),
            Err(Error::EncodeUnsupportedKind(_))
        ));
        assert!(matches!(
            extract_fields(&Grid { cells: vec![vec![1]] }),
            Err(Error::EncodeUnsupportedKind(_))
        ));
    }
}
