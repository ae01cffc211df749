//! # serde_cfg
//!
//! A Serde-compatible library for the CFG configuration format.
//!
//! ## What is CFG?
//!
//! CFG is a small, line-oriented text format for configuration records. Each
//! line holds one `key: value` entry; values are scalars, arrays in square
//! brackets, or nested records in curly braces:
//!
//! ```text
//! # server settings
//! name: 'TestServer',
//! port: 7788,
//! modules: [
//!   'node-module',
//!   'csharp-module'
//! ],
//! voice: {
//!   bitrate: 64000
//! }
//! ```
//!
//! Comments start with `#`, trailing commas are optional, and quotes around
//! scalars are optional. See the [`format`] module for the full grammar.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: decode into and encode from any record type via
//!   `#[derive(Serialize, Deserialize)]`, with `#[serde(rename)]` for external keys
//! - **Forgiving Decoding**: unknown keys are ignored, missing fields are
//!   zero-filled and unparsable numbers become zero (opt-in strict mode reports them)
//! - **Line-Aware Errors**: decode errors carry the 1-based line they occurred on
//! - **Dynamic Access**: [`parse_document`] reads a document without a target type
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_cfg = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_cfg::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     name: String,
//!     port: u16,
//!     modules: Vec<String>,
//! }
//!
//! let server: Server = from_str("name: 'TestServer'\nport: 7788\nmodules: [a, b]").unwrap();
//! assert_eq!(server.port, 7788);
//!
//! let cfg = to_string(&server).unwrap();
//! assert_eq!(cfg, "name: 'TestServer',\nport: 7788,\nmodules: [\n  'a',\n  'b'\n]");
//!
//! let back: Server = from_str(&cfg).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ## Excluded Fields
//!
//! Fields marked `#[serde(skip)]` are neither read nor written; they keep the
//! value produced by their `Default` (or `#[serde(default = "...")]`) impl. A key
//! spelled `-` in a document is always skipped.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: per-document
//! summaries at `debug`, per-entry detail (merged keys, zero-filled fields,
//! numeric fallbacks) at `trace`.

pub mod coerce;
pub mod de;
pub mod document;
pub mod error;
pub mod field;
pub mod format;
pub mod line;
pub mod options;
pub mod scan;
pub mod ser;

pub use de::Deserializer;
pub use document::{Document, Entry};
pub use error::{Error, Result};
pub use field::{extract_fields, Field, FieldValue, Scalar, ScalarKind};
pub use line::LineSource;
pub use options::CfgOptions;
pub use scan::RawValue;
pub use ser::Serializer;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize a record to a CFG string.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let cfg = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(cfg, "x: 1,\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value is not a record or holds a field the format
/// cannot represent.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, CfgOptions::default())
}

/// Serialize a record to a CFG string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::{to_string_with_options, CfgOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Tags { tags: Vec<&'static str> }
///
/// let options = CfgOptions::new().with_indent(4);
/// let cfg = to_string_with_options(&Tags { tags: vec!["a"] }, options).unwrap();
/// assert_eq!(cfg, "tags: [\n    'a'\n]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: CfgOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    serializer.encode(value)?;
    Ok(serializer.into_inner())
}

/// Serialize a record to CFG bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, CfgOptions::default())
}

/// Serialize a record to CFG bytes with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(value: &T, options: CfgOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, options).map(String::into_bytes)
}

/// Serialize a record to a writer in CFG format.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x: 1,\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, CfgOptions::default())
}

/// Serialize a record to a writer in CFG format with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: CfgOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let cfg = to_string_with_options(value, options)?;
    writer
        .write_all(cfg.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize a record of type `T` from CFG text.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1,\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is malformed or does not fit `T`. Decode errors
/// report the line they occurred on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_str_with_options(s, CfgOptions::default())
}

/// Deserialize a record of type `T` from CFG text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::{from_str_with_options, CfgOptions, Error};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Debug)]
/// struct Limits { max: u32 }
///
/// let err = from_str_with_options::<Limits>("max: lots", CfgOptions::strict()).unwrap_err();
/// assert!(matches!(err, Error::Coercion { line: 1, .. }));
/// ```
///
/// # Errors
///
/// Returns an error if the text is malformed or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<'a, T>(s: &'a str, options: CfgOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::with_options(s, options);
    T::deserialize(&mut deserializer)
}

/// Deserialize a record of type `T` from an I/O stream of CFG text.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, or the text cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    from_reader_with_options(reader, CfgOptions::default())
}

/// Deserialize a record of type `T` from an I/O stream with custom options.
///
/// # Errors
///
/// Returns an error if reading fails, or the text cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R, T>(mut reader: R, options: CfgOptions) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str_with_options(&string, options)
}

/// Deserialize a record of type `T` from bytes of CFG text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_slice_with_options(v, CfgOptions::default())
}

/// Deserialize a record of type `T` from bytes of CFG text with custom options.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or cannot be decoded into `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options<'a, T>(v: &'a [u8], options: CfgOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str_with_options(s, options)
}

/// Read CFG text into an ordered [`Document`] without a target type.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::{parse_document, RawValue};
///
/// let doc = parse_document("name: 'demo'\nvoice: {\n  bitrate: 64000\n}").unwrap();
/// assert_eq!(doc.get("name").and_then(|e| e.scalar()), Some("demo"));
/// assert_eq!(doc.get("voice").unwrap().value, RawValue::Block("bitrate: 64000".into()));
/// ```
///
/// # Errors
///
/// Returns an error if a line is malformed or an array or block is left open.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document(s: &str) -> Result<Document> {
    Deserializer::from_str(s).read_document()
}
