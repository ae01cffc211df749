//! CFG serialization.
//!
//! This module provides the [`Serializer`] that renders a record's fields as CFG
//! text.
//!
//! ## Overview
//!
//! A record is first flattened into its [`Field`] list by
//! [`extract_fields`](crate::extract_fields), then written one entry per field,
//! entries joined by `,\n`:
//!
//! - **Scalars**: `key: 'text'`, `key: true`, `key: -100`, `key: 3.140000`
//! - **Arrays**: one single-quoted element per line, indented one level
//! - **Nested records**: the nested encoding between `{` and `}`, every line
//!   indented one level
//!
//! Fields keyed `-` are never written. Strings are not escaped, so a string
//! holding a quote or a newline does not survive a round trip.
//!
//! ## Usage
//!
//! ```rust
//! use serde_cfg::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Inner { working: bool, int_val: i32 }
//!
//! #[derive(Serialize)]
//! struct Outer { name: String, tags: Vec<String>, inner: Inner }
//!
//! let outer = Outer {
//!     name: "demo".into(),
//!     tags: vec!["a".into(), "b".into()],
//!     inner: Inner { working: true, int_val: 42 },
//! };
//!
//! assert_eq!(
//!     to_string(&outer).unwrap(),
//!     "name: 'demo',\ntags: [\n  'a',\n  'b'\n],\ninner: {\n  working: true,\n  int_val: 42\n}"
//! );
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_cfg::{CfgOptions, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Limits { max: u32 }
//!
//! let mut serializer = Serializer::new(CfgOptions::new().with_indent(4));
//! serializer.encode(&Limits { max: 8 }).unwrap();
//! assert_eq!(serializer.into_inner(), "max: 8");
//! ```

use crate::coerce::{render_element, render_scalar};
use crate::field::{extract_fields, Field, FieldValue};
use crate::options::CfgOptions;
use crate::Result;
use log::{debug, trace};
use serde::Serialize;

/// The CFG serializer.
///
/// Accumulates encoded text in an internal buffer; take it with
/// [`into_inner`](Serializer::into_inner).
pub struct Serializer {
    output: String,
    options: CfgOptions,
}

impl Serializer {
    pub fn new(options: CfgOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Encodes `record`, which must serialize as a struct or map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`](crate::Error::InvalidTarget) for
    /// non-record values and
    /// [`Error::EncodeUnsupportedKind`](crate::Error::EncodeUnsupportedKind)
    /// for fields the format cannot represent. Nothing is written on error.
    pub fn encode<T>(&mut self, record: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let fields = extract_fields(record)?;
        self.encode_fields(&fields);
        Ok(())
    }

    /// Encodes an already extracted field list.
    pub fn encode_fields(&mut self, fields: &[Field]) {
        let text = self.render_fields(fields);
        debug!("encoded {} fields into {} bytes", fields.len(), text.len());
        self.output.push_str(&text);
    }

    fn render_fields(&self, fields: &[Field]) -> String {
        let entries: Vec<String> = fields
            .iter()
            .filter(|field| !field.is_excluded())
            .map(|field| self.render_field(field))
            .collect();

        entries.join(",\n")
    }

    fn render_field(&self, field: &Field) -> String {
        let pad = " ".repeat(self.options.indent);

        match &field.value {
            FieldValue::Scalar(scalar) => format!(
                "{}: {}",
                field.key,
                render_scalar(scalar, self.options.float_precision)
            ),
            FieldValue::Array(items) => {
                let elements: Vec<String> = items
                    .iter()
                    .map(|item| format!("{}{}", pad, render_element(item)))
                    .collect();
                format!("{}: [\n{}\n]", field.key, elements.join(",\n"))
            }
            FieldValue::Record(fields) => {
                trace!("encoding nested record `{}`", field.key);
                let inner = self.render_fields(fields);
                let indented = inner.replace('\n', &format!("\n{}", pad));
                format!("{}: {{\n{}{}\n}}", field.key, pad, indented)
            }
        }
    }
}
