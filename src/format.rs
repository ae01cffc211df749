//! CFG Format Reference
//!
//! This module documents the CFG text format as implemented by this library.
//!
//! # Overview
//!
//! A CFG document is a flat sequence of `key: value` entries, one per logical
//! line. Values are scalars, arrays, or nested documents. Whitespace around
//! keys and values is insignificant, and indentation carries no meaning.
//!
//! # Lines
//!
//! The text is split on line breaks and each line is trimmed. Then:
//!
//! - empty lines are skipped
//! - lines starting with `#` are skipped
//! - anything from a `#` outside a quoted token to the end of the line is dropped
//!
//! Line numbers in errors count raw lines, blank and comment lines included,
//! starting at 1.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_cfg::from_str;
//!
//! #[derive(Deserialize)]
//! struct Doc { channel: String, port: u16 }
//!
//! let doc: Doc = from_str("# header\n\nchannel: '#general'\nport: 80 # http").unwrap();
//! assert_eq!(doc.channel, "#general");
//! assert_eq!(doc.port, 80);
//! ```
//!
//! # Entries
//!
//! Each logical line splits at its **first** `:`. Later colons belong to the
//! value, so `url: http://host:80` has the value `http://host:80`. A line
//! without `:` is an error.
//!
//! A line whose value is empty takes its value from the next logical line:
//!
//! ```text
//! name:
//!   'TestServer'
//! ```
//!
//! That continuation line must not contain `:` itself.
//!
//! Keys are case-sensitive. The key `-` is reserved and its entries are
//! skipped. When a key repeats, arrays append, nested blocks concatenate, and
//! other values are replaced by the later one.
//!
//! # Scalars
//!
//! A scalar is everything after the separator, with one trailing `,` removed.
//! Matching single or double quotes around the token are removed; there are
//! no escape sequences.
//!
//! | Field type | Accepted tokens | Unparsable token |
//! |------------|-----------------|------------------|
//! | string | anything | - |
//! | bool | `t`, `true`, `y`, `yes`, `1` (any case) are true | false |
//! | signed integer | base-10, optional `-` | 0 |
//! | unsigned integer | base-10 | 0 |
//! | float | decimal or exponent notation | 0 |
//!
//! A number outside the field's range counts as unparsable. With
//! [`CfgOptions::strict`](crate::CfgOptions::strict), unparsable numbers are
//! reported as [`Error::Coercion`](crate::Error::Coercion) instead.
//!
//! # Arrays
//!
//! An array opens with `[`. When the matching `]` is on the same line, the
//! elements between them are split on whitespace, or on commas when there is
//! no whitespace:
//!
//! ```text
//! modules: [ "node-module", "csharp-module"]
//! modules: ["node-module","csharp-module"]
//! ```
//!
//! Otherwise every following logical line up to the matching `]` is one
//! element, with its trailing comma removed:
//!
//! ```text
//! modules: [
//!   "node-module",
//!   "csharp-module"
//! ]
//! ```
//!
//! Elements are scalars and decode like scalar fields. `[]` is an empty array.
//!
//! # Nested Blocks
//!
//! A nested block opens with `{` and holds a complete document, decoded into
//! the nested record field:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_cfg::from_str;
//!
//! #[derive(Deserialize)]
//! struct Voice { bitrate: u32, host: String }
//!
//! #[derive(Deserialize)]
//! struct Server { voice: Voice, limits: Voice }
//!
//! let cfg = "voice: {\n  bitrate: 64000,\n  host: localhost\n}\nlimits: {bitrate: 8, host: x}";
//! let server: Server = from_str(cfg).unwrap();
//! assert_eq!(server.voice.bitrate, 64000);
//! assert_eq!(server.limits.host, "x");
//! ```
//!
//! A block that closes on its opening line is split into entries at its
//! top-level commas. Blocks may nest to any depth; brackets and braces inside
//! quoted tokens do not count toward nesting.
//!
//! # Encoding
//!
//! The encoder writes the canonical form:
//!
//! ```text
//! name: 'TestServer',
//! enabled: true,
//! port: 7788,
//! ratio: 0.500000,
//! modules: [
//!   'node-module',
//!   'csharp-module'
//! ],
//! voice: {
//!   bitrate: 64000
//! }
//! ```
//!
//! - entries are joined by `,\n`, with no trailing separator
//! - strings are single-quoted; array elements are always single-quoted
//! - floats use fixed notation with six decimals by default
//! - nested lines are indented two spaces per level by default
//! - `None` fields are omitted
//!
//! Strings holding a quote character or a line break are written as-is and do
//! not decode back to the same value.
