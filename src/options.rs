//! Configuration options for CFG decoding and encoding.
//!
//! ## Examples
//!
//! ```rust
//! use serde_cfg::{to_string_with_options, CfgOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { ratio: f64 }
//!
//! let options = CfgOptions::new().with_float_precision(2);
//! let cfg = to_string_with_options(&Data { ratio: 0.5 }, options).unwrap();
//! assert_eq!(cfg, "ratio: 0.50");
//! ```

/// Options shared by the decoder and the encoder.
///
/// The defaults reproduce the format's reference behavior: 2-space indentation,
/// six float decimals, zero-filled missing fields, and numeric tokens that fail to
/// parse silently becoming zero.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::CfgOptions;
///
/// let options = CfgOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.float_precision, 6);
/// assert!(options.fill_missing);
/// assert!(!options.strict_numbers);
///
/// let strict = CfgOptions::strict();
/// assert!(strict.strict_numbers);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CfgOptions {
    /// Spaces per nesting level when encoding.
    pub indent: usize,
    /// Decimals written for floats when encoding.
    pub float_precision: usize,
    /// Decode fields absent from the document as zero values.
    pub fill_missing: bool,
    /// Report unparsable numbers as [`Error::Coercion`](crate::Error::Coercion).
    pub strict_numbers: bool,
}

impl Default for CfgOptions {
    fn default() -> Self {
        CfgOptions {
            indent: 2,
            float_precision: 6,
            fill_missing: true,
            strict_numbers: false,
        }
    }
}

impl CfgOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with strict numeric parsing.
    #[must_use]
    pub fn strict() -> Self {
        CfgOptions {
            strict_numbers: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision;
        self
    }

    /// Controls zero-filling of absent fields.
    ///
    /// Zero values are `false`, `0`, `'\0'`, an empty string or sequence, `None`,
    /// a zero-filled record, and the first variant of an enum.
    ///
    /// When disabled, absent fields fall back to serde's own handling, so they
    /// need `#[serde(default)]` or an `Option` type.
    #[must_use]
    pub fn with_fill_missing(mut self, fill: bool) -> Self {
        self.fill_missing = fill;
        self
    }

    #[must_use]
    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }
}
