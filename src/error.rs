//! Error types for CFG decoding and encoding.
//!
//! Every decode failure aborts the whole call and reports the 1-based line on
//! which it was detected. Failures inside a nested block are wrapped in
//! [`Error::Nested`], which names the block's key and the line it started on.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_cfg::{from_str, Error};
//!
//! #[derive(Deserialize, Debug)]
//! struct Server {
//!     modules: Vec<String>,
//! }
//!
//! let result: Result<Server, Error> = from_str("modules: [\n  'a'\n");
//! assert!(matches!(result, Err(Error::EndOfInput { .. })));
//! ```

use crate::field::ScalarKind;
use std::fmt;
use thiserror::Error;

/// All errors produced while decoding or encoding CFG text.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The decode or encode target is not a record.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Input ran out while a continuation line or a closing delimiter was expected.
    #[error("unexpected end of input after line {line}: expected {expected}")]
    EndOfInput { line: usize, expected: String },

    /// A logical line without a `:` separator.
    #[error("malformed line {line}: expected `key: value`, found `{content}`")]
    MalformedLine { line: usize, content: String },

    /// The continuation of a key-only line looks like another `key: value` pair.
    #[error("unexpected key on line {line}: expected a value, found `{content}`")]
    UnexpectedKey { line: usize, content: String },

    /// An array or nested block met a field declared with an incompatible kind.
    #[error("type mismatch on line {line}: cannot decode {found} into {expected}")]
    TypeMismatch {
        line: usize,
        expected: String,
        found: String,
    },

    /// A numeric token that does not parse, reported only with strict numbers.
    #[error("could not convert `{value}` to {kind} on line {line}")]
    Coercion {
        line: usize,
        value: String,
        kind: ScalarKind,
    },

    /// A failure inside a nested block.
    #[error("in nested block `{key}` starting on line {line}: {source}")]
    Nested {
        key: String,
        line: usize,
        source: Box<Error>,
    },

    /// A value with no textual representation in CFG.
    #[error("cannot encode {0}: no textual representation")]
    EncodeUnsupportedKind(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Message raised through serde, such as an unknown enum variant.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid target error.
    pub fn invalid_target<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidTarget(msg.to_string())
    }

    /// Creates an end-of-input error for the last line read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cfg::Error;
    ///
    /// let err = Error::end_of_input(7, "closing `]`");
    /// assert_eq!(err.line(), Some(7));
    /// assert!(err.to_string().contains("closing `]`"));
    /// ```
    pub fn end_of_input(line: usize, expected: &str) -> Self {
        Error::EndOfInput {
            line,
            expected: expected.to_string(),
        }
    }

    pub fn malformed_line(line: usize, content: &str) -> Self {
        Error::MalformedLine {
            line,
            content: content.to_string(),
        }
    }

    pub fn unexpected_key(line: usize, content: &str) -> Self {
        Error::UnexpectedKey {
            line,
            content: content.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_cfg::Error;
    ///
    /// let err = Error::type_mismatch(3, "string", "array");
    /// assert!(err.to_string().contains("cannot decode array into string"));
    /// ```
    pub fn type_mismatch(line: usize, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            line,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn coercion(line: usize, value: &str, kind: ScalarKind) -> Self {
        Error::Coercion {
            line,
            value: value.to_string(),
            kind,
        }
    }

    /// Wraps an error raised while decoding the nested block under `key`.
    pub fn nested(key: &str, line: usize, source: Error) -> Self {
        Error::Nested {
            key: key.to_string(),
            line,
            source: Box::new(source),
        }
    }

    pub fn unsupported_kind<T: fmt::Display>(what: T) -> Self {
        Error::EncodeUnsupportedKind(what.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading or writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the line the error was detected on, if it has one.
    ///
    /// For nested failures this is the line the nested block started on in the
    /// enclosing document.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::EndOfInput { line, .. }
            | Error::MalformedLine { line, .. }
            | Error::UnexpectedKey { line, .. }
            | Error::TypeMismatch { line, .. }
            | Error::Coercion { line, .. }
            | Error::Nested { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns the innermost error, looking through nested-block wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_root_cause() {
        let inner = Error::type_mismatch(2, "bool", "array");
        let outer = Error::nested("voice", 10, Error::nested("codec", 3, inner));

        assert_eq!(outer.line(), Some(10));
        assert!(matches!(
            outer.root_cause(),
            Error::TypeMismatch { line: 2, .. }
        ));
        assert!(outer.to_string().contains("`voice`"));
        assert!(outer.to_string().contains("`codec`"));
    }

    #[test]
    fn test_line_absent_for_encode_errors() {
        assert_eq!(Error::unsupported_kind("unit").line(), None);
        assert_eq!(Error::invalid_target("i32").line(), None);
    }
}
