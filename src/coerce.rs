//! Conversion between raw tokens and typed scalars.
//!
//! Decoding is deliberately permissive: booleans never fail, and numeric tokens
//! that do not parse become zero unless strict numbers are enabled in
//! [`CfgOptions`](crate::CfgOptions).

use crate::field::{Scalar, ScalarKind};
use crate::{Error, Result};
use log::trace;
use std::str::FromStr;

/// Tokens that decode to `true`, compared case-insensitively.
pub const TRUE_TOKENS: [&str; 5] = ["t", "true", "y", "yes", "1"];

/// Removes one layer of matching single or double quotes.
///
/// # Examples
///
/// ```rust
/// use serde_cfg::coerce::unwrap_quotes;
///
/// assert_eq!(unwrap_quotes("'test'"), "test");
/// assert_eq!(unwrap_quotes("\"test\""), "test");
/// assert_eq!(unwrap_quotes("test"), "test");
/// assert_eq!(unwrap_quotes("'test\""), "'test\"");
/// ```
#[must_use]
pub fn unwrap_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if first == bytes[bytes.len() - 1] && (first == b'\'' || first == b'"') {
            return &token[1..token.len() - 1];
        }
    }
    token
}

/// Removes a single trailing comma.
#[must_use]
pub fn strip_trailing_comma(token: &str) -> &str {
    token.strip_suffix(',').unwrap_or(token)
}

/// # Examples
///
/// ```rust
/// use serde_cfg::coerce::parse_bool;
///
/// assert!(parse_bool("YES"));
/// assert!(parse_bool("1"));
/// assert!(!parse_bool("enabled"));
/// ```
#[must_use]
pub fn parse_bool(token: &str) -> bool {
    TRUE_TOKENS
        .iter()
        .any(|candidate| token.eq_ignore_ascii_case(candidate))
}

/// Parses a base-10 number at the width of `T`.
///
/// A token that does not parse yields `T::default()` (zero), or
/// [`Error::Coercion`] when `strict` is set.
pub fn parse_number<T>(token: &str, kind: ScalarKind, line: usize, strict: bool) -> Result<T>
where
    T: FromStr + Default,
{
    match token.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) if strict => Err(Error::coercion(line, token, kind)),
        Err(_) => {
            trace!("line {}: `{}` is not a valid {}, using 0", line, token, kind);
            Ok(T::default())
        }
    }
}

/// Renders a scalar as the right-hand side of a `key: value` line.
///
/// Strings are single-quoted without escaping; floats use fixed notation with
/// `precision` decimals.
#[must_use]
pub fn render_scalar(scalar: &Scalar, precision: usize) -> String {
    match scalar {
        Scalar::String(s) => format!("'{}'", s),
        Scalar::Float(f) => format!("{:.*}", precision, f),
        other => other.to_string(),
    }
}

/// Renders a scalar as an array element: always single-quoted, in plain form.
#[must_use]
pub fn render_element(scalar: &Scalar) -> String {
    format!("'{}'", scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_quotes_edge_cases() {
        assert_eq!(unwrap_quotes(""), "");
        assert_eq!(unwrap_quotes("'"), "'");
        assert_eq!(unwrap_quotes("''"), "");
        assert_eq!(unwrap_quotes("'a'b'"), "a'b");
    }

    #[test]
    fn test_strip_trailing_comma_once() {
        assert_eq!(strip_trailing_comma("a,,"), "a,");
        assert_eq!(strip_trailing_comma("a"), "a");
        assert_eq!(strip_trailing_comma(","), "");
    }

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["t", "T", "true", "True", "y", "Yes", "1"] {
            assert!(parse_bool(token), "{token} should be true");
        }
        for token in ["false", "no", "0", "", "on"] {
            assert!(!parse_bool(token), "{token} should be false");
        }
    }

    #[test]
    fn test_parse_number_silent_zero() {
        assert_eq!(parse_number::<i32>("-100", ScalarKind::Int, 1, false).unwrap(), -100);
        assert_eq!(parse_number::<i32>("10.5", ScalarKind::Int, 1, false).unwrap(), 0);
        assert_eq!(parse_number::<u8>("300", ScalarKind::Uint, 1, false).unwrap(), 0);
        assert_eq!(parse_number::<u64>("-1", ScalarKind::Uint, 1, false).unwrap(), 0);
        assert_eq!(parse_number::<f32>("10.5", ScalarKind::Float, 1, false).unwrap(), 10.5);
        assert_eq!(parse_number::<f64>("abc", ScalarKind::Float, 1, false).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_number_strict() {
        let err = parse_number::<i64>("ten", ScalarKind::Int, 4, true).unwrap_err();
        assert!(matches!(
            err,
            Error::Coercion { line: 4, kind: ScalarKind::Int, .. }
        ));
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(render_scalar(&Scalar::String("a b".into()), 6), "'a b'");
        assert_eq!(render_scalar(&Scalar::Bool(true), 6), "true");
        assert_eq!(render_scalar(&Scalar::Int(-100), 6), "-100");
        assert_eq!(render_scalar(&Scalar::Uint(100), 6), "100");
        assert_eq!(render_scalar(&Scalar::Float(3.14), 6), "3.140000");
        assert_eq!(render_scalar(&Scalar::Float(f64::from(3.14f32)), 6), "3.140000");
    }

    #[test]
    fn test_render_element() {
        assert_eq!(render_element(&Scalar::String("a".into())), "'a'");
        assert_eq!(render_element(&Scalar::Int(7)), "'7'");
        assert_eq!(render_element(&Scalar::Float(2.5)), "'2.5'");
    }
}
