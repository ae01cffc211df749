//! Property-based tests for the encode/decode round trip.
//!
//! Only records can sit at the top level, so every generated value is wrapped
//! in a small struct. Generated strings avoid quote characters, `#` and line
//! breaks, which the format cannot carry unescaped.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_cfg::{from_str, parse_document, to_string};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Scalars {
    text: String,
    flag: bool,
    signed: i64,
    unsigned: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Lists {
    words: Vec<String>,
    numbers: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper {
    id: u16,
    inner: Scalars,
}

#[derive(Serialize, Deserialize, Debug)]
struct Measured {
    value: f64,
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn safe_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./@-]([a-zA-Z0-9 _./@-]{0,30}[a-zA-Z0-9_./@-])?"
}

fn word() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./@-]{1,12}"
}

proptest! {
    #[test]
    fn prop_scalars(
        text in safe_text(),
        flag in any::<bool>(),
        signed in any::<i64>(),
        unsigned in any::<u32>(),
    ) {
        let value = Scalars { text, flag, signed, unsigned };
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_lists(
        words in prop::collection::vec(word(), 0..10),
        numbers in prop::collection::vec(any::<i32>(), 0..10),
    ) {
        let value = Lists { words, numbers };
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_nested(id in any::<u16>(), text in safe_text(), signed in any::<i64>()) {
        let value = Wrapper {
            id,
            inner: Scalars { text, flag: true, signed, unsigned: 7 },
        };
        prop_assert!(roundtrip(&value));
    }

    #[test]
    fn prop_float_within_precision(value in -1.0e6f64..1.0e6f64) {
        let cfg = to_string(&Measured { value }).unwrap();
        let back: Measured = from_str(&cfg).unwrap();
        prop_assert!((back.value - value).abs() <= 1.0e-6);
    }

    #[test]
    fn prop_document_keeps_key_order(keys in prop::collection::btree_set("[a-z]{1,8}", 1..10)) {
        let keys: Vec<String> = keys.into_iter().rev().collect();
        let text = keys
            .iter()
            .map(|key| format!("{}: 1", key))
            .collect::<Vec<_>>()
            .join("\n");

        let doc = parse_document(&text).unwrap();
        prop_assert_eq!(doc.keys().collect::<Vec<_>>(), keys.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
