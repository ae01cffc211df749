use serde::{Deserialize, Serialize};
use serde_cfg::{from_str, parse_document, to_string, Error, RawValue};

fn array(items: &[&str]) -> RawValue {
    RawValue::Array(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_value_splits_at_first_colon() {
    let doc = parse_document("url: http://host:80/path\ntime: 12:30").unwrap();
    assert_eq!(doc.get("url").and_then(|e| e.scalar()), Some("http://host:80/path"));
    assert_eq!(doc.get("time").and_then(|e| e.scalar()), Some("12:30"));
}

#[test]
fn test_line_numbers_count_raw_lines() {
    let doc = parse_document("\n# comment\n\na: 1\n\n  b: 2").unwrap();
    assert_eq!(doc.get("a").map(|e| e.line), Some(4));
    assert_eq!(doc.get("b").map(|e| e.line), Some(6));
}

#[test]
fn test_keys_are_trimmed_and_case_sensitive() {
    let doc = parse_document("  Name :x\nname: y").unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["Name", "name"]);
    assert_eq!(doc.get("Name").and_then(|e| e.scalar()), Some("x"));
}

#[test]
fn test_excluded_key_never_stored() {
    let doc = parse_document("-: [a, b]\n- : {x: 1}\nkept: 1").unwrap();
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["kept"]);
}

#[test]
fn test_array_content_on_bracket_lines() {
    let doc = parse_document("tags: [ 'a',\n  'b',\n  'c' ],\nnext: 1").unwrap();
    assert_eq!(doc.get("tags").unwrap().value, array(&["'a'", "'b'", "'c'"]));
    assert_eq!(doc.get("next").and_then(|e| e.scalar()), Some("1"));
}

#[test]
fn test_array_elements_skip_comments() {
    let doc = parse_document("tags: [\n  # first\n  a, # trailing\n  b\n]").unwrap();
    assert_eq!(doc.get("tags").unwrap().value, array(&["a", "b"]));
}

#[test]
fn test_quoted_delimiters_stay_scalar() {
    let doc = parse_document("pattern: '[a-z]+'\nbraces: \"{}\"").unwrap();
    assert_eq!(doc.get("pattern").and_then(|e| e.scalar()), Some("[a-z]+"));
    assert_eq!(doc.get("braces").and_then(|e| e.scalar()), Some("{}"));
}

#[test]
fn test_closer_before_opener_is_scalar() {
    let doc = parse_document("odd: a]b[c").unwrap();
    assert_eq!(doc.get("odd").unwrap().value, RawValue::Scalar("a]b[c".into()));
}

#[test]
fn test_blocks_merge_across_repeats() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Voice {
        bitrate: u32,
        host: String,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Server {
        voice: Voice,
    }

    let server: Server = from_str("voice: {\n  bitrate: 1\n}\nvoice: {host: x}").unwrap();
    assert_eq!(
        server.voice,
        Voice {
            bitrate: 1,
            host: "x".to_string()
        }
    );
}

#[test]
fn test_key_only_line_with_array_continuation() {
    #[derive(Deserialize)]
    struct Modules {
        modules: Vec<String>,
    }

    let v: Modules = from_str("modules:\n  # list follows\n  [a, b]").unwrap();
    assert_eq!(v.modules, vec!["a", "b"]);
}

#[test]
fn test_nested_line_numbers_are_block_relative() {
    #[derive(Deserialize, Debug)]
    struct Inner {
        #[allow(dead_code)]
        x: u32,
    }

    #[derive(Deserialize, Debug)]
    struct Outer {
        #[allow(dead_code)]
        inner: Inner,
    }

    let err = from_str::<Outer>("a: 1\ninner: {\n  y: 2\n  broken\n}").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(matches!(
        err.root_cause(),
        Error::MalformedLine { line: 2, .. }
    ));
}

#[test]
fn test_encoded_output_is_canonical() {
    #[derive(Serialize)]
    struct Inner {
        names: Vec<String>,
        ratio: f32,
    }

    #[derive(Serialize)]
    struct Outer {
        name: String,
        inner: Inner,
        limit: Option<u32>,
        unset: Option<u32>,
    }

    let cfg = to_string(&Outer {
        name: "it's".to_string(),
        inner: Inner {
            names: vec!["x".to_string()],
            ratio: 0.5,
        },
        limit: Some(3),
        unset: None,
    })
    .unwrap();

    assert_eq!(
        cfg,
        "name: 'it's',\ninner: {\n  names: [\n    'x'\n  ],\n  ratio: 0.500000\n},\nlimit: 3"
    );
}
