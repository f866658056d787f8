//! End-to-end tests over the public API: encoding, decoding in both modes,
//! validation, token accounting, and the serde bridge.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use toon_codec::{
    compare, decode, decode_with_options, encode, encode_with_options, from_str, to_string,
    validate, CharEstimator, DecodeError, DecodeOptions, Delimiter, EncodeError, EncodeOptions,
    Map, Number, Value,
};

#[test]
fn nested_mapping_layout() {
    let value = toon_codec::toon!({
        "intent": "find",
        "entities": { "name": "Alice", "status": "active" }
    });
    let text = encode(&value).unwrap();
    assert_eq!(
        text,
        "intent: find\nentities:\n  name: Alice\n  status: active"
    );
    assert_eq!(decode(&text).unwrap().value, value);
}

#[test]
fn tabular_array_layout() {
    let value = toon_codec::toon!({
        "contacts": [
            {"name": "John", "email": "john@x.com"},
            {"name": "Sarah", "email": "sarah@x.com"}
        ]
    });
    let text = encode(&value).unwrap();
    assert_eq!(
        text,
        "contacts [2,]\n  name, email\n  John, john@x.com\n  Sarah, sarah@x.com"
    );
    assert_eq!(decode(&text).unwrap().value, value);
}

#[test]
fn primitive_array_layout() {
    let value = toon_codec::toon!({ "tags": ["a", "b", "c"] });
    let text = encode(&value).unwrap();
    assert_eq!(text, "tags [3]: a, b, c");
    assert_eq!(decode(&text).unwrap().value, value);
}

#[test]
fn compare_reports_positive_savings() {
    let value = toon_codec::toon!({ "intent": "find", "limit": 5 });
    let report = compare(&value, &CharEstimator).unwrap();
    assert!(report.savings_percent > 0.0);
    assert!(report.toon_tokens < report.json_tokens);
}

#[test]
fn round_trip_deep_mixed_structure() {
    let value = toon_codec::toon!({
        "id": 7,
        "meta": {
            "labels": ["x", "y"],
            "owner": { "name": "Ada", "admin": true }
        },
        "rows": [
            {"a": 1, "b": 2},
            {"a": 3, "b": 4}
        ],
        "mixed": [1, "two", null, {"nested": [true, false]}],
        "empty_list": [],
        "empty_map": {}
    });
    let text = encode(&value).unwrap();
    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.value, value);
    assert!(decoded.warnings.is_empty());
}

#[test]
fn round_trip_with_pipe_and_tab_delimiters() {
    let value = toon_codec::toon!({
        "cells": ["a, b", "c"],
        "rows": [{"k": "1, 2", "v": 3}]
    });
    for delimiter in [Delimiter::Pipe, Delimiter::Tab] {
        let enc = EncodeOptions::new().with_delimiter(delimiter);
        let dec = DecodeOptions::new().with_delimiter(delimiter);
        let text = encode_with_options(&value, &enc).unwrap();
        // Commas are plain characters under these delimiters.
        assert!(!text.contains('"'));
        assert_eq!(decode_with_options(&text, &dec).unwrap().value, value);
    }
}

#[test]
fn round_trip_wrapped_primitive_array() {
    let words: Vec<Value> = (0..40).map(|i| Value::from(format!("word{}", i))).collect();
    let mut map = Map::new();
    map.insert("words".to_string(), Value::Array(words));
    let value = Value::Object(map);

    let text = encode(&value).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("words [40]:"));
    assert!(lines.next().unwrap().starts_with("  word0, word1"));
    assert_eq!(decode(&text).unwrap().value, value);
}

#[test]
fn quoting_is_minimal_and_reversible() {
    let cases = [
        ("plain", "k: plain"),
        ("hello world", "k: hello world"),
        ("a:b", "k: a:b"),
        ("true", "k: \"true\""),
        ("123", "k: \"123\""),
        ("", "k: \"\""),
        ("a, b", "k: \"a, b\""),
        (" padded", "k: \" padded\""),
        ("say \"hi\"", "k: \"say \\\"hi\\\"\""),
        ("line\nbreak", "k: \"line\\nbreak\""),
    ];
    for (input, expected) in cases {
        let mut map = Map::new();
        map.insert("k".to_string(), Value::from(input));
        let value = Value::Object(map);
        let text = encode(&value).unwrap();
        assert_eq!(text, expected, "encoding {:?}", input);
        assert_eq!(decode(&text).unwrap().value, value, "decoding {:?}", input);
    }
}

#[test]
fn literal_case_variant_strings_round_trip() {
    // Strings that spell a literal keyword in the wrong case must come back
    // as strings, never as booleans or nulls, in every scalar position.
    let value = toon_codec::toon!({
        "status": "True",
        "owner": "None",
        "cells": ["FALSE", "none"],
        "rows": [{"flag": "NULL", "v": 1}]
    });
    let text = encode(&value).unwrap();
    assert!(text.contains("status: \"True\""));
    assert!(text.contains("owner: \"None\""));

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.value, value);

    // Lenient mode must not reinterpret the quoted forms either.
    let decoded = decode_with_options(&text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(decoded.value, value);
    assert!(decoded.warnings.is_empty());

    let top = Value::from("True");
    assert_eq!(encode(&top).unwrap(), "\"True\"");
    assert_eq!(decode("\"True\"").unwrap().value, top);
}

#[test]
fn same_keys_different_order_is_not_tabular() {
    let mut first = Map::new();
    first.insert("a".to_string(), Value::from(1));
    first.insert("b".to_string(), Value::from(2));
    let mut second = Map::new();
    second.insert("b".to_string(), Value::from(3));
    second.insert("a".to_string(), Value::from(4));

    let mut root = Map::new();
    root.insert(
        "rows".to_string(),
        Value::Array(vec![Value::Object(first), Value::Object(second)]),
    );
    let value = Value::Object(root);

    let text = encode(&value).unwrap();
    assert!(text.starts_with("rows [2]\n"), "got: {}", text);
    assert_eq!(decode(&text).unwrap().value, value);
}

#[test]
fn strict_and_lenient_diverge_on_indentation() {
    let text = "outer:\n   inner: 1";
    assert!(matches!(
        decode(text).unwrap_err(),
        DecodeError::Indentation { line: 2, .. }
    ));

    let decoded = decode_with_options(text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(
        decoded.value,
        toon_codec::toon!({ "outer": { "inner": 1 } })
    );
    assert!(!decoded.warnings.is_empty());
}

#[test]
fn strict_rejects_every_length_marker_lie() {
    for text in [
        "tags [2]: a, b, c",
        "tags [4]: a, b, c",
        "rows [1,]\n  a\n  1\n  2",
        "items [3]\n  - 1\n  - 2",
    ] {
        assert!(
            matches!(decode(text), Err(DecodeError::LengthMismatch { .. })),
            "expected length mismatch for {:?}",
            text
        );
    }
}

#[test]
fn lenient_repairs_are_reported() {
    let text = "tags [5]: a, b\nflag: True";
    let decoded = decode_with_options(text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(
        decoded.value,
        toon_codec::toon!({ "tags": ["a", "b"], "flag": true })
    );
    assert_eq!(decoded.warnings.len(), 2);
    assert_eq!(decoded.warnings[0].line, 1);
    assert_eq!(decoded.warnings[1].line, 2);
}

#[test]
fn encode_depth_bound_reads_as_cycle() {
    let mut value = Value::from(0);
    for _ in 0..200 {
        value = Value::Array(vec![value]);
    }
    assert!(matches!(
        encode(&value),
        Err(EncodeError::CyclicStructure { .. })
    ));

    // A custom bound is honored.
    let shallow = toon_codec::toon!({ "a": { "b": { "c": 1 } } });
    let options = EncodeOptions::new().with_max_depth(1);
    assert!(encode_with_options(&shallow, &options).is_err());
}

#[test]
fn validator_agrees_with_strict_decode() {
    let good = "intent: find\ntags [2]: a, b";
    assert!(validate(good).is_valid());
    assert!(decode(good).is_ok());

    let bad = "tags [3]: a, b\nflag: True";
    let report = validate(bad);
    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 2);
    assert!(decode(bad).is_err());
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Contact {
    name: String,
    email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AddressBook {
    owner: String,
    contacts: Vec<Contact>,
    tags: BTreeSet<String>,
    updated: DateTime<Utc>,
    note: Option<String>,
}

#[test]
fn serde_struct_round_trip() {
    let book = AddressBook {
        owner: "Ada".to_string(),
        contacts: vec![
            Contact {
                name: "John".to_string(),
                email: "john@x.com".to_string(),
            },
            Contact {
                name: "Sarah".to_string(),
                email: "sarah@x.com".to_string(),
            },
        ],
        tags: ["work".to_string(), "family".to_string()].into_iter().collect(),
        updated: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        note: None,
    };

    let text = to_string(&book).unwrap();
    assert!(text.contains("contacts [2,]"));
    assert!(text.contains("2024-01-15T10:30:00"));
    assert!(text.contains("note: null"));

    let back: AddressBook = from_str(&text).unwrap();
    assert_eq!(back, book);
}

#[test]
fn serde_enum_round_trip() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Event {
        Ping,
        Named(String),
        Move { x: i64, y: i64 },
    }

    for event in [
        Event::Ping,
        Event::Named("boot".to_string()),
        Event::Move { x: 3, y: -4 },
    ] {
        let text = to_string(&event).unwrap();
        let back: Event = from_str(&text).unwrap();
        assert_eq!(back, event);
    }
}

#[test]
fn number_fidelity_through_text() {
    let value = toon_codec::toon!({
        "int": 42,
        "neg": -7,
        "float": 3.5,
        "whole_float": 10.0,
        "exp": 1.5e300
    });
    let decoded = decode(&encode(&value).unwrap()).unwrap().value;
    let obj = decoded.as_object().unwrap();
    assert_eq!(obj.get("int"), Some(&Value::Number(Number::Integer(42))));
    assert_eq!(
        obj.get("whole_float"),
        Some(&Value::Number(Number::Float(10.0)))
    );
    assert_eq!(obj.get("exp"), Some(&Value::Number(Number::Float(1.5e300))));
}

#[test]
fn top_level_arrays_and_scalars() {
    let array = toon_codec::toon!([1, 2, 3]);
    let text = encode(&array).unwrap();
    assert_eq!(text, "[3]: 1, 2, 3");
    assert_eq!(decode(&text).unwrap().value, array);

    let scalar = Value::from("hello");
    assert_eq!(encode(&scalar).unwrap(), "hello");
    assert_eq!(decode("hello").unwrap().value, scalar);
}
