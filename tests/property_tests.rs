//! Property-based tests for the core round-trip guarantees, complementing
//! the scenario tests with generated inputs.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use toon_codec::{decode, encode, from_str, to_string, Map, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(text) => match from_str::<T>(&text) {
            Ok(back) => *value == back,
            Err(e) => {
                eprintln!("deserialize failed: {}\ntext was: {:?}", e, text);
                false
            }
        },
        Err(e) => {
            eprintln!("serialize failed: {}", e);
            false
        }
    }
}

/// Arbitrary value trees with scalar strings drawn from an alphabet that
/// exercises the quoting rules (delimiters, colons, dashes, spaces).
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        prop::num::f64::NORMAL.prop_map(Value::from),
        "[a-zA-Z0-9 :,|._-]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z0-9_]{1,8}", inner), 0..6).prop_map(|entries| {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_finite_f64(x in prop::num::f64::NORMAL) {
        prop_assert!(roundtrip(&x));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple(t in (any::<i32>(), any::<bool>(), ".*")) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_string_map(m in prop::collection::hash_map(any::<String>(), any::<i64>(), 0..8)) {
        prop_assert!(roundtrip(&m));
    }

    #[test]
    fn prop_value_tree_roundtrip(value in value_strategy()) {
        let text = encode(&value).unwrap();
        let decoded = decode(&text).unwrap();
        prop_assert_eq!(&decoded.value, &value, "text was: {:?}", text);
        prop_assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn prop_encoded_arrays_never_lie_about_length(
        v in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let value = Value::Array(v.iter().copied().map(Value::from).collect());
        let mut map = Map::new();
        map.insert("xs".to_string(), value);
        let text = encode(&Value::Object(map)).unwrap();
        let expected_prefix = format!("xs [{}]", v.len());
        prop_assert!(text.starts_with(&expected_prefix));
    }
}
