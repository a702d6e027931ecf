//! Property-based tests for path resolution and the mapper
//!
//! These tests check that parsing never panics, that writes can be read
//! back, and that mapping is deterministic.

#[cfg(test)]
mod tests {
    use crate::path::{assign, lookup, Path, PathError};
    use crate::{refactor, MappingSpec};
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    /// Strategy for generating simple JSON values with controlled depth
    fn json_value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
        ];

        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Strategy for write-then-read paths: names with optional explicit indices
    fn indexed_path_strategy() -> impl Strategy<Value = String> {
        let segment = ("[a-z]{1,6}", proptest::option::of(0usize..4)).prop_map(|(name, index)| match index {
            Some(i) => format!("{}[{}]", name, i),
            None => name,
        });
        proptest::collection::vec(segment, 1..5).prop_map(|segments| segments.join("."))
    }

    proptest! {
        /// Property: parsing arbitrary input never panics
        #[test]
        fn prop_path_parse_never_panics(input in ".{0,40}") {
            let _ = Path::parse(&input);
        }

        /// Property: a value written at a path reads back from the same path
        #[test]
        fn prop_assign_then_lookup(path in indexed_path_strategy(), value in json_value_strategy()) {
            let mut target = Value::Object(Map::new());
            assign(&mut target, &path, value.clone()).unwrap();
            prop_assert_eq!(lookup(&target, &path).unwrap(), Some(&value));
        }

        /// Property: writing at any index either pads the array or fails cleanly
        #[test]
        fn prop_assign_any_index_never_panics(
            len in 0usize..4,
            index in prop_oneof![0usize..20_000, any::<usize>()]
        ) {
            let mut target = json!({"out": vec![Value::Null; len]});
            match assign(&mut target, &format!("out[{}]", index), json!(1)) {
                Ok(()) => prop_assert_eq!(&target["out"][index], &json!(1)),
                Err(err) => {
                    let out_of_range = matches!(err, PathError::IndexOutOfRange { .. });
                    prop_assert!(out_of_range);
                    prop_assert_eq!(target["out"].as_array().map(Vec::len), Some(len));
                }
            }
        }

        /// Property: mapping every top-level key onto itself reproduces the object
        #[test]
        fn prop_identity_mapping(
            fields in proptest::collection::btree_map("[a-z_]{1,8}", json_value_strategy(), 0..6)
        ) {
            let source = Value::Object(fields.clone().into_iter().collect());
            let spec = fields
                .keys()
                .fold(MappingSpec::builder(), |builder, key| builder.map(key.as_str(), key.as_str()))
                .build()
                .unwrap();

            prop_assert_eq!(refactor(&source, &spec).unwrap(), source);
        }

        /// Property: appending keeps call order
        #[test]
        fn prop_append_preserves_order(values in proptest::collection::vec(json_value_strategy(), 0..8)) {
            let mut target = Value::Object(Map::new());
            for value in &values {
                assign(&mut target, "out.list[]", value.clone()).unwrap();
            }

            let expected = if values.is_empty() {
                None
            } else {
                Some(Value::Array(values))
            };
            prop_assert_eq!(lookup(&target, "out.list").unwrap().cloned(), expected);
        }

        /// Property: refactoring is deterministic
        #[test]
        fn prop_refactor_deterministic(source in json_value_strategy()) {
            let spec = MappingSpec::builder()
                .map("a", "x.a")
                .map("b[0]", "x.first")
                .map("c", "!!x.flag")
                .map("d", "+x.count")
                .build()
                .unwrap();

            let first = refactor(&source, &spec).unwrap();
            let second = refactor(&source, &spec).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
