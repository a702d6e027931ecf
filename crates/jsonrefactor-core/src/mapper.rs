//! Mapping engine
//!
//! [`refactor`] walks a [`MappingSpec`] entry by entry, reading each source
//! path with the getter and writing through the setter. Iteration entries
//! recurse: every element of the source sequence is refactored through the
//! nested specification into a fresh object, which is then written at the
//! iteration key.

use crate::getter::{get, Got};
use crate::path::value_kind;
use crate::setter::set;
use crate::spec::{Iteration, MappingEntry, MappingSpec, TargetDescriptor};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Refactor `source` into a new object
pub fn refactor(source: &Value, spec: &MappingSpec) -> Result<Value> {
    let mut target = Value::Object(Map::new());
    refactor_into(source, spec, &mut target)?;
    Ok(target)
}

/// Refactor `source` into an existing `target`
///
/// Entries already written stay in `target` when a later entry fails.
pub fn refactor_into(source: &Value, spec: &MappingSpec, target: &mut Value) -> Result<()> {
    let config = spec.config();
    log::debug!(
        "Refactoring with {} entries (set_undefined={}, strict_paths={})",
        spec.len(),
        config.set_undefined,
        config.strict_paths
    );

    for entry in spec.entries() {
        let got = match get(source, &entry.source) {
            Some(got) => got,
            None if config.strict_paths => {
                return Err(Error::UnresolvedSource {
                    path: entry.source.to_string(),
                });
            }
            None => {
                log::trace!("Source path '{}' is not addressable, treating as absent", entry.source);
                Got {
                    need_iteration: entry.source.iterate(),
                    value: None,
                }
            }
        };

        if got.value.is_none() && !config.set_undefined {
            log::trace!("Skipping '{}': no value", entry.source);
            continue;
        }

        if got.need_iteration {
            iterate_entry(entry, got.value, target)?;
        } else {
            if entry.target.is_iteration() {
                return Err(Error::descriptor_mismatch(
                    entry.source.as_str(),
                    "iteration descriptor requires an iteration source",
                ));
            }
            set(target, &entry.target, got.value, config.set_undefined)?;
        }
    }

    Ok(())
}

fn iterate_entry(entry: &MappingEntry, value: Option<&Value>, target: &mut Value) -> Result<()> {
    let TargetDescriptor::Iteration(Iteration { key, map }) = &entry.target else {
        return Err(Error::descriptor_mismatch(
            entry.source.as_str(),
            format!("iteration source requires an iteration descriptor, got {}", entry.target.kind()),
        ));
    };

    let items = match value {
        None | Some(Value::Null) => {
            log::warn!("Nothing to iterate at '{}', skipping", entry.source);
            return Ok(());
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::NotIterable {
                path: entry.source.to_string(),
                found: value_kind(other),
            });
        }
    };

    log::debug!("Iterating {} elements of '{}' into '{}'", items.len(), entry.source, key);
    for item in items {
        let refactored = refactor(item, map)?;
        set(target, &entry.target, Some(&refactored), false)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::Coercion;
    use crate::spec::Transformed;
    use serde_json::json;

    #[test]
    fn test_identity_mapping() {
        let source = json!({"a": 1, "b": 2});
        let spec = MappingSpec::builder().map("a", "a").map("b", "b").build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), source);
    }

    #[test]
    fn test_nested_paths() {
        let source = json!({"a": {"b": {"c": 5}}});
        let spec = MappingSpec::builder().map("a.b.c", "x.y.z").build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({"x": {"y": {"z": 5}}}));
    }

    #[test]
    fn test_iteration_entry() {
        let source = json!({"items": [{"n": 1}, {"n": 2}]});
        let nested = MappingSpec::builder().map("n", "m").build().unwrap();
        let spec = MappingSpec::builder().iterate("items[]", "out[]", nested).build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({"out": [{"m": 1}, {"m": 2}]}));
    }

    #[test]
    fn test_undefined_skip_and_force() {
        let source = json!({});
        let spec = MappingSpec::builder().map("a", "b").build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({}));

        let spec = MappingSpec::builder().map("a", "b").set_undefined(true).build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({"b": null}));
    }

    #[test]
    fn test_unresolvable_source_policy() {
        let source = json!({"a": 1});
        let spec = MappingSpec::builder().map("x.y", "out").build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({}));

        let spec = MappingSpec::builder().map("x.y", "out").set_undefined(true).build().unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({"out": null}));

        let spec = MappingSpec::builder().map("x.y", "out").strict_paths(true).build().unwrap();
        let err = refactor(&source, &spec).unwrap_err();
        assert!(matches!(err, Error::UnresolvedSource { ref path } if path == "x.y"));
    }

    #[test]
    fn test_iteration_over_non_array() {
        let nested = MappingSpec::builder().map("n", "m").build().unwrap();
        let spec = MappingSpec::builder().iterate("items", "out[]", nested).build().unwrap();

        let err = refactor(&json!({"items": "nope"}), &spec).unwrap_err();
        assert!(matches!(err, Error::NotIterable { found: "a string", .. }));

        assert_eq!(refactor(&json!({"items": null}), &spec).unwrap(), json!({}));
        assert_eq!(refactor(&json!({}), &spec).unwrap(), json!({}));
    }

    #[test]
    fn test_forced_undefined_iteration_writes_nothing() {
        let nested = MappingSpec::builder().map("n", "m").build().unwrap();
        let spec = MappingSpec::builder()
            .iterate("items", "out[]", nested)
            .set_undefined(true)
            .build()
            .unwrap();
        assert_eq!(refactor(&json!({}), &spec).unwrap(), json!({}));
    }

    #[test]
    fn test_unvalidated_mismatch_is_reported() {
        use crate::spec::{MappingEntry, RefactorConfig, SourcePath, TargetPath};

        let entry = MappingEntry::new(SourcePath::parse("items[]").unwrap(), TargetPath::new("out").unwrap());
        let spec = MappingSpec::new(vec![entry], RefactorConfig::default());
        let err = refactor(&json!({"items": [1]}), &spec).unwrap_err();
        assert!(matches!(err, Error::DescriptorMismatch { .. }));
    }

    #[test]
    fn test_nested_config_is_independent() {
        let source = json!({"rows": [{"a": 1}, {}]});
        let nested = MappingSpec::builder().map("a", "b").set_undefined(true).build().unwrap();
        let spec = MappingSpec::builder().iterate("rows", "out[]", nested).build().unwrap();
        assert_eq!(
            refactor(&source, &spec).unwrap(),
            json!({"out": [{"b": 1}, {"b": null}]})
        );
    }

    #[test]
    fn test_refactor_into_existing_target() {
        let source = json!({"price": "9.5", "tags": ["x", "y"]});
        let spec = MappingSpec::builder()
            .coerce("price", "item.price", Coercion::Number)
            .map("tags", "item.tags")
            .transform("tags", |tags| {
                let count = tags.as_array()?.len();
                Some(Transformed::new("item.tagCount", json!(count)))
            })
            .build()
            .unwrap();

        let mut target = json!({"item": {"id": 7}});
        refactor_into(&source, &spec, &mut target).unwrap();
        assert_eq!(
            target,
            json!({"item": {"id": 7, "price": 9.5, "tags": ["x", "y"], "tagCount": 2}})
        );
    }

    #[test]
    fn test_entries_run_in_order() {
        let source = json!({"a": 1, "b": 2});
        let spec = MappingSpec::builder()
            .map("b", "list[]")
            .map("a", "list[]")
            .map("b", "last")
            .map("a", "last")
            .build()
            .unwrap();
        assert_eq!(refactor(&source, &spec).unwrap(), json!({"list": [2, 1], "last": 1}));
    }
}
