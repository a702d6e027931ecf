//! Integration tests for specifications loaded from mapping documents

use jsonrefactor_core::{refactor, Error, MappingDocument, MappingSpec};
use serde_json::json;

const CONTACTS_DOCUMENT: &str = r#"{
    "config": { "set_undefined": false },
    "map": {
        "person.first": "name.given",
        "person.last": "name.family",
        "person.subscribed": "!!preferences.newsletter",
        "person.optedOut": "!preferences.contactable",
        "person.age": { "path": "age", "coercion": "number" },
        "person.phones[]": {
            "key": "phones[]",
            "map": {
                "kind": "type",
                "number": "value",
                "extension": "ext"
            },
            "config": { "set_undefined": true }
        }
    }
}"#;

#[test]
fn test_document_drives_refactor() {
    let spec = MappingSpec::from_json_str(CONTACTS_DOCUMENT).unwrap();
    let source = json!({
        "person": {
            "first": "Katherine",
            "last": "Johnson",
            "subscribed": "Y",
            "optedOut": "no",
            "age": "101",
            "phones": [
                {"kind": "home", "number": "555-0100"},
                {"kind": "work", "number": "555-0199", "extension": "12"}
            ]
        }
    });

    assert_eq!(
        refactor(&source, &spec).unwrap(),
        json!({
            "name": {"given": "Katherine", "family": "Johnson"},
            "preferences": {"newsletter": true, "contactable": true},
            "age": 101,
            "phones": [
                {"type": "home", "value": "555-0100", "ext": null},
                {"type": "work", "value": "555-0199", "ext": "12"}
            ]
        })
    );
}

#[test]
fn test_document_deserializes_through_serde() {
    let spec: MappingSpec = serde_json::from_str(CONTACTS_DOCUMENT).unwrap();
    assert_eq!(spec.len(), 6);
    assert!(!spec.config().set_undefined);
}

#[test]
fn test_document_without_config_uses_defaults() {
    let spec = MappingSpec::from_value(json!({"map": {"a": "b"}})).unwrap();
    assert!(!spec.config().set_undefined);
    assert!(!spec.config().strict_paths);
    assert_eq!(refactor(&json!({}), &spec).unwrap(), json!({}));
}

#[test]
fn test_document_set_undefined_forces_null() {
    let spec = MappingSpec::from_value(json!({
        "config": {"set_undefined": true},
        "map": {"a": "b"}
    }))
    .unwrap();
    assert_eq!(refactor(&json!({}), &spec).unwrap(), json!({"b": null}));
}

#[test]
fn test_document_rejects_bad_descriptors() {
    let cases = [
        json!({"map": {"a": 5}}),
        json!({"map": {"a": {"nothing": "here"}}}),
        json!({"map": {"a": {"path": "b", "extra": 1}}}),
        json!({"map": {"a[]": {"key": "b[]", "map": "not an object"}}}),
        json!({"map": {"a": {"path": "b", "coercion": "sideways"}}}),
    ];
    for case in cases {
        assert!(MappingSpec::from_value(case.clone()).is_err(), "accepted {}", case);
    }
}

#[test]
fn test_document_rejects_unknown_top_level_fields() {
    let err = MappingSpec::from_value(json!({"map": {}, "extra": true})).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_document_rejects_unknown_config_keys() {
    let err = MappingSpec::from_value(json!({
        "config": {"setUndefined": true},
        "map": {"a": "b"}
    }))
    .unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
    assert!(err.to_string().contains("setUndefined"));

    let err = MappingSpec::from_value(json!({
        "map": {"items[]": {"key": "out[]", "map": {"n": "m"}, "config": {"strict": true}}}
    }))
    .unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_document_rejects_mismatched_iteration() {
    let err = MappingSpec::from_value(json!({
        "map": {"items": {"key": "out[]", "map": {"n": "m"}}}
    }))
    .unwrap_err();
    assert!(matches!(err, Error::DescriptorMismatch { .. }));

    let err = MappingSpec::from_value(json!({"map": {"items[]": "out"}})).unwrap_err();
    assert!(matches!(err, Error::DescriptorMismatch { .. }));
}

#[test]
fn test_document_malformed_path_reports_position() {
    let err = MappingSpec::from_value(json!({"map": {"a.b[": "c"}})).unwrap_err();
    match err {
        Error::Path(path_error) => assert_eq!(path_error.position(), Some(2)),
        other => panic!("expected a path error, got {:?}", other),
    }
}

#[test]
fn test_raw_document_round_trips_through_serde() {
    let document: MappingDocument = serde_json::from_str(CONTACTS_DOCUMENT).unwrap();
    let text = serde_json::to_string(&document).unwrap();
    let again: MappingDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(document, again);
    assert_eq!(again.into_spec().unwrap().len(), 6);
}
