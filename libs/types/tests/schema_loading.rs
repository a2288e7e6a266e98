//! Loading descriptor sets from JSON and rejecting inconsistent ones

#![cfg(feature = "serialization")]

use types::{Cardinality, Kind, MessageDescriptor, SchemaError, Syntax};

#[test]
fn test_load_descriptor_set() {
    let json = r#"[
        { "full_name": "shop.Order", "syntax": "proto2", "fields": [
            { "name": "id", "number": 1, "kind": "int64", "cardinality": "required" },
            { "name": "lines", "number": 2, "kind": "message", "cardinality": "repeated",
              "type_name": "shop.Line" },
            { "name": "meta", "number": 3, "kind": "message", "cardinality": "repeated",
              "map_entry": { "key": "string", "value": "message", "value_message": "shop.Line" } }
        ] },
        { "full_name": "shop.Line", "fields": [
            { "name": "note", "number": 1, "kind": "string", "enforce_utf8": true }
        ] }
    ]"#;

    let descriptors: Vec<MessageDescriptor> = serde_json::from_str(json).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert!(descriptors.iter().all(|d| d.check().is_ok()));

    let order = &descriptors[0];
    assert_eq!(order.required_fields().count(), 1);
    assert!(order.field_by_name("meta").unwrap().is_map());

    // syntax defaults to proto2 when omitted
    let line = &descriptors[1];
    assert_eq!(line.syntax, Syntax::Proto2);
    assert!(line.field_by_number(1).unwrap().enforces_utf8(line.syntax));
    assert_eq!(line.field_by_number(1).unwrap().cardinality, Cardinality::Optional);
    assert_eq!(line.field_by_number(1).unwrap().kind, Kind::String);
}

#[test]
fn test_reserved_number_rejected() {
    let json = r#"{ "full_name": "shop.Bad", "syntax": "proto3", "fields": [
        { "name": "x", "number": 19500, "kind": "int32" }
    ] }"#;
    let desc: MessageDescriptor = serde_json::from_str(json).unwrap();
    assert!(matches!(desc.check(), Err(SchemaError::ReservedFieldNumber { number: 19500, .. })));
}

#[test]
fn test_map_without_repeated_rejected() {
    let json = r#"{ "full_name": "shop.Bad", "fields": [
        { "name": "m", "number": 1, "kind": "message",
          "map_entry": { "key": "int32", "value": "string" } }
    ] }"#;
    let desc: MessageDescriptor = serde_json::from_str(json).unwrap();
    assert!(matches!(desc.check(), Err(SchemaError::MalformedMap { .. })));
}
