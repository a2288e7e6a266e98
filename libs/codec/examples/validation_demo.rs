//! # Pre-Decode Validation Demo
//!
//! Loads a schema from JSON, then validates a handful of buffers:
//! - A complete message and one missing a required field
//! - Malformed packed, UTF-8 and group encodings
//! - An extension resolved through a `TypeRegistry`
//!
//! Run with `RUST_LOG=codec=debug` to see why each rejection happened.

use codec::{
    validate, ExtensionType, TypeRegistry, TypeSet, UnmarshalOptions, ValidationConfig, WireBuilder, WireType,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use types::{ExtensionDescriptor, FieldDescriptor, Kind, MessageDescriptor, Syntax};

const SCHEMA: &str = r#"[
    {
        "full_name": "demo.Shipment",
        "syntax": "proto2",
        "fields": [
            { "name": "id", "number": 1, "kind": "uint64", "cardinality": "required" },
            { "name": "carrier", "number": 2, "kind": "string", "enforce_utf8": true },
            { "name": "parcels", "number": 3, "kind": "message", "cardinality": "repeated",
              "type_name": "demo.Parcel" },
            { "name": "checkpoints", "number": 4, "kind": "sint64", "cardinality": "repeated" },
            { "name": "legacy", "number": 5, "kind": "group", "type_name": "demo.Parcel" }
        ]
    },
    {
        "full_name": "demo.Parcel",
        "syntax": "proto2",
        "fields": [
            { "name": "grams", "number": 1, "kind": "uint32", "cardinality": "required" }
        ]
    }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codec=debug")))
        .init();

    println!("Pre-Decode Validation Demo");
    println!("==========================\n");

    let descriptors: Vec<MessageDescriptor> = serde_json::from_str(SCHEMA)?;
    let set = descriptors
        .into_iter()
        .fold(TypeSet::builder(), |builder, desc| builder.add(desc))
        .build()?;
    let shipment = set.message("demo.Shipment").ok_or("demo.Shipment missing")?;

    let config = ValidationConfig::from_env();
    config.validate()?;
    let opts = UnmarshalOptions::default().with_config(config);

    println!("1. Schema-driven checks");
    let cases = [
        (
            "complete shipment",
            WireBuilder::new()
                .varint(1, 7001)
                .string(2, "northwind")
                .message(3, WireBuilder::new().varint(1, 950))
                .build(),
        ),
        ("missing id", WireBuilder::new().string(2, "northwind").build()),
        (
            "parcel missing grams",
            WireBuilder::new().varint(1, 7001).message(3, WireBuilder::new()).build(),
        ),
        (
            "broken packed varint",
            WireBuilder::new().varint(1, 7001).bytes(4, &[0x80]).build(),
        ),
        (
            "carrier not UTF-8",
            WireBuilder::new().varint(1, 7001).bytes(2, &[0xc0, 0x80, 0x00]).build(),
        ),
        (
            "unterminated group",
            WireBuilder::new()
                .varint(1, 7001)
                .tag(5, WireType::StartGroup)
                .varint(1, 3)
                .build(),
        ),
    ];
    for (label, buf) in &cases {
        println!("   {:<24} {}", label, validate(buf, &shipment, &opts));
    }

    println!("\n2. Extensions through a registry");
    let registry = TypeRegistry::new();
    registry.register_extension(ExtensionType::new(
        ExtensionDescriptor::new(
            "demo.Shipment",
            Syntax::Proto3,
            FieldDescriptor::scalar("customs_note", 100, Kind::String),
        ),
        None,
    ))?;
    let with_registry = UnmarshalOptions::new(Arc::new(registry)).with_config(opts.config.clone());

    let noted = WireBuilder::new().varint(1, 7001).bytes(100, &[0xff]).build();
    println!("   {:<24} {}", "empty resolver", validate(&noted, &shipment, &opts));
    println!("   {:<24} {}", "registry resolver", validate(&noted, &shipment, &with_registry));

    Ok(())
}
