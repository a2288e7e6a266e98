//! Shared schemas and resolver doubles for codec integration tests

#![allow(dead_code)]

use codec::{ExtensionType, Resolver, ResolverError, TypeHandle, TypeSet};
use std::sync::Arc;
use types::{FieldDescriptor, FieldNumber, Kind, MapEntryDescriptor, MessageDescriptor, Syntax};

/// Proto2 schema covering every validation category
pub fn inventory_set() -> TypeSet {
    TypeSet::builder()
        .add(
            MessageDescriptor::new("inv.Item", Syntax::Proto2)
                .with_field(FieldDescriptor::scalar("sku", 1, Kind::Int64).required())
                .with_field(FieldDescriptor::scalar("price", 2, Kind::Fixed64).required())
                .with_field(FieldDescriptor::scalar("label", 3, Kind::String))
                .with_field(FieldDescriptor::scalar("counts", 4, Kind::Int32).repeated())
                .with_field(FieldDescriptor::scalar("weights", 5, Kind::Float).repeated())
                .with_field(FieldDescriptor::scalar("stamps", 6, Kind::Sfixed64).repeated())
                .with_field(FieldDescriptor::message("origin", 7, "inv.Location"))
                .with_field(FieldDescriptor::group("extra", 8, "inv.Extra"))
                .with_field(FieldDescriptor::scalar("note", 9, Kind::String).with_utf8(true))
                .with_field(FieldDescriptor::message("missing", 10, "other.NotLinked"))
                .with_field(FieldDescriptor::scalar("ratio", 11, Kind::Float)),
        )
        .add(
            MessageDescriptor::new("inv.Location", Syntax::Proto2)
                .with_field(FieldDescriptor::scalar("site", 1, Kind::String).required())
                .with_field(FieldDescriptor::message("parent", 2, "inv.Location")),
        )
        .add(
            MessageDescriptor::new("inv.Extra", Syntax::Proto2)
                .with_field(FieldDescriptor::scalar("tag", 1, Kind::Uint32)),
        )
        .build()
        .unwrap()
}

/// Proto3 schema with maps, oneofs and implicit UTF-8 checks
pub fn catalog_set() -> TypeSet {
    TypeSet::builder()
        .add(
            MessageDescriptor::new("cat.Catalog", Syntax::Proto3)
                .with_field(FieldDescriptor::scalar("title", 1, Kind::String))
                .with_field(FieldDescriptor::map(
                    "entries",
                    2,
                    MapEntryDescriptor::message_valued(Kind::String, "cat.Entry"),
                ))
                .with_field(FieldDescriptor::map(
                    "aliases",
                    3,
                    MapEntryDescriptor::new(Kind::Int32, Kind::String),
                ))
                .with_field(FieldDescriptor::scalar("name", 4, Kind::String).in_oneof("key"))
                .with_field(FieldDescriptor::scalar("id", 5, Kind::Uint64).in_oneof("key"))
                .with_field(FieldDescriptor::message("legacy", 6, "cat.Legacy").in_oneof("key")),
        )
        .add(
            MessageDescriptor::new("cat.Entry", Syntax::Proto3)
                .with_field(FieldDescriptor::scalar("qty", 1, Kind::Int32)),
        )
        .add(
            MessageDescriptor::new("cat.Legacy", Syntax::Proto2)
                .with_field(FieldDescriptor::scalar("code", 1, Kind::Int32).required()),
        )
        .build()
        .unwrap()
}

/// Message with `count` required varint fields numbered from 1
pub fn many_required_set(count: FieldNumber) -> TypeSet {
    let desc = (1..=count).fold(MessageDescriptor::new("big.Wide", Syntax::Proto2), |desc, n| {
        desc.with_field(FieldDescriptor::scalar(format!("f{}", n), n, Kind::Int32).required())
    });
    TypeSet::builder().add(desc).build().unwrap()
}

/// Resolver that fails every lookup with a non-definitive error
#[derive(Debug)]
pub struct FailingResolver;

impl Resolver for FailingResolver {
    fn find_extension_by_number(&self, _: &str, _: FieldNumber) -> Result<ExtensionType, ResolverError> {
        Err(ResolverError::Unavailable("registry offline".to_string()))
    }

    fn find_message_by_name(&self, _: &str) -> Result<Arc<dyn TypeHandle>, ResolverError> {
        Err(ResolverError::Unavailable("registry offline".to_string()))
    }
}

/// Message type implemented outside any `TypeSet`
#[derive(Debug)]
pub struct ForeignType(pub &'static str);

impl TypeHandle for ForeignType {
    fn full_name(&self) -> &str {
        self.0
    }
}
