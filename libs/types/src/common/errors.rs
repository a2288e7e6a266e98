//! Error types for descriptor construction
//!
//! Reported by `MessageDescriptor::check` when a hand-written or
//! deserialized schema is internally inconsistent.

use crate::protocol::FieldNumber;
use thiserror::Error;

/// Errors found while checking a message descriptor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two message types in one set share a full name
    #[error("duplicate message type {full_name}")]
    DuplicateMessage { full_name: String },

    /// Two fields of one message share a number
    #[error("{message}: field number {number} used by both {first} and {second}")]
    DuplicateFieldNumber {
        message: String,
        number: FieldNumber,
        first: String,
        second: String,
    },

    /// Field number outside 1..=2^29-1
    #[error("{message}.{field}: field number {number} out of range")]
    FieldNumberOutOfRange {
        message: String,
        field: String,
        number: FieldNumber,
    },

    /// Field number inside the implementation-reserved block
    #[error("{message}.{field}: field number {number} is reserved")]
    ReservedFieldNumber {
        message: String,
        field: String,
        number: FieldNumber,
    },

    /// Map-shaped field without key/value description, or the reverse
    #[error("{message}.{field}: map entry does not match cardinality")]
    MalformedMap { message: String, field: String },

    /// Message or group field with no nested type name
    #[error("{message}.{field}: {kind} field has no type name")]
    MissingTypeName {
        message: String,
        field: String,
        kind: &'static str,
    },

    /// Required cardinality combined with oneof membership
    #[error("{message}.{field}: oneof members cannot be required")]
    RequiredOneofMember { message: String, field: String },
}
