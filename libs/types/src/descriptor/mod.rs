//! # Schema Descriptor Model
//!
//! ## Purpose
//!
//! The per-field facts a wire validator consumes: kind, cardinality, oneof
//! membership, map key/value kinds, UTF-8 enforcement and the weak flag.
//! Descriptors carry nested message types by full name only; linking a name
//! to an actual type is the job of the type set that owns the descriptor.
//!
//! ## Architecture Role
//!
//! ```text
//! JSON / hand-written → [Descriptors] → TypeSet (codec) → Validation tables
//!                            ↓
//!                    SchemaError on check()
//! ```

mod field;
mod message;

pub use field::{FieldDescriptor, MapEntryDescriptor};
pub use message::{ExtensionDescriptor, MessageDescriptor};

use crate::protocol::WireType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Value kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Kind {
    Bool,
    Enum,
    Int32,
    Sint32,
    Uint32,
    Int64,
    Sint64,
    Uint64,
    Sfixed32,
    Fixed32,
    Float,
    Sfixed64,
    Fixed64,
    Double,
    String,
    Bytes,
    Message,
    Group,
}

impl Kind {
    /// Wire type used for a single (unpacked) value of this kind
    pub fn wire_type(self) -> WireType {
        match self {
            Kind::Bool
            | Kind::Enum
            | Kind::Int32
            | Kind::Sint32
            | Kind::Uint32
            | Kind::Int64
            | Kind::Sint64
            | Kind::Uint64 => WireType::Varint,
            Kind::Sfixed32 | Kind::Fixed32 | Kind::Float => WireType::Fixed32,
            Kind::Sfixed64 | Kind::Fixed64 | Kind::Double => WireType::Fixed64,
            Kind::String | Kind::Bytes | Kind::Message => WireType::Bytes,
            Kind::Group => WireType::StartGroup,
        }
    }

    /// Whether values of this kind are nested messages
    pub fn is_message(self) -> bool {
        matches!(self, Kind::Message | Kind::Group)
    }

    /// Schema-language spelling
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Enum => "enum",
            Kind::Int32 => "int32",
            Kind::Sint32 => "sint32",
            Kind::Uint32 => "uint32",
            Kind::Int64 => "int64",
            Kind::Sint64 => "sint64",
            Kind::Uint64 => "uint64",
            Kind::Sfixed32 => "sfixed32",
            Kind::Fixed32 => "fixed32",
            Kind::Float => "float",
            Kind::Sfixed64 => "sfixed64",
            Kind::Fixed64 => "fixed64",
            Kind::Double => "double",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Message => "message",
            Kind::Group => "group",
        }
    }
}

/// Field cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Cardinality {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// Schema syntax of the file declaring a message
///
/// Proto3 strings enforce UTF-8 unless a field says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Syntax {
    #[default]
    Proto2,
    Proto3,
}
