//! # pbcheck Codec - Pre-Decode Protobuf Validation
//!
//! ## Purpose
//!
//! Checks protocol buffer wire-format buffers against message types before
//! anything is decoded. A caller hands over raw bytes and a type; the codec
//! walks the tag-length-value structure once and answers whether a real
//! decode would succeed and whether all required fields would be set.
//!
//! ## Integration Points
//!
//! - **Type Sets**: `TypeSet` links `MessageDescriptor`s from `types` into
//!   validatable `MessageType` handles
//! - **Resolution**: extensions and weak message references go through a
//!   `Resolver` injected with `UnmarshalOptions`
//! - **Wire Primitives**: the `wire` module exposes the zero-copy readers the
//!   engine is built on; `WireBuilder` composes buffers for tests and tools
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → caller's decoder
//!     ↑           ↓
//! Descriptors  ValidationStatus
//! WireType     (fast path / fallback decision)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codec::{validate, TypeSet, UnmarshalOptions, ValidationStatus, WireBuilder};
//! use types::{FieldDescriptor, Kind, MessageDescriptor, Syntax};
//!
//! let set = TypeSet::builder()
//!     .add(
//!         MessageDescriptor::new("demo.Ping", Syntax::Proto2)
//!             .with_field(FieldDescriptor::scalar("seq", 1, Kind::Uint64).required()),
//!     )
//!     .build()
//!     .unwrap();
//! let ping = set.message("demo.Ping").unwrap();
//! let opts = UnmarshalOptions::default();
//!
//! let complete = WireBuilder::new().varint(1, 42).build();
//! assert_eq!(validate(&complete, &ping, &opts), ValidationStatus::ValidInitialized);
//! assert_eq!(validate(&[], &ping, &opts), ValidationStatus::ValidMaybeUninitialized);
//! assert_eq!(validate(&[0x08], &ping, &opts), ValidationStatus::Invalid);
//! ```

pub mod builder;
pub mod error;
pub mod message;
pub mod registry;
pub mod validation;
pub mod wire;

pub use builder::WireBuilder;
pub use error::{WireError, WireResult};
pub use message::{ExtensionType, MessageType, TypeHandle, TypeSet, TypeSetBuilder};
pub use registry::{find_message_type, EmptyResolver, RegistryError, Resolver, ResolverError, TypeRegistry};
pub use validation::{
    validate, validate_group, FieldValidationInfo, MessageValidationTable, UnmarshalOptions, ValidationConfig,
    ValidationStatus, ValidationType,
};

// Descriptor model re-exported for single-crate users
pub use types::{
    Cardinality, ExtensionDescriptor, FieldDescriptor, FieldNumber, Kind, MapEntryDescriptor, MessageDescriptor,
    SchemaError, Syntax, WireType,
};
