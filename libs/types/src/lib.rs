//! # pbcheck Types Library
//!
//! Schema descriptor model and wire-protocol constants shared by the pbcheck
//! crates.
//!
//! ## Design Philosophy
//!
//! - **Descriptors are plain data**: no wire parsing lives here, only a
//!   consistency check and the facts a validator needs about each field
//! - **Names, not pointers**: nested message types are referenced by full name
//!   and linked later by whoever owns the type set
//! - **Wire constants in one place**: field number limits and wire types are
//!   defined once and re-exported
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Cardinality, FieldDescriptor, Kind, MessageDescriptor, Syntax};
//!
//! let person = MessageDescriptor::new("example.Person", Syntax::Proto2)
//!     .with_field(FieldDescriptor::scalar("name", 1, Kind::String).required())
//!     .with_field(FieldDescriptor::scalar("id", 2, Kind::Int32))
//!     .with_field(FieldDescriptor::message("manager", 3, "example.Person"));
//!
//! assert!(person.check().is_ok());
//! assert_eq!(
//!     person.field_by_number(1).map(|f| f.cardinality),
//!     Some(Cardinality::Required)
//! );
//! ```

pub mod common;
pub mod descriptor;
pub mod protocol;

pub use common::errors::SchemaError;
pub use descriptor::{
    Cardinality, ExtensionDescriptor, FieldDescriptor, Kind, MapEntryDescriptor,
    MessageDescriptor, Syntax,
};
pub use protocol::{
    FieldNumber, WireType, FIRST_RESERVED_NUMBER, LAST_RESERVED_NUMBER, MAX_FIELD_NUMBER,
    MAX_VARINT_LEN, MIN_FIELD_NUMBER,
};
