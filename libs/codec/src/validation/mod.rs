//! # Pre-Decode Message Validation
//!
//! ## Purpose
//!
//! Decides cheaply whether a wire buffer would decode successfully into a
//! given message type, and whether every required field would be present,
//! without materializing any message.
//!
//! ## Architecture
//!
//! ```text
//! MessageDescriptor → classify() → MessageValidationTable (once per type)
//!                                          ↓
//! Raw Bytes → engine (explicit frame stack) → ValidationStatus
//!                    ↑
//!       Resolver (extensions, weak types)
//! ```
//!
//! ## Outcomes
//!
//! - **Invalid**: decoding will fail; returned at the first malformed byte
//! - **Unknown**: an extension or weak type could not be resolved, or the
//!   type is not introspectable
//! - **ValidInitialized** / **ValidMaybeUninitialized**: decoding succeeds;
//!   the latter when required-field completeness cannot be confirmed

pub mod classify;
pub mod config;
pub mod engine;
pub mod status;
pub mod table;

pub use classify::{classify, FieldValidationInfo, TypeIndex, TypeLinker, ValidationType};
pub use config::{UnmarshalOptions, ValidationConfig};
pub use engine::{validate, validate_group};
pub use status::ValidationStatus;
pub use table::{MessageValidationTable, MAX_TRACKED_REQUIRED, SATURATED_REQUIRED_COUNT};
