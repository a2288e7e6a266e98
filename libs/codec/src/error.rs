//! Wire-level errors for tag-length-value parsing
//!
//! Every variant describes one way a buffer can fail to be a well-formed
//! encoding. The validation engine folds all of them into
//! `ValidationStatus::Invalid`; they stay distinct so rejections can be
//! logged with a useful reason.

use thiserror::Error;
use types::FieldNumber;

/// Structural errors found while consuming wire-format bytes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Buffer ended before the value was complete
    #[error("Truncated {context}: need {need} bytes, got {got}")]
    Truncated {
        need: usize,
        got: usize,
        context: &'static str,
    },

    /// Tenth varint byte carries bits beyond 64
    #[error("Varint overflows 64 bits")]
    VarintOverflow,

    /// Tag decodes to a field number outside the legal range
    #[error("Invalid field number {number}")]
    InvalidFieldNumber { number: u64 },

    /// Wire type 6 or 7
    #[error("Reserved wire type {wire_type} for field {number}")]
    ReservedWireType { number: u64, wire_type: u8 },

    /// End-group tag where a field value was expected
    #[error("Unexpected end-group tag for field {number}")]
    UnexpectedEndGroup { number: FieldNumber },

    /// Group closed by an end-group tag with a different number
    #[error("Group {expected} closed by end-group tag for field {got}")]
    GroupMismatch {
        expected: FieldNumber,
        got: FieldNumber,
    },

    /// Length prefix larger than the bytes that follow it
    #[error("Length {length} exceeds remaining {remaining} bytes")]
    LengthOverflow { length: u64, remaining: usize },
}

impl WireError {
    pub fn truncated(need: usize, got: usize, context: &'static str) -> Self {
        Self::Truncated { need, got, context }
    }
}

/// Result type for wire operations
pub type WireResult<T> = std::result::Result<T, WireError>;
