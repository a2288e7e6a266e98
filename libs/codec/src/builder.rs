//! # Wire Message Builder
//!
//! ## Purpose
//!
//! Composes wire-format buffers field by field: scalars, length-delimited
//! payloads, nested messages, groups and packed sequences. Used to produce
//! realistic inputs for validation tests, benchmarks and demos, and by
//! callers that need to re-emit a checked message.
//!
//! ## Usage
//!
//! ```rust
//! use codec::WireBuilder;
//!
//! let message = WireBuilder::new()
//!     .varint(1, 150)
//!     .string(2, "hello")
//!     .message(3, WireBuilder::new().fixed32(1, 7))
//!     .packed_varints(4, &[1, 2, 3])
//!     .build();
//!
//! assert_eq!(&message[..3], &[0x08, 0x96, 0x01]);
//! ```

use crate::wire::{append_tag, append_varint, size_varint};
use types::{FieldNumber, WireType};

/// Builder for wire-format buffers
#[derive(Debug, Clone, Default)]
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the output buffer
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append a bare tag
    pub fn tag(mut self, number: FieldNumber, wire_type: WireType) -> Self {
        append_tag(&mut self.buf, number, wire_type);
        self
    }

    /// Append raw bytes without any framing
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn varint(mut self, number: FieldNumber, value: u64) -> Self {
        append_tag(&mut self.buf, number, WireType::Varint);
        append_varint(&mut self.buf, value);
        self
    }

    /// Zigzag-encoded signed varint (`sint32`/`sint64`)
    pub fn sint(self, number: FieldNumber, value: i64) -> Self {
        let zigzag = ((value << 1) ^ (value >> 63)) as u64;
        self.varint(number, zigzag)
    }

    pub fn fixed32(mut self, number: FieldNumber, value: u32) -> Self {
        append_tag(&mut self.buf, number, WireType::Fixed32);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn fixed64(mut self, number: FieldNumber, value: u64) -> Self {
        append_tag(&mut self.buf, number, WireType::Fixed64);
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Length-delimited payload
    pub fn bytes(mut self, number: FieldNumber, payload: &[u8]) -> Self {
        append_tag(&mut self.buf, number, WireType::Bytes);
        append_varint(&mut self.buf, payload.len() as u64);
        self.buf.extend_from_slice(payload);
        self
    }

    pub fn string(self, number: FieldNumber, value: &str) -> Self {
        self.bytes(number, value.as_bytes())
    }

    /// Length-delimited nested message
    pub fn message(self, number: FieldNumber, nested: WireBuilder) -> Self {
        self.bytes(number, &nested.buf)
    }

    /// Group: start tag, body, matching end tag
    pub fn group(mut self, number: FieldNumber, body: WireBuilder) -> Self {
        append_tag(&mut self.buf, number, WireType::StartGroup);
        self.buf.extend_from_slice(&body.buf);
        append_tag(&mut self.buf, number, WireType::EndGroup);
        self
    }

    /// One map entry: key as field 1, value as field 2
    pub fn map_entry(self, number: FieldNumber, entry: WireBuilder) -> Self {
        self.message(number, entry)
    }

    /// Packed varints, written in place behind a precomputed length
    pub fn packed_varints(mut self, number: FieldNumber, values: &[u64]) -> Self {
        let length: usize = values.iter().map(|&v| size_varint(v)).sum();
        append_tag(&mut self.buf, number, WireType::Bytes);
        append_varint(&mut self.buf, length as u64);
        for &value in values {
            append_varint(&mut self.buf, value);
        }
        self
    }

    pub fn packed_fixed32(self, number: FieldNumber, values: &[u32]) -> Self {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.bytes(number, &payload)
    }

    pub fn packed_fixed64(self, number: FieldNumber, values: &[u64]) -> Self {
        let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.bytes(number, &payload)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish and return the encoded bytes
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
