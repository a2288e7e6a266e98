//! # Wire Primitives - Tag-Length-Value Consumption
//!
//! ## Purpose
//!
//! Zero-copy readers for the wire format: tags, varints, fixed-width values,
//! length-delimited payloads and whole field values. Every `consume_*`
//! function takes the unread bytes and returns the decoded value together with
//! the number of bytes it occupied, so callers advance with `&buf[n..]`.
//!
//! ## Edge Cases
//!
//! - A varint longer than 10 bytes, or whose 10th byte is above 1, overflows
//! - Tags with field number 0 or above `i32::MAX` are rejected here; the
//!   tighter 2^29-1 limit is left to callers that care about it
//! - Groups are skipped iteratively; nesting depth costs heap, not stack

use crate::error::{WireError, WireResult};
use types::{FieldNumber, WireType, MAX_VARINT_LEN, MIN_FIELD_NUMBER};

/// Split a raw tag into field number and wire type
///
/// Returns `None` for the field number when it exceeds `i32::MAX`.
pub fn decode_tag(tag: u64) -> (Option<FieldNumber>, u8) {
    let number = tag >> 3;
    let wire_type = (tag & 7) as u8;
    if number > i32::MAX as u64 {
        return (None, wire_type);
    }
    (Some(number as FieldNumber), wire_type)
}

/// Encode a field number and wire type as a raw tag
pub fn encode_tag(number: FieldNumber, wire_type: WireType) -> u64 {
    ((number as u64) << 3) | wire_type as u64
}

/// Consume a base-128 varint
pub fn consume_varint(buf: &[u8]) -> WireResult<(u64, usize)> {
    let mut value = 0u64;
    for i in 0..MAX_VARINT_LEN {
        let Some(&byte) = buf.get(i) else {
            return Err(WireError::truncated(i + 1, buf.len(), "varint"));
        };
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(WireError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }
    Err(WireError::VarintOverflow)
}

/// Consume a tag, returning field number, wire type and bytes used
pub fn consume_tag(buf: &[u8]) -> WireResult<(FieldNumber, WireType, usize)> {
    let (raw, n) = consume_varint(buf)?;
    let (number, wire_type) = decode_tag(raw);
    let number = match number {
        Some(number) if number >= MIN_FIELD_NUMBER => number,
        _ => return Err(WireError::InvalidFieldNumber { number: raw >> 3 }),
    };
    let wire_type = WireType::try_from(wire_type).map_err(|_| WireError::ReservedWireType {
        number: number as u64,
        wire_type,
    })?;
    Ok((number, wire_type, n))
}

/// Consume a little-endian 32-bit value
pub fn consume_fixed32(buf: &[u8]) -> WireResult<(u32, usize)> {
    match buf.get(..4) {
        Some(bytes) => Ok((u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 4)),
        None => Err(WireError::truncated(4, buf.len(), "fixed32")),
    }
}

/// Consume a little-endian 64-bit value
pub fn consume_fixed64(buf: &[u8]) -> WireResult<(u64, usize)> {
    match buf.get(..8) {
        Some(bytes) => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            Ok((u64::from_le_bytes(raw), 8))
        }
        None => Err(WireError::truncated(8, buf.len(), "fixed64")),
    }
}

/// Consume a length-delimited payload, returning the payload slice
pub fn consume_bytes(buf: &[u8]) -> WireResult<(&[u8], usize)> {
    let (length, n) = consume_varint(buf)?;
    let rest = &buf[n..];
    if length > rest.len() as u64 {
        return Err(WireError::LengthOverflow {
            length,
            remaining: rest.len(),
        });
    }
    let length = length as usize;
    Ok((&rest[..length], n + length))
}

/// Consume the body of a group whose start tag has already been read
///
/// Nested groups are tracked with an explicit stack of open field numbers.
/// The returned length includes the terminating end-group tag.
pub fn consume_group(number: FieldNumber, buf: &[u8]) -> WireResult<usize> {
    let mut open = vec![number];
    let mut pos = 0;

    while let Some(&expected) = open.last() {
        let (num, wire_type, n) = consume_tag(&buf[pos..])?;
        pos += n;
        match wire_type {
            WireType::EndGroup => {
                if num != expected {
                    return Err(WireError::GroupMismatch { expected, got: num });
                }
                open.pop();
            }
            WireType::StartGroup => open.push(num),
            _ => pos += consume_field_value(num, wire_type, &buf[pos..])?,
        }
    }

    Ok(pos)
}

/// Consume one field value of the given wire type
///
/// `number` is only used to match the end tag of a group value.
pub fn consume_field_value(number: FieldNumber, wire_type: WireType, buf: &[u8]) -> WireResult<usize> {
    match wire_type {
        WireType::Varint => consume_varint(buf).map(|(_, n)| n),
        WireType::Fixed32 => consume_fixed32(buf).map(|(_, n)| n),
        WireType::Fixed64 => consume_fixed64(buf).map(|(_, n)| n),
        WireType::Bytes => consume_bytes(buf).map(|(_, n)| n),
        WireType::StartGroup => consume_group(number, buf),
        WireType::EndGroup => Err(WireError::UnexpectedEndGroup { number }),
    }
}

/// Encoded length of a varint
pub fn size_varint(value: u64) -> usize {
    // 9/64 rounds the bit length up to whole 7-bit groups
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits * 9 + 64) / 64
}

/// Append a varint to `buf`
pub fn append_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Append a tag to `buf`
pub fn append_tag(buf: &mut Vec<u8>, number: FieldNumber, wire_type: WireType) {
    append_varint(buf, encode_tag(number, wire_type));
}
