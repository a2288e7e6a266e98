//! Wire-protocol constants
//!
//! Field number limits and wire types of the tag-length-value encoding.
//! A tag is `field_number << 3 | wire_type`, encoded as a varint.

use num_enum::TryFromPrimitive;

/// Field number as it appears in a decoded tag
pub type FieldNumber = u32;

/// Smallest legal field number
pub const MIN_FIELD_NUMBER: FieldNumber = 1;

/// Largest legal field number (2^29 - 1)
pub const MAX_FIELD_NUMBER: FieldNumber = (1 << 29) - 1;

/// First field number reserved for the implementation
pub const FIRST_RESERVED_NUMBER: FieldNumber = 19000;

/// Last field number reserved for the implementation
pub const LAST_RESERVED_NUMBER: FieldNumber = 19999;

/// Maximum encoded length of a 64-bit varint
pub const MAX_VARINT_LEN: usize = 10;

/// Wire type carried in the low three bits of every tag
///
/// Values 6 and 7 are reserved; a tag carrying them cannot be skipped and
/// makes the enclosing buffer unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint
    Varint = 0,
    /// 8 bytes, little endian
    Fixed64 = 1,
    /// Varint length prefix followed by that many bytes
    Bytes = 2,
    /// Opens a group terminated by a matching `EndGroup` tag
    StartGroup = 3,
    /// Closes the group opened with the same field number
    EndGroup = 4,
    /// 4 bytes, little endian
    Fixed32 = 5,
}

impl WireType {
    /// Human-readable name for diagnostics
    pub fn name(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::Bytes => "bytes",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        }
    }
}

/// Whether `number` lies inside the legal field number range
pub fn is_valid_field_number(number: u64) -> bool {
    number >= MIN_FIELD_NUMBER as u64 && number <= MAX_FIELD_NUMBER as u64
}

/// Whether `number` lies inside the implementation-reserved range
pub fn is_reserved_field_number(number: FieldNumber) -> bool {
    (FIRST_RESERVED_NUMBER..=LAST_RESERVED_NUMBER).contains(&number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_from_primitive() {
        assert_eq!(WireType::try_from(0u8).unwrap(), WireType::Varint);
        assert_eq!(WireType::try_from(2u8).unwrap(), WireType::Bytes);
        assert_eq!(WireType::try_from(5u8).unwrap(), WireType::Fixed32);

        // Reserved wire types
        assert!(WireType::try_from(6u8).is_err());
        assert!(WireType::try_from(7u8).is_err());
    }

    #[test]
    fn test_wire_type_names() {
        assert_eq!(WireType::Varint.name(), "varint");
        assert_eq!(WireType::StartGroup.name(), "start-group");
        assert_eq!(WireType::try_from(5u8).ok().map(WireType::name), Some("fixed32"));
    }

    #[test]
    fn test_field_number_range() {
        assert!(!is_valid_field_number(0));
        assert!(is_valid_field_number(1));
        assert!(is_valid_field_number(MAX_FIELD_NUMBER as u64));
        assert!(!is_valid_field_number(MAX_FIELD_NUMBER as u64 + 1));

        assert!(is_reserved_field_number(19000));
        assert!(is_reserved_field_number(19999));
        assert!(!is_reserved_field_number(20000));
    }
}
