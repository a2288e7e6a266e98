//! # Validation-Type Classifier
//!
//! Maps a field descriptor to the compact tag the traversal engine dispatches
//! on. Classification runs once per field when a type's table is built.
//! Nested message types are recorded as indices into the set that owns the
//! table, so classifying a type never builds another type's table and
//! mutually recursive schemas need no special handling.

use types::{FieldDescriptor, Kind, Syntax, WireType};

/// Index of a message type inside the type set that owns a table
pub type TypeIndex = usize;

/// How the engine treats a field's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationType {
    /// Skipped as a generic value of whatever wire type it carries
    #[default]
    Other,
    Message,
    Group,
    Map,
    RepeatedVarint,
    RepeatedFixed32,
    RepeatedFixed64,
    Varint,
    Fixed32,
    Fixed64,
    Bytes,
    Utf8String,
}

impl ValidationType {
    /// Wire type a present value of a singular field of this type carries
    ///
    /// Only meaningful for types a required field can have.
    pub fn required_wire_type(self) -> Option<WireType> {
        match self {
            ValidationType::Varint => Some(WireType::Varint),
            ValidationType::Fixed32 => Some(WireType::Fixed32),
            ValidationType::Fixed64 => Some(WireType::Fixed64),
            ValidationType::Bytes
            | ValidationType::Utf8String
            | ValidationType::Message
            | ValidationType::Group => Some(WireType::Bytes),
            _ => None,
        }
    }
}

/// Per-field classification stored in a message validation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldValidationInfo {
    pub typ: ValidationType,
    /// Map key classification when `typ` is `Map`
    pub key_type: ValidationType,
    /// Map value classification when `typ` is `Map`
    pub val_type: ValidationType,
    /// Linked nested type for messages, groups and message-valued maps
    pub nested: Option<TypeIndex>,
    /// 0 for optional fields and saturated required fields, else 1..=64
    pub required_index: u8,
}

/// Source of nested-type links for the set that owns a table
///
/// Returns `None` when the named type is not statically linked; the engine
/// then treats the field as unresolved.
pub trait TypeLinker {
    fn link(&self, full_name: &str) -> Option<TypeIndex>;
}

impl<F> TypeLinker for F
where
    F: Fn(&str) -> Option<TypeIndex>,
{
    fn link(&self, full_name: &str) -> Option<TypeIndex> {
        self(full_name)
    }
}

/// Classify one field
///
/// `syntax` is the syntax of the file that declares the field; it decides
/// UTF-8 enforcement when the field carries no explicit setting. The
/// required index is left at 0 and assigned by the table builder.
pub fn classify(field: &FieldDescriptor, syntax: Syntax, linker: &dyn TypeLinker) -> FieldValidationInfo {
    let mut info = FieldValidationInfo::default();
    let link = |name: &Option<String>| name.as_deref().and_then(|n| linker.link(n));
    let utf8 = field.enforces_utf8(syntax);

    if field.oneof.is_some() && !field.is_required() {
        match field.kind {
            Kind::Message => {
                info.typ = ValidationType::Message;
                info.nested = link(&field.type_name);
            }
            Kind::Group => {
                info.typ = ValidationType::Group;
                info.nested = link(&field.type_name);
            }
            Kind::String if utf8 => info.typ = ValidationType::Utf8String,
            _ => {}
        }
        return info;
    }

    if let Some(entry) = &field.map_entry {
        info.typ = ValidationType::Map;
        if entry.key == Kind::String && utf8 {
            info.key_type = ValidationType::Utf8String;
        }
        match entry.value {
            Kind::Message => {
                info.val_type = ValidationType::Message;
                info.nested = link(&entry.value_message);
            }
            Kind::String if utf8 => info.val_type = ValidationType::Utf8String,
            _ => {}
        }
        return info;
    }

    if field.is_list() {
        info.typ = match field.kind {
            Kind::Message => {
                info.nested = link(&field.type_name);
                ValidationType::Message
            }
            Kind::Group => {
                info.nested = link(&field.type_name);
                ValidationType::Group
            }
            Kind::String if utf8 => ValidationType::Utf8String,
            Kind::String => ValidationType::Bytes,
            kind => match kind.wire_type() {
                WireType::Varint => ValidationType::RepeatedVarint,
                WireType::Fixed32 => ValidationType::RepeatedFixed32,
                WireType::Fixed64 => ValidationType::RepeatedFixed64,
                _ => ValidationType::Other,
            },
        };
        return info;
    }

    info.typ = match field.kind {
        Kind::Message => {
            // Weak fields are resolved by name at validation time
            if !field.weak {
                info.nested = link(&field.type_name);
            }
            ValidationType::Message
        }
        Kind::Group => {
            info.nested = link(&field.type_name);
            ValidationType::Group
        }
        Kind::String if utf8 => ValidationType::Utf8String,
        Kind::String => ValidationType::Bytes,
        kind => match kind.wire_type() {
            WireType::Varint => ValidationType::Varint,
            WireType::Fixed32 => ValidationType::Fixed32,
            WireType::Fixed64 => ValidationType::Fixed64,
            _ => ValidationType::Other,
        },
    };
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::MapEntryDescriptor;

    fn linker(name: &str) -> Option<TypeIndex> {
        match name {
            "pkg.Linked" => Some(7),
            _ => None,
        }
    }

    fn classify2(field: &FieldDescriptor) -> FieldValidationInfo {
        classify(field, Syntax::Proto2, &linker)
    }

    fn classify3(field: &FieldDescriptor) -> FieldValidationInfo {
        classify(field, Syntax::Proto3, &linker)
    }

    #[test]
    fn test_singular_scalars_by_wire_width() {
        assert_eq!(classify2(&FieldDescriptor::scalar("a", 1, Kind::Bool)).typ, ValidationType::Varint);
        assert_eq!(classify2(&FieldDescriptor::scalar("a", 1, Kind::Enum)).typ, ValidationType::Varint);
        assert_eq!(classify2(&FieldDescriptor::scalar("a", 1, Kind::Float)).typ, ValidationType::Fixed32);
        assert_eq!(classify2(&FieldDescriptor::scalar("a", 1, Kind::Sfixed64)).typ, ValidationType::Fixed64);
        assert_eq!(classify2(&FieldDescriptor::scalar("a", 1, Kind::Bytes)).typ, ValidationType::Bytes);
    }

    #[test]
    fn test_strings_follow_utf8_enforcement() {
        let field = FieldDescriptor::scalar("s", 1, Kind::String);
        assert_eq!(classify2(&field).typ, ValidationType::Bytes);
        assert_eq!(classify3(&field).typ, ValidationType::Utf8String);
        assert_eq!(classify3(&field.clone().with_utf8(false)).typ, ValidationType::Bytes);

        let list = FieldDescriptor::scalar("s", 1, Kind::String).repeated();
        assert_eq!(classify2(&list).typ, ValidationType::Bytes);
        assert_eq!(classify3(&list).typ, ValidationType::Utf8String);
    }

    #[test]
    fn test_messages_and_groups_link_nested_types() {
        let linked = classify2(&FieldDescriptor::message("m", 1, "pkg.Linked"));
        assert_eq!(linked.typ, ValidationType::Message);
        assert_eq!(linked.nested, Some(7));

        let unlinked = classify2(&FieldDescriptor::message("m", 1, "pkg.Elsewhere"));
        assert_eq!(unlinked.typ, ValidationType::Message);
        assert_eq!(unlinked.nested, None);

        let group = classify2(&FieldDescriptor::group("g", 1, "pkg.Linked"));
        assert_eq!(group.typ, ValidationType::Group);
        assert_eq!(group.nested, Some(7));
    }

    #[test]
    fn test_weak_message_left_unlinked() {
        let weak = classify2(&FieldDescriptor::message("w", 1, "pkg.Linked").weak());
        assert_eq!(weak.typ, ValidationType::Message);
        assert_eq!(weak.nested, None);
    }

    #[test]
    fn test_repeated_scalars_are_packed_candidates() {
        let varints = FieldDescriptor::scalar("v", 1, Kind::Sint32).repeated();
        assert_eq!(classify2(&varints).typ, ValidationType::RepeatedVarint);

        let fixed32 = FieldDescriptor::scalar("f", 1, Kind::Fixed32).repeated();
        assert_eq!(classify2(&fixed32).typ, ValidationType::RepeatedFixed32);

        let fixed64 = FieldDescriptor::scalar("d", 1, Kind::Double).repeated();
        assert_eq!(classify2(&fixed64).typ, ValidationType::RepeatedFixed64);

        let messages = FieldDescriptor::message("m", 1, "pkg.Linked").repeated();
        let info = classify2(&messages);
        assert_eq!(info.typ, ValidationType::Message);
        assert_eq!(info.nested, Some(7));
    }

    #[test]
    fn test_map_classification() {
        let strings = FieldDescriptor::map("m", 1, MapEntryDescriptor::new(Kind::String, Kind::String));
        let info = classify3(&strings);
        assert_eq!(info.typ, ValidationType::Map);
        assert_eq!(info.key_type, ValidationType::Utf8String);
        assert_eq!(info.val_type, ValidationType::Utf8String);

        let lax = classify2(&strings);
        assert_eq!(lax.key_type, ValidationType::Other);
        assert_eq!(lax.val_type, ValidationType::Other);

        let messages = FieldDescriptor::map("m", 1, MapEntryDescriptor::message_valued(Kind::Int64, "pkg.Linked"));
        let info = classify2(&messages);
        assert_eq!(info.key_type, ValidationType::Other);
        assert_eq!(info.val_type, ValidationType::Message);
        assert_eq!(info.nested, Some(7));

        let ints = FieldDescriptor::map("m", 1, MapEntryDescriptor::new(Kind::Int32, Kind::Fixed64));
        assert_eq!(classify2(&ints).val_type, ValidationType::Other);
    }

    #[test]
    fn test_oneof_members() {
        let msg = FieldDescriptor::message("o", 1, "pkg.Linked").in_oneof("choice");
        let info = classify2(&msg);
        assert_eq!(info.typ, ValidationType::Message);
        assert_eq!(info.nested, Some(7));

        let s = FieldDescriptor::scalar("o", 2, Kind::String).in_oneof("choice");
        assert_eq!(classify2(&s).typ, ValidationType::Other);
        assert_eq!(classify3(&s).typ, ValidationType::Utf8String);

        // Scalars inside a oneof are skipped generically
        let i = FieldDescriptor::scalar("o", 3, Kind::Int32).in_oneof("choice");
        assert_eq!(classify2(&i).typ, ValidationType::Other);
    }

    #[test]
    fn test_required_wire_types() {
        assert_eq!(ValidationType::Varint.required_wire_type(), Some(WireType::Varint));
        assert_eq!(ValidationType::Group.required_wire_type(), Some(WireType::Bytes));
        assert_eq!(ValidationType::Map.required_wire_type(), None);
        assert_eq!(ValidationType::RepeatedVarint.required_wire_type(), None);
    }
}
