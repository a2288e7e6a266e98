//! Field descriptors

use super::{Cardinality, Kind, Syntax};
use crate::protocol::FieldNumber;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key and value description of a map field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapEntryDescriptor {
    pub key: Kind,
    pub value: Kind,
    /// Full name of the value type when `value` is `Kind::Message`
    #[cfg_attr(feature = "serde", serde(default))]
    pub value_message: Option<String>,
}

impl MapEntryDescriptor {
    /// Map with scalar (or string/bytes) values
    pub fn new(key: Kind, value: Kind) -> Self {
        Self {
            key,
            value,
            value_message: None,
        }
    }

    /// Map with message values
    pub fn message_valued(key: Kind, value_message: impl Into<String>) -> Self {
        Self {
            key,
            value: Kind::Message,
            value_message: Some(value_message.into()),
        }
    }
}

/// Everything the validator needs to know about one declared field
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDescriptor {
    pub name: String,
    pub number: FieldNumber,
    pub kind: Kind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cardinality: Cardinality,
    /// Full name of the nested type for message and group fields
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_name: Option<String>,
    /// Name of the containing oneof, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub oneof: Option<String>,
    /// Present only for map fields
    #[cfg_attr(feature = "serde", serde(default))]
    pub map_entry: Option<MapEntryDescriptor>,
    /// Nested type is not statically linked and must be resolved by name
    #[cfg_attr(feature = "serde", serde(default))]
    pub weak: bool,
    /// Explicit UTF-8 enforcement; `None` follows the file syntax
    #[cfg_attr(feature = "serde", serde(default))]
    pub enforce_utf8: Option<bool>,
}

impl FieldDescriptor {
    /// Singular scalar, string or bytes field
    pub fn scalar(name: impl Into<String>, number: FieldNumber, kind: Kind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            cardinality: Cardinality::Optional,
            type_name: None,
            oneof: None,
            map_entry: None,
            weak: false,
            enforce_utf8: None,
        }
    }

    /// Singular length-delimited message field
    pub fn message(
        name: impl Into<String>,
        number: FieldNumber,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::scalar(name, number, Kind::Message)
        }
    }

    /// Singular group field
    pub fn group(name: impl Into<String>, number: FieldNumber, type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::scalar(name, number, Kind::Group)
        }
    }

    /// Map field; always repeated on the wire
    pub fn map(name: impl Into<String>, number: FieldNumber, entry: MapEntryDescriptor) -> Self {
        Self {
            cardinality: Cardinality::Repeated,
            map_entry: Some(entry),
            ..Self::scalar(name, number, Kind::Message)
        }
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Cardinality::Required;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn in_oneof(mut self, oneof: impl Into<String>) -> Self {
        self.oneof = Some(oneof.into());
        self
    }

    pub fn weak(mut self) -> Self {
        self.weak = true;
        self
    }

    pub fn with_utf8(mut self, enforce: bool) -> Self {
        self.enforce_utf8 = Some(enforce);
        self
    }

    pub fn is_required(&self) -> bool {
        self.cardinality == Cardinality::Required
    }

    pub fn is_map(&self) -> bool {
        self.map_entry.is_some()
    }

    /// Repeated and not a map
    pub fn is_list(&self) -> bool {
        self.cardinality == Cardinality::Repeated && !self.is_map()
    }

    /// Whether string payloads of this field must be valid UTF-8
    pub fn enforces_utf8(&self, syntax: Syntax) -> bool {
        self.enforce_utf8.unwrap_or(syntax == Syntax::Proto3)
    }
}
