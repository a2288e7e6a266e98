//! Message and extension descriptors

use super::{Cardinality, FieldDescriptor, Kind, Syntax};
use crate::common::errors::SchemaError;
use crate::protocol::{is_reserved_field_number, is_valid_field_number, FieldNumber};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A message type: its full name, syntax and fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageDescriptor {
    pub full_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub syntax: Syntax,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fields: Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(full_name: impl Into<String>, syntax: Syntax) -> Self {
        Self {
            full_name: full_name.into(),
            syntax,
            fields: Vec::new(),
        }
    }

    /// Append a field; declaration order is preserved
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_by_number(&self, number: FieldNumber) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Required fields in declaration order
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_required())
    }

    /// Check the descriptor for internal consistency
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen: HashMap<FieldNumber, &str> = HashMap::with_capacity(self.fields.len());

        for field in &self.fields {
            if !is_valid_field_number(field.number as u64) {
                return Err(SchemaError::FieldNumberOutOfRange {
                    message: self.full_name.clone(),
                    field: field.name.clone(),
                    number: field.number,
                });
            }
            if is_reserved_field_number(field.number) {
                return Err(SchemaError::ReservedFieldNumber {
                    message: self.full_name.clone(),
                    field: field.name.clone(),
                    number: field.number,
                });
            }
            if let Some(first) = seen.insert(field.number, &field.name) {
                return Err(SchemaError::DuplicateFieldNumber {
                    message: self.full_name.clone(),
                    number: field.number,
                    first: first.to_string(),
                    second: field.name.clone(),
                });
            }

            if let Some(entry) = &field.map_entry {
                let value_ok = entry.value != Kind::Message || entry.value_message.is_some();
                if field.cardinality != Cardinality::Repeated
                    || field.kind != Kind::Message
                    || entry.key.is_message()
                    || entry.value == Kind::Group
                    || !value_ok
                {
                    return Err(SchemaError::MalformedMap {
                        message: self.full_name.clone(),
                        field: field.name.clone(),
                    });
                }
            } else if field.kind.is_message() && field.type_name.is_none() {
                return Err(SchemaError::MissingTypeName {
                    message: self.full_name.clone(),
                    field: field.name.clone(),
                    kind: field.kind.name(),
                });
            }

            if field.oneof.is_some() && field.cardinality != Cardinality::Optional {
                return Err(SchemaError::RequiredOneofMember {
                    message: self.full_name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A field declared outside the message it extends
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtensionDescriptor {
    /// Full name of the extended message
    pub extendee: String,
    /// Syntax of the file declaring the extension
    #[cfg_attr(feature = "serde", serde(default))]
    pub syntax: Syntax,
    pub field: FieldDescriptor,
}

impl ExtensionDescriptor {
    pub fn new(extendee: impl Into<String>, syntax: Syntax, field: FieldDescriptor) -> Self {
        Self {
            extendee: extendee.into(),
            syntax,
            field,
        }
    }

    pub fn number(&self) -> FieldNumber {
        self.field.number
    }
}
