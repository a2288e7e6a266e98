//! # Message Types and Type Sets
//!
//! ## Purpose
//!
//! A `TypeSet` is an immutable arena of message types that were linked
//! together: a nested type name that resolves inside the set is statically
//! linked, anything else is left for the resolver. `MessageType` is a cheap
//! handle into a set and owns the lazily built validation table of its type.
//!
//! ## Table Publication
//!
//! Each type's `MessageValidationTable` lives in a `OnceCell`. Concurrent
//! first use from several threads runs at most one winning build; readers only
//! ever observe the published, immutable table. Tables store nested types as
//! indices into the owning set, so building one table never triggers another
//! and recursive schemas are safe.

use crate::validation::classify::{classify, FieldValidationInfo, TypeIndex};
use crate::validation::table::MessageValidationTable;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;
use types::{ExtensionDescriptor, FieldNumber, MessageDescriptor, SchemaError};

/// Anything that names a message type
///
/// Only handles backed by a `TypeSet` can be validated; foreign
/// implementations report `None` from `as_message_type` and make validation
/// return `ValidationStatus::Unknown`.
pub trait TypeHandle: Send + Sync + fmt::Debug {
    fn full_name(&self) -> &str;

    fn as_message_type(&self) -> Option<&MessageType> {
        None
    }
}

struct MessageInfo {
    desc: MessageDescriptor,
    table: OnceCell<MessageValidationTable>,
}

struct TypeSetInner {
    messages: Vec<MessageInfo>,
    by_name: HashMap<String, TypeIndex>,
}

impl TypeSetInner {
    fn link(&self, full_name: &str) -> Option<TypeIndex> {
        self.by_name.get(full_name).copied()
    }
}

/// Immutable set of linked message types
#[derive(Clone)]
pub struct TypeSet {
    inner: Arc<TypeSetInner>,
}

impl TypeSet {
    pub fn builder() -> TypeSetBuilder {
        TypeSetBuilder::default()
    }

    /// Handle for a type by full name
    pub fn message(&self, full_name: &str) -> Option<MessageType> {
        self.inner.link(full_name).map(|index| MessageType {
            set: Arc::clone(&self.inner),
            index,
        })
    }

    /// Handles for every type in insertion order
    pub fn messages(&self) -> impl Iterator<Item = MessageType> + '_ {
        (0..self.inner.messages.len()).map(move |index| MessageType {
            set: Arc::clone(&self.inner),
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.messages.is_empty()
    }
}

impl fmt::Debug for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.messages.iter().map(|m| &m.desc.full_name))
            .finish()
    }
}

/// Collects descriptors and links them into a `TypeSet`
#[derive(Debug, Default)]
pub struct TypeSetBuilder {
    messages: Vec<MessageDescriptor>,
}

impl TypeSetBuilder {
    pub fn add(mut self, desc: MessageDescriptor) -> Self {
        self.messages.push(desc);
        self
    }

    /// Check every descriptor and link nested type names within the set
    pub fn build(self) -> Result<TypeSet, SchemaError> {
        let mut by_name = HashMap::with_capacity(self.messages.len());
        for (index, desc) in self.messages.iter().enumerate() {
            desc.check()?;
            if by_name.insert(desc.full_name.clone(), index).is_some() {
                return Err(SchemaError::DuplicateMessage {
                    full_name: desc.full_name.clone(),
                });
            }
        }

        let messages = self
            .messages
            .into_iter()
            .map(|desc| MessageInfo {
                desc,
                table: OnceCell::new(),
            })
            .collect();

        Ok(TypeSet {
            inner: Arc::new(TypeSetInner { messages, by_name }),
        })
    }
}

/// Handle to one message type in a `TypeSet`
#[derive(Clone)]
pub struct MessageType {
    set: Arc<TypeSetInner>,
    index: TypeIndex,
}

impl MessageType {
    fn info(&self) -> &MessageInfo {
        &self.set.messages[self.index]
    }

    pub fn full_name(&self) -> &str {
        &self.info().desc.full_name
    }

    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.info().desc
    }

    /// Validation table, built on first use
    pub fn validation_table(&self) -> &MessageValidationTable {
        let info = self.info();
        info.table.get_or_init(|| {
            trace!("building validation table for {}", info.desc.full_name);
            let set = &self.set;
            MessageValidationTable::build(&info.desc, &|name: &str| set.link(name))
        })
    }

    /// Another type of the same set, as referenced by a table entry
    pub(crate) fn sibling(&self, index: TypeIndex) -> MessageType {
        MessageType {
            set: Arc::clone(&self.set),
            index,
        }
    }

    /// Whether a declared field is weak
    pub(crate) fn weak_type_name(&self, number: FieldNumber) -> Option<&str> {
        self.descriptor()
            .field_by_number(number)
            .filter(|f| f.weak)
            .and_then(|f| f.type_name.as_deref())
    }
}

impl TypeHandle for MessageType {
    fn full_name(&self) -> &str {
        MessageType::full_name(self)
    }

    fn as_message_type(&self) -> Option<&MessageType> {
        Some(self)
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.set, &other.set) && self.index == other.index
    }
}

impl Eq for MessageType {}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageType").field(&self.full_name()).finish()
    }
}

struct ExtensionInner {
    desc: ExtensionDescriptor,
    message: Option<MessageType>,
    validation: OnceCell<FieldValidationInfo>,
}

/// An extension field together with its linked nested type, if any
#[derive(Clone)]
pub struct ExtensionType {
    inner: Arc<ExtensionInner>,
}

impl ExtensionType {
    /// `message` links the nested type of a message or group extension
    pub fn new(desc: ExtensionDescriptor, message: Option<MessageType>) -> Self {
        Self {
            inner: Arc::new(ExtensionInner {
                desc,
                message,
                validation: OnceCell::new(),
            }),
        }
    }

    pub fn descriptor(&self) -> &ExtensionDescriptor {
        &self.inner.desc
    }

    pub fn extendee(&self) -> &str {
        &self.inner.desc.extendee
    }

    pub fn number(&self) -> FieldNumber {
        self.inner.desc.number()
    }

    /// Classification, computed once per extension
    pub fn validation(&self) -> &FieldValidationInfo {
        self.inner.validation.get_or_init(|| {
            let message = self.inner.message.as_ref();
            let link = |name: &str| {
                message
                    .filter(|m| m.full_name() == name)
                    .map(|m| m.index)
            };
            classify(&self.inner.desc.field, self.inner.desc.syntax, &link)
        })
    }

    /// Nested type for message, group and message-valued map extensions
    pub fn nested(&self) -> Option<MessageType> {
        self.validation()
            .nested
            .and_then(|_| self.inner.message.clone())
    }
}

impl fmt::Debug for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionType")
            .field("extendee", &self.extendee())
            .field("number", &self.number())
            .field("name", &self.inner.desc.field.name)
            .finish()
    }
}
