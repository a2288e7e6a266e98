//! # Extension and Weak-Type Resolution
//!
//! ## Purpose
//!
//! The validator looks up fields it cannot find in a message's own table
//! (extensions) and weak message references through a `Resolver` injected via
//! `UnmarshalOptions`. Nothing here is global: each call sees exactly the
//! resolver it was given.
//!
//! ## Not-Found Semantics
//!
//! `ResolverError::NotFound` is an ordinary answer: unknown extensions are
//! skipped and unknown weak types are treated as opaque bytes. Any other error
//! stops validation with `ValidationStatus::Unknown`.
//!
//! A resolver that can still gain registrations makes "not found" provisional:
//! a type registered later could turn a skipped field into a failing one. The
//! validator does not model this and takes "not found" at face value.

use crate::message::{ExtensionType, MessageType, TypeHandle, TypeSet};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use types::FieldNumber;

/// Lookup failures reported by a resolver
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// Definitive absence; never fatal to validation
    #[error("not found")]
    NotFound,

    /// The resolver could not answer
    #[error("resolver unavailable: {0}")]
    Unavailable(String),
}

/// Registration conflicts in `TypeRegistry`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("message type {full_name} already registered")]
    DuplicateMessage { full_name: String },

    #[error("extension {extendee}:{number} already registered")]
    DuplicateExtension {
        extendee: String,
        number: FieldNumber,
    },
}

/// Dynamic lookup of extensions and weak message types
pub trait Resolver: Send + Sync {
    fn find_extension_by_number(
        &self,
        message: &str,
        number: FieldNumber,
    ) -> Result<ExtensionType, ResolverError>;

    fn find_message_by_name(&self, full_name: &str) -> Result<Arc<dyn TypeHandle>, ResolverError>;
}

/// Resolver that knows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResolver;

impl Resolver for EmptyResolver {
    fn find_extension_by_number(&self, _: &str, _: FieldNumber) -> Result<ExtensionType, ResolverError> {
        Err(ResolverError::NotFound)
    }

    fn find_message_by_name(&self, _: &str) -> Result<Arc<dyn TypeHandle>, ResolverError> {
        Err(ResolverError::NotFound)
    }
}

/// Concurrent in-memory resolver
#[derive(Debug, Default)]
pub struct TypeRegistry {
    messages: DashMap<String, Arc<dyn TypeHandle>>,
    extensions: DashMap<(String, FieldNumber), ExtensionType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message type under its full name
    pub fn register_message(&self, handle: Arc<dyn TypeHandle>) -> Result<(), RegistryError> {
        match self.messages.entry(handle.full_name().to_string()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateMessage {
                full_name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!("registered message type {}", entry.key());
                entry.insert(handle);
                Ok(())
            }
        }
    }

    /// Register every message of a type set
    pub fn register_type_set(&self, set: &TypeSet) -> Result<(), RegistryError> {
        for message in set.messages() {
            self.register_message(Arc::new(message))?;
        }
        Ok(())
    }

    /// Register an extension under (extendee, number)
    pub fn register_extension(&self, extension: ExtensionType) -> Result<(), RegistryError> {
        let key = (extension.extendee().to_string(), extension.number());
        match self.extensions.entry(key) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateExtension {
                extendee: entry.key().0.clone(),
                number: entry.key().1,
            }),
            Entry::Vacant(entry) => {
                debug!("registered extension {}:{}", entry.key().0, entry.key().1);
                entry.insert(extension);
                Ok(())
            }
        }
    }

    pub fn num_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn num_extensions(&self) -> usize {
        self.extensions.len()
    }
}

impl Resolver for TypeRegistry {
    fn find_extension_by_number(
        &self,
        message: &str,
        number: FieldNumber,
    ) -> Result<ExtensionType, ResolverError> {
        self.extensions
            .get(&(message.to_string(), number))
            .map(|entry| entry.value().clone())
            .ok_or(ResolverError::NotFound)
    }

    fn find_message_by_name(&self, full_name: &str) -> Result<Arc<dyn TypeHandle>, ResolverError> {
        self.messages
            .get(full_name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(ResolverError::NotFound)
    }
}

/// Look up a registered message and return it only if it can be validated
pub fn find_message_type(resolver: &dyn Resolver, full_name: &str) -> Result<Option<MessageType>, ResolverError> {
    resolver
        .find_message_by_name(full_name)
        .map(|handle| handle.as_message_type().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ExtensionDescriptor, FieldDescriptor, Kind, MessageDescriptor, Syntax};

    #[derive(Debug)]
    struct Foreign;

    impl TypeHandle for Foreign {
        fn full_name(&self) -> &str {
            "foreign.Type"
        }
    }

    fn set() -> TypeSet {
        TypeSet::builder()
            .add(MessageDescriptor::new("r.Base", Syntax::Proto2))
            .add(MessageDescriptor::new("r.Payload", Syntax::Proto2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_message_registration_and_lookup() {
        let registry = TypeRegistry::new();
        registry.register_type_set(&set()).unwrap();
        assert_eq!(registry.num_messages(), 2);

        let found = find_message_type(&registry, "r.Payload").unwrap().unwrap();
        assert_eq!(found.full_name(), "r.Payload");

        assert_eq!(
            registry.find_message_by_name("r.Missing").unwrap_err(),
            ResolverError::NotFound
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = TypeRegistry::new();
        registry.register_type_set(&set()).unwrap();
        assert!(matches!(
            registry.register_type_set(&set()),
            Err(RegistryError::DuplicateMessage { .. })
        ));
    }

    #[test]
    fn test_foreign_handles_are_not_message_types() {
        let registry = TypeRegistry::new();
        registry.register_message(Arc::new(Foreign)).unwrap();
        assert_eq!(find_message_type(&registry, "foreign.Type").unwrap(), None);
    }

    #[test]
    fn test_extension_lookup_by_extendee_and_number() {
        let registry = TypeRegistry::new();
        let ext = ExtensionType::new(
            ExtensionDescriptor::new("r.Base", Syntax::Proto2, FieldDescriptor::scalar("x", 100, Kind::Int64)),
            None,
        );
        registry.register_extension(ext.clone()).unwrap();
        assert_eq!(registry.num_extensions(), 1);

        assert_eq!(registry.find_extension_by_number("r.Base", 100).unwrap().number(), 100);
        assert_eq!(
            registry.find_extension_by_number("r.Base", 101).unwrap_err(),
            ResolverError::NotFound
        );
        assert_eq!(
            registry.find_extension_by_number("r.Payload", 100).unwrap_err(),
            ResolverError::NotFound
        );
        assert!(matches!(
            registry.register_extension(ext),
            Err(RegistryError::DuplicateExtension { number: 100, .. })
        ));
    }

    #[test]
    fn test_empty_resolver() {
        assert_eq!(EmptyResolver.find_message_by_name("a.B").unwrap_err(), ResolverError::NotFound);
        assert_eq!(
            EmptyResolver.find_extension_by_number("a.B", 1).unwrap_err(),
            ResolverError::NotFound
        );
    }
}
