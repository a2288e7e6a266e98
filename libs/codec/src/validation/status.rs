//! Validation outcome

use std::fmt;

/// Result of checking a buffer against a message type
///
/// `Invalid` and `Unknown` are returned as soon as they are detected; the two
/// valid statuses are only produced after the whole buffer was walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// No judgement possible: unresolved weak or extension type, resolver
    /// failure, or a message type the engine cannot introspect
    Unknown,
    /// Decoding will fail
    Invalid,
    /// Decoding will succeed and every required field is present
    ValidInitialized,
    /// Decoding will succeed; required-field completeness is not confirmed
    ///
    /// Also reported for initialized messages whose required fields arrive
    /// with an unexpected wire type or in a group, and for types with more
    /// than 64 required fields.
    ValidMaybeUninitialized,
}

impl ValidationStatus {
    /// Whether a full decode is known to succeed
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            ValidationStatus::ValidInitialized | ValidationStatus::ValidMaybeUninitialized
        )
    }

    /// Whether the decoded message is known to be fully initialized
    pub fn is_initialized(self) -> bool {
        self == ValidationStatus::ValidInitialized
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationStatus::Unknown => "ValidationUnknown",
            ValidationStatus::Invalid => "ValidationInvalid",
            ValidationStatus::ValidInitialized => "ValidationValidInitialized",
            ValidationStatus::ValidMaybeUninitialized => "ValidationValidMaybeUninitialized",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ValidationStatus::ValidInitialized.is_valid());
        assert!(ValidationStatus::ValidInitialized.is_initialized());
        assert!(ValidationStatus::ValidMaybeUninitialized.is_valid());
        assert!(!ValidationStatus::ValidMaybeUninitialized.is_initialized());
        assert!(!ValidationStatus::Invalid.is_valid());
        assert!(!ValidationStatus::Unknown.is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidationStatus::Unknown.to_string(), "ValidationUnknown");
        assert_eq!(
            ValidationStatus::ValidMaybeUninitialized.to_string(),
            "ValidationValidMaybeUninitialized"
        );
    }
}
