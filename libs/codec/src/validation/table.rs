//! # Message Validation Table
//!
//! Per-type mapping from field number to `FieldValidationInfo`, plus the
//! required-field count the completeness check compares against. Built once
//! per message type, published through a `OnceCell` and never mutated after.
//!
//! ## Required-Field Indexing
//!
//! Required fields receive indices 1..=64 in declaration order. Presence is
//! tracked in a 64-bit mask, so the 65th and later required fields get index
//! 0 and the stored count is pinned at `SATURATED_REQUIRED_COUNT`, which no
//! popcount of a 64-bit mask can reach. Such types always validate as
//! possibly uninitialized.

use super::classify::{classify, FieldValidationInfo, TypeLinker};
use std::collections::HashMap;
use tracing::warn;
use types::{FieldNumber, MessageDescriptor};

/// Required fields that can be tracked individually
pub const MAX_TRACKED_REQUIRED: u8 = 64;

/// Stored count for types with more than `MAX_TRACKED_REQUIRED` required fields
pub const SATURATED_REQUIRED_COUNT: u8 = MAX_TRACKED_REQUIRED + 1;

/// Field numbers below this are stored in a dense vector
const DENSE_FIELD_LIMIT: FieldNumber = 256;

/// Classification of every declared field of one message type
#[derive(Debug, Clone, Default)]
pub struct MessageValidationTable {
    dense: Vec<Option<FieldValidationInfo>>,
    sparse: HashMap<FieldNumber, FieldValidationInfo>,
    num_required_fields: u8,
}

impl MessageValidationTable {
    /// Classify every field of `desc` in declaration order
    pub fn build(desc: &MessageDescriptor, linker: &dyn TypeLinker) -> Self {
        let mut table = Self::default();
        let mut saturated = false;

        for field in &desc.fields {
            let mut info = classify(field, desc.syntax, linker);

            if field.is_required() {
                if table.num_required_fields < MAX_TRACKED_REQUIRED {
                    table.num_required_fields += 1;
                    info.required_index = table.num_required_fields;
                } else {
                    table.num_required_fields = SATURATED_REQUIRED_COUNT;
                    saturated = true;
                }
            }

            table.insert(field.number, info);
        }

        if saturated {
            warn!(
                "{} declares more than {} required fields; initialization will never be confirmed",
                desc.full_name, MAX_TRACKED_REQUIRED
            );
        }

        table
    }

    fn insert(&mut self, number: FieldNumber, info: FieldValidationInfo) {
        if number < DENSE_FIELD_LIMIT {
            let slot = number as usize;
            if self.dense.len() <= slot {
                self.dense.resize(slot + 1, None);
            }
            self.dense[slot] = Some(info);
        } else {
            self.sparse.insert(number, info);
        }
    }

    /// Classification of a declared field
    #[inline]
    pub fn field(&self, number: FieldNumber) -> Option<&FieldValidationInfo> {
        if number < DENSE_FIELD_LIMIT {
            self.dense.get(number as usize).and_then(Option::as_ref)
        } else {
            self.sparse.get(&number)
        }
    }

    /// Required fields the presence mask must cover, saturated above 64
    pub fn num_required_fields(&self) -> u8 {
        self.num_required_fields
    }

    /// Whether a frame's presence mask proves every required field was seen
    pub fn is_complete(&self, required_mask: u64) -> bool {
        self.num_required_fields == 0 || required_mask.count_ones() == u32::from(self.num_required_fields)
    }

    pub fn len(&self) -> usize {
        self.dense.iter().flatten().count() + self.sparse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
