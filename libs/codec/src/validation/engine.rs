//! # Traversal Engine
//!
//! ## Purpose
//!
//! Walks the tag-length-value structure of a buffer against a message type
//! without decoding it. Nested messages, groups and map entries are followed
//! with an explicit stack of frames instead of recursion, so adversarial
//! nesting costs heap growth rather than native stack depth.
//!
//! ## Frame Lifecycle
//!
//! ```text
//! tag(Bytes) on Message/Map field  → push frame over exactly the payload
//! tag(StartGroup) on Group field   → push frame ending at EndGroup(number)
//! view exhausted / EndGroup match  → completeness check, pop, resume parent
//! ```
//!
//! A length-delimited frame remembers the parent bytes that follow its
//! payload and resumes from there when popped. A group frame shares the
//! parent's view and simply continues after its end-group tag.
//!
//! ## Required Fields
//!
//! Each Message or Group frame accumulates a 64-bit presence mask. When the
//! frame is popped the mask is compared with its own table; any incomplete
//! frame clears the call-wide `initialized` flag for good.

use super::classify::{FieldValidationInfo, ValidationType};
use super::config::UnmarshalOptions;
use super::status::ValidationStatus;
use crate::error::WireError;
use crate::message::{MessageType, TypeHandle};
use crate::registry::{find_message_type, ResolverError};
use crate::wire::{consume_bytes, consume_field_value, consume_tag, consume_varint};
use std::fmt::Display;
use tracing::{debug, trace};
use types::{FieldNumber, WireType, MAX_FIELD_NUMBER};

/// Bytes of the unread view included in rejection events
const REJECTION_PREVIEW_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Message,
    Group,
    Map,
}

/// One active nesting level
#[derive(Debug)]
struct Frame<'a> {
    kind: FrameKind,
    key_type: ValidationType,
    val_type: ValidationType,
    /// Table owner; for map frames the value type, if message-valued
    message: Option<MessageType>,
    /// Field number closing this frame; 0 for length-delimited frames
    end_group: FieldNumber,
    /// Parent bytes following this frame's payload
    tail: &'a [u8],
    required_mask: u64,
}

impl<'a> Frame<'a> {
    fn root(message: MessageType, end_group: FieldNumber) -> Self {
        Self {
            kind: if end_group > 0 {
                FrameKind::Group
            } else {
                FrameKind::Message
            },
            key_type: ValidationType::Other,
            val_type: ValidationType::Other,
            message: Some(message),
            end_group,
            tail: &[],
            required_mask: 0,
        }
    }
}

/// A field's classification with its nested type bound to a handle
#[derive(Debug, Default)]
struct ResolvedField {
    info: FieldValidationInfo,
    nested: Option<MessageType>,
}

/// Check that `buf` is a valid encoding of `message_type`
///
/// Returns `ValidationStatus::Unknown` without reading the buffer when the
/// handle is not backed by a `TypeSet`.
pub fn validate(buf: &[u8], message_type: &dyn TypeHandle, opts: &UnmarshalOptions) -> ValidationStatus {
    let Some(message) = message_type.as_message_type() else {
        if opts.config.trace_rejections {
            debug!("cannot validate foreign message type {}", message_type.full_name());
        }
        return ValidationStatus::Unknown;
    };
    Validator::new(opts).run(buf, message.clone(), 0).0
}

/// Check that `buf` starts with a group body of `message_type` terminated by
/// an end-group tag for `group_number`
///
/// On success also returns the bytes consumed, end-group tag included. Bytes
/// after the terminator are not inspected.
pub fn validate_group(
    buf: &[u8],
    message_type: &dyn TypeHandle,
    group_number: FieldNumber,
    opts: &UnmarshalOptions,
) -> (ValidationStatus, usize) {
    let Some(message) = message_type.as_message_type() else {
        return (ValidationStatus::Unknown, 0);
    };
    if group_number == 0 {
        // 0 would make the root an ordinary message frame
        return (ValidationStatus::Invalid, 0);
    }
    Validator::new(opts).run(buf, message.clone(), group_number)
}

struct Validator<'o> {
    opts: &'o UnmarshalOptions,
}

impl<'o> Validator<'o> {
    fn new(opts: &'o UnmarshalOptions) -> Self {
        Self { opts }
    }

    fn run<'a>(&self, buf: &'a [u8], root: MessageType, group: FieldNumber) -> (ValidationStatus, usize) {
        let mut stack: Vec<Frame<'a>> = Vec::with_capacity(self.opts.config.initial_frame_capacity.max(1));
        stack.push(Frame::root(root, group));

        let mut b: &'a [u8] = buf;
        let mut initialized = true;

        'state: while let Some(top) = stack.len().checked_sub(1) {
            while !b.is_empty() {
                let (num, wire_type, n) = match consume_tag(b) {
                    Ok(tag) => tag,
                    Err(err) => return (self.invalid(0, err, b), 0),
                };
                b = &b[n..];
                if num > MAX_FIELD_NUMBER {
                    return (self.invalid(num, "field number above 2^29-1", b), 0);
                }

                if wire_type == WireType::EndGroup {
                    if stack[top].end_group == num {
                        Self::pop(&mut stack, &mut initialized);
                        continue 'state;
                    }
                    return (
                        self.invalid(num, format!("unexpected end-group (open: {})", stack[top].end_group), b),
                        0,
                    );
                }

                let field = match self.resolve(&stack[top], num) {
                    Ok(field) => field,
                    Err(status) => return (status, 0),
                };

                if field.info.required_index > 0 && field.info.typ.required_wire_type() == Some(wire_type) {
                    stack[top].required_mask |= 1u64 << (field.info.required_index - 1);
                }

                match field.info.typ {
                    ValidationType::Message | ValidationType::Map if wire_type == WireType::Bytes => {
                        if field.info.typ == ValidationType::Message && field.nested.is_none() {
                            return (self.unknown(num, "message field has no resolvable type"), 0);
                        }
                        let (size, n) = match consume_varint(b) {
                            Ok(v) => v,
                            Err(err) => return (self.invalid(num, err, b), 0),
                        };
                        b = &b[n..];
                        if (b.len() as u64) < size {
                            let err = WireError::LengthOverflow {
                                length: size,
                                remaining: b.len(),
                            };
                            return (self.invalid(num, err, b), 0);
                        }
                        let (payload, tail) = b.split_at(size as usize);
                        let kind = if field.info.typ == ValidationType::Map {
                            FrameKind::Map
                        } else {
                            FrameKind::Message
                        };
                        trace!("enter {:?} frame for field {} ({} bytes)", kind, num, size);
                        stack.push(Frame {
                            kind,
                            key_type: field.info.key_type,
                            val_type: field.info.val_type,
                            message: field.nested,
                            end_group: 0,
                            tail,
                            required_mask: 0,
                        });
                        b = payload;
                        continue 'state;
                    }
                    ValidationType::Group if wire_type == WireType::StartGroup => {
                        if field.nested.is_none() {
                            return (self.unknown(num, "group field has no resolvable type"), 0);
                        }
                        trace!("enter group frame for field {}", num);
                        stack.push(Frame {
                            kind: FrameKind::Group,
                            key_type: ValidationType::Other,
                            val_type: ValidationType::Other,
                            message: field.nested,
                            end_group: num,
                            tail: &[],
                            required_mask: 0,
                        });
                        continue 'state;
                    }
                    ValidationType::RepeatedVarint if wire_type == WireType::Bytes => {
                        let (mut packed, n) = match consume_bytes(b) {
                            Ok(v) => v,
                            Err(err) => return (self.invalid(num, err, b), 0),
                        };
                        b = &b[n..];
                        while !packed.is_empty() {
                            match consume_varint(packed) {
                                Ok((_, n)) => packed = &packed[n..],
                                Err(err) => return (self.invalid(num, err, packed), 0),
                            }
                        }
                        continue;
                    }
                    ValidationType::RepeatedFixed32 | ValidationType::RepeatedFixed64
                        if wire_type == WireType::Bytes =>
                    {
                        let width = if field.info.typ == ValidationType::RepeatedFixed32 { 4 } else { 8 };
                        let (packed, n) = match consume_bytes(b) {
                            Ok(v) => v,
                            Err(err) => return (self.invalid(num, err, b), 0),
                        };
                        if packed.len() % width != 0 {
                            let reason = format!("packed payload of {} bytes is not a multiple of {}", packed.len(), width);
                            return (self.invalid(num, reason, packed), 0);
                        }
                        b = &b[n..];
                        continue;
                    }
                    ValidationType::Utf8String if wire_type == WireType::Bytes => {
                        let (text, n) = match consume_bytes(b) {
                            Ok(v) => v,
                            Err(err) => return (self.invalid(num, err, b), 0),
                        };
                        if let Err(err) = std::str::from_utf8(text) {
                            return (self.invalid(num, err, text), 0);
                        }
                        b = &b[n..];
                        continue;
                    }
                    _ => {}
                }

                match consume_field_value(num, wire_type, b) {
                    Ok(n) => b = &b[n..],
                    Err(err) => {
                        let reason = format!("{} value: {}", wire_type.name(), err);
                        return (self.invalid(num, reason, b), 0);
                    }
                }
            }

            // View exhausted
            if stack[top].end_group != 0 {
                let reason = format!("missing end-group for field {}", stack[top].end_group);
                return (self.invalid(stack[top].end_group, reason, b), 0);
            }
            b = stack[top].tail;
            Self::pop(&mut stack, &mut initialized);
        }

        let consumed = buf.len() - b.len();
        let status = if initialized {
            ValidationStatus::ValidInitialized
        } else {
            ValidationStatus::ValidMaybeUninitialized
        };
        (status, consumed)
    }

    /// Pop the top frame, folding its completeness into `initialized`
    fn pop(stack: &mut Vec<Frame<'_>>, initialized: &mut bool) {
        let Some(frame) = stack.pop() else {
            return;
        };
        if frame.kind == FrameKind::Map {
            return;
        }
        if let Some(message) = &frame.message {
            if !message.validation_table().is_complete(frame.required_mask) {
                trace!(
                    "{} missing required fields (mask {:#x})",
                    message.full_name(),
                    frame.required_mask
                );
                *initialized = false;
            }
        }
    }

    /// Classification of field `num` in the context of `frame`
    fn resolve(&self, frame: &Frame<'_>, num: FieldNumber) -> Result<ResolvedField, ValidationStatus> {
        if frame.kind == FrameKind::Map {
            let mut field = ResolvedField::default();
            match num {
                1 => field.info.typ = frame.key_type,
                2 => {
                    field.info.typ = frame.val_type;
                    field.nested = frame.message.clone();
                }
                _ => {}
            }
            return Ok(field);
        }

        let Some(message) = frame.message.as_ref() else {
            return Err(self.unknown(num, "frame has no message type"));
        };

        if let Some(info) = message.validation_table().field(num) {
            let mut field = ResolvedField {
                info: *info,
                nested: info.nested.map(|index| message.sibling(index)),
            };
            if field.info.typ == ValidationType::Message && field.nested.is_none() {
                // Probable weak field; looked up again on every occurrence
                if let Some(type_name) = message.weak_type_name(num) {
                    match find_message_type(self.opts.resolver.as_ref(), type_name) {
                        Ok(found) => field.nested = found,
                        // Final even if the resolver gains the type later
                        Err(ResolverError::NotFound) => field.info.typ = ValidationType::Bytes,
                        Err(err) => return Err(self.unknown(num, err)),
                    }
                }
            }
            return Ok(field);
        }

        // Possible extension
        match self.opts.resolver.find_extension_by_number(message.full_name(), num) {
            Ok(extension) => Ok(ResolvedField {
                info: *extension.validation(),
                nested: extension.nested(),
            }),
            // Skipped for good, even if the extension is registered later
            Err(ResolverError::NotFound) => Ok(ResolvedField::default()),
            Err(err) => Err(self.unknown(num, err)),
        }
    }

    fn invalid(&self, num: FieldNumber, reason: impl Display, rest: &[u8]) -> ValidationStatus {
        if self.opts.config.trace_rejections {
            let preview = &rest[..rest.len().min(REJECTION_PREVIEW_LEN)];
            debug!(
                "invalid encoding at field {}: {} (next bytes: {})",
                num,
                reason,
                hex::encode(preview)
            );
        }
        ValidationStatus::Invalid
    }

    fn unknown(&self, num: FieldNumber, reason: impl Display) -> ValidationStatus {
        if self.opts.config.trace_rejections {
            debug!("cannot judge field {}: {}", num, reason);
        }
        ValidationStatus::Unknown
    }
}
