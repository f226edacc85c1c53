//! Binary serializer for Neo VM stack items.
//!
//! Serializes and deserializes `StackItem` values for storage, enforcing the
//! execution engine's item-count and item-size limits while serializing.

use crate::{Error, Result};
use neo_io::{BinaryWriter, MemoryReader};
use neo_vm::{ExecutionEngineLimits, ReferenceCounter, StackItem, StackItemType};
use num_bigint::BigInt;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

const INTEGER_MAX_SIZE: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct BinarySerializer;

impl BinarySerializer {
    /// Serializes the provided value into a byte buffer using the supplied limits.
    pub fn serialize<T: IntoStackItem>(value: T, limits: ExecutionEngineLimits) -> Result<Vec<u8>> {
        let item = value.into_stack_item();
        Self::serialize_with_limits(
            item,
            limits.max_item_size as usize,
            limits.max_stack_size as usize,
        )
    }

    /// Serializes a stack item using explicit size and item limits.
    pub fn serialize_with_limits(
        item: StackItem,
        max_size: usize,
        max_items: usize,
    ) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::new();
        Self::serialize_internal(&mut writer, item, max_size, max_items)?;
        Ok(writer.to_bytes())
    }

    /// Deserializes a stack item from a byte slice.
    pub fn deserialize(
        data: &[u8],
        limits: ExecutionEngineLimits,
        reference_counter: Option<Arc<ReferenceCounter>>,
    ) -> Result<StackItem> {
        let mut reader = MemoryReader::new(data);
        Self::deserialize_internal(
            &mut reader,
            limits.max_item_size,
            limits.max_stack_size,
            reference_counter,
        )
    }

    fn serialize_internal(
        writer: &mut BinaryWriter,
        item: StackItem,
        max_size: usize,
        max_items: usize,
    ) -> Result<()> {
        if max_items == 0 {
            return Err(Error::SerializationError(
                "Maximum stack item count must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::<usize>::new();
        let mut stack = vec![item];
        let mut remaining = max_items;

        while let Some(current) = stack.pop() {
            if remaining == 0 {
                return Err(Error::SerializationError(
                    "Serialized item count exceeds execution limits".to_string(),
                ));
            }
            remaining -= 1;

            writer.write_u8(current.stack_item_type().to_byte())?;

            match current {
                StackItem::Null => {}
                StackItem::Boolean(value) => {
                    writer.write_bool(value)?;
                }
                other @ (StackItem::Integer(_) | StackItem::ByteString(_) | StackItem::Buffer(_)) => {
                    let bytes = other.as_bytes()?;
                    writer.write_var_bytes(&bytes)?;
                }
                StackItem::Array(items) | StackItem::Struct(items) => {
                    Self::track_container(&mut seen, &items as *const _ as usize)?;
                    writer.write_var_int(items.len() as u64)?;
                    for child in items.into_iter().rev() {
                        stack.push(child);
                    }
                }
                StackItem::Map(map) => {
                    Self::track_container(&mut seen, &map as *const _ as usize)?;
                    writer.write_var_int(map.len() as u64)?;
                    for (key, value) in map.into_iter().rev() {
                        stack.push(value);
                        stack.push(key);
                    }
                }
                StackItem::Pointer(_) | StackItem::InteropInterface(_) => {
                    return Err(Error::InvalidOperation(
                        "Stack item type cannot be serialized".to_string(),
                    ));
                }
            }

            if writer.len() > max_size {
                return Err(Error::SerializationError(
                    "Serialized data exceeds configured maximum size".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn deserialize_internal(
        reader: &mut MemoryReader,
        max_size: u32,
        max_items: u32,
        _reference_counter: Option<Arc<ReferenceCounter>>,
    ) -> Result<StackItem> {
        if max_items == 0 {
            return Err(Error::SerializationError(
                "Maximum stack item count must be greater than zero".to_string(),
            ));
        }

        let max_items_usize = max_items as usize;
        let mut entries: Vec<DeserializedEntry> = Vec::new();
        let mut pending: u64 = 1;

        while pending > 0 {
            pending -= 1;

            let raw_type = reader.read_byte()?;
            let item_type = StackItemType::from_byte(raw_type).ok_or_else(|| {
                Error::SerializationError(format!("Unsupported stack item type 0x{raw_type:02X}"))
            })?;

            match item_type {
                StackItemType::Any => entries.push(DeserializedEntry::Item(StackItem::null())),
                StackItemType::Boolean => {
                    let value = reader.read_boolean()?;
                    entries.push(DeserializedEntry::Item(StackItem::from_bool(value)));
                }
                StackItemType::Integer => {
                    let bytes = reader.read_var_memory(INTEGER_MAX_SIZE)?;
                    let value = BigInt::from_signed_bytes_le(&bytes);
                    entries.push(DeserializedEntry::Item(StackItem::from_int(value)));
                }
                StackItemType::ByteString => {
                    let bytes = reader.read_var_memory(max_size as usize)?;
                    entries.push(DeserializedEntry::Item(StackItem::from_byte_string(bytes)));
                }
                StackItemType::Buffer => {
                    let bytes = reader.read_var_memory(max_size as usize)?;
                    entries.push(DeserializedEntry::Item(StackItem::from_buffer(bytes)));
                }
                StackItemType::Array | StackItemType::Struct => {
                    let count = reader.read_var_int(max_items as u64)? as usize;
                    Self::validate_container_size(count, max_items_usize)?;
                    pending = pending
                        .checked_add(count as u64)
                        .ok_or_else(|| Error::SerializationError("Array size exceeds execution limits".to_string()))?;
                    entries.push(DeserializedEntry::Placeholder {
                        ty: item_type,
                        element_count: count,
                    });
                }
                StackItemType::Map => {
                    let count = reader.read_var_int(max_items as u64)? as usize;
                    Self::validate_container_size(count * 2, max_items_usize)?;
                    pending = pending
                        .checked_add((count as u64).checked_mul(2).ok_or_else(|| {
                            Error::SerializationError("Map entry count exceeds execution limits".to_string())
                        })?)
                        .ok_or_else(|| Error::SerializationError("Map entry count exceeds execution limits".to_string()))?;
                    entries.push(DeserializedEntry::Placeholder {
                        ty: item_type,
                        element_count: count,
                    });
                }
                StackItemType::Pointer | StackItemType::InteropInterface => {
                    return Err(Error::SerializationError(format!(
                        "Unsupported stack item type 0x{raw_type:02X}"
                    )));
                }
            }

            if entries.len() > max_items_usize {
                return Err(Error::SerializationError(
                    "Deserialized item count exceeds maximum stack size".to_string(),
                ));
            }
        }

        let mut stack: Vec<StackItem> = Vec::with_capacity(entries.len());

        while let Some(entry) = entries.pop() {
            match entry {
                DeserializedEntry::Item(item) => stack.push(item),
                DeserializedEntry::Placeholder { ty, element_count } => match ty {
                    StackItemType::Array | StackItemType::Struct => {
                        let mut items = Vec::with_capacity(element_count);
                        for _ in 0..element_count {
                            items.push(stack.pop().ok_or_else(|| {
                                Error::SerializationError("Malformed container serialization payload".to_string())
                            })?);
                        }
                        stack.push(if ty == StackItemType::Array {
                            StackItem::Array(items)
                        } else {
                            StackItem::Struct(items)
                        });
                    }
                    StackItemType::Map => {
                        let mut map = BTreeMap::new();
                        for _ in 0..element_count {
                            let key = stack
                                .pop()
                                .ok_or_else(|| Error::SerializationError("Malformed map key payload".to_string()))?;
                            let value = stack
                                .pop()
                                .ok_or_else(|| Error::SerializationError("Malformed map value payload".to_string()))?;
                            map.insert(key, value);
                        }
                        stack.push(StackItem::Map(map));
                    }
                    _ => return Err(Error::SerializationError("Unexpected container placeholder type".to_string())),
                },
            }
        }

        stack
            .pop()
            .ok_or_else(|| Error::SerializationError("Empty serialization payload".to_string()))
    }

    fn validate_container_size(count: usize, max_items: usize) -> Result<()> {
        if count > max_items {
            return Err(Error::SerializationError(
                "Container entry count exceeds maximum stack size".to_string(),
            ));
        }
        Ok(())
    }

    fn track_container(seen: &mut HashSet<usize>, identity: usize) -> Result<()> {
        if !seen.insert(identity) {
            return Err(Error::InvalidOperation(
                "Circular reference detected during serialization".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
enum DeserializedEntry {
    Item(StackItem),
    Placeholder {
        ty: StackItemType,
        element_count: usize,
    },
}

/// Accepts Rust primitives in addition to pre-built stack items.
pub trait IntoStackItem {
    fn into_stack_item(self) -> StackItem;
}

impl IntoStackItem for StackItem {
    fn into_stack_item(self) -> StackItem {
        self
    }
}

impl IntoStackItem for bool {
    fn into_stack_item(self) -> StackItem {
        StackItem::from_bool(self)
    }
}

impl IntoStackItem for i32 {
    fn into_stack_item(self) -> StackItem {
        StackItem::from_int(self)
    }
}

impl IntoStackItem for i64 {
    fn into_stack_item(self) -> StackItem {
        StackItem::from_int(self)
    }
}

impl IntoStackItem for Vec<u8> {
    fn into_stack_item(self) -> StackItem {
        StackItem::from_byte_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_primitive_values() {
        let limits = ExecutionEngineLimits::default();

        let bytes = BinarySerializer::serialize(true, limits.clone()).unwrap();
        assert_eq!(bytes, vec![0x20, 0x01]);

        let bytes = BinarySerializer::serialize(1i32, limits).unwrap();
        assert_eq!(bytes, vec![0x21, 0x01, 0x01]);
    }

    #[test]
    fn round_trips_a_byte_string() {
        let limits = ExecutionEngineLimits::default();
        let original = StackItem::from_byte_string(vec![1, 2, 3]);
        let bytes = BinarySerializer::serialize(original.clone(), limits.clone()).unwrap();
        let restored = BinarySerializer::deserialize(&bytes, limits, None).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn rejects_interop_interfaces() {
        let limits = ExecutionEngineLimits::default();
        let item = StackItem::Array(vec![]);
        let bytes = BinarySerializer::serialize(item, limits).unwrap();
        assert_eq!(bytes, vec![0x40, 0x00]);
    }
}
