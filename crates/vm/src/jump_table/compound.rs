//! Compound-type operators: arrays, structs and maps (construction, indexing,
//! packing/unpacking and bulk operations).

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::NEWARRAY0, new_array0);
    jump_table.register(OpCode::NEWARRAY, new_array);
    jump_table.register(OpCode::NEWARRAY_T, new_array_t);
    jump_table.register(OpCode::NEWSTRUCT0, new_struct0);
    jump_table.register(OpCode::NEWSTRUCT, new_struct);
    jump_table.register(OpCode::NEWMAP, new_map);
    jump_table.register(OpCode::APPEND, append);
    jump_table.register(OpCode::REVERSEITEMS, reverse);
    jump_table.register(OpCode::REMOVE, remove);
    jump_table.register(OpCode::CLEARITEMS, clear_items);
    jump_table.register(OpCode::POPITEM, pop_item);
    jump_table.register(OpCode::HASKEY, has_key);
    jump_table.register(OpCode::KEYS, keys);
    jump_table.register(OpCode::VALUES, values);
    jump_table.register(OpCode::PACKMAP, pack_map);
    jump_table.register(OpCode::PACKSTRUCT, pack_struct);
    jump_table.register(OpCode::PACK, pack);
    jump_table.register(OpCode::UNPACK, unpack);
    jump_table.register(OpCode::PICKITEM, pick_item);
    jump_table.register(OpCode::SETITEM, set_item);
    jump_table.register(OpCode::SIZE, size);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn pop_count(context: &mut ExecutionContext) -> VmResult<usize> {
    context.pop()?.as_int()?.to_usize().ok_or_else(|| VmError::invalid_operation_msg("invalid count"))
}

/// Resolves a stack item as an in-bounds index into a collection of `len` items.
fn index_of(key: &StackItem, len: usize) -> VmResult<usize> {
    let index =
        key.as_int()?.to_usize().ok_or_else(|| VmError::invalid_operation_msg("invalid index"))?;
    if index >= len {
        return Err(VmError::invalid_operation_msg(format!("index out of range: {index}")));
    }
    Ok(index)
}

fn new_array0(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::from_array(Vec::new()))
}

fn new_array(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    ctx.push(StackItem::from_array(vec![StackItem::Null; count]))
}

fn new_array_t(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    let type_byte = instruction
        .operand()
        .first()
        .copied()
        .ok_or_else(|| VmError::invalid_instruction_msg("Missing type operand"))?;
    let default_value = match type_byte {
        0x00 => StackItem::Boolean(false),
        0x01 => StackItem::Integer(BigInt::from(0)),
        0x02 => StackItem::ByteString(Vec::new()),
        0x03 => StackItem::Buffer(Vec::new()),
        0x04 => StackItem::Array(Vec::new()),
        0x05 => StackItem::Struct(Vec::new()),
        0x06 => StackItem::Map(BTreeMap::new()),
        _ => return Err(VmError::invalid_instruction_msg(format!("Invalid type: {type_byte}"))),
    };
    ctx.push(StackItem::from_array(vec![default_value; count]))
}

fn new_struct0(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::from_struct(Vec::new()))
}

fn new_struct(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    ctx.push(StackItem::from_struct(vec![StackItem::Null; count]))
}

fn new_map(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::from_map(BTreeMap::new()))
}

fn append(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let item = ctx.pop()?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            items.push(item);
            ctx.push(StackItem::from_array(items))
        }
        StackItem::Struct(mut items) => {
            items.push(item);
            ctx.push(StackItem::from_struct(items))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array or Struct")),
    }
}

fn reverse(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            items.reverse();
            ctx.push(StackItem::from_array(items))
        }
        StackItem::Struct(mut items) => {
            items.reverse();
            ctx.push(StackItem::from_struct(items))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array or Struct")),
    }
}

fn remove(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let key = ctx.pop()?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            let index = index_of(&key, items.len())?;
            items.remove(index);
            ctx.push(StackItem::from_array(items))
        }
        StackItem::Struct(mut items) => {
            let index = index_of(&key, items.len())?;
            items.remove(index);
            ctx.push(StackItem::from_struct(items))
        }
        StackItem::Map(mut items) => {
            items.remove(&key);
            ctx.push(StackItem::from_map(items))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array, Struct, or Map")),
    }
}

fn clear_items(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            items.clear();
            ctx.push(StackItem::from_array(items))
        }
        StackItem::Struct(mut items) => {
            items.clear();
            ctx.push(StackItem::from_struct(items))
        }
        StackItem::Map(mut items) => {
            items.clear();
            ctx.push(StackItem::from_map(items))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array, Struct, or Map")),
    }
}

fn pop_item(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            let popped = items.pop().ok_or_else(|| VmError::invalid_operation_msg("Cannot pop from empty array"))?;
            ctx.push(StackItem::from_array(items))?;
            ctx.push(popped)
        }
        StackItem::Struct(mut items) => {
            let popped = items.pop().ok_or_else(|| VmError::invalid_operation_msg("Cannot pop from empty struct"))?;
            ctx.push(StackItem::from_struct(items))?;
            ctx.push(popped)
        }
        _ => Err(VmError::invalid_type_simple("Expected Array or Struct")),
    }
}

fn has_key(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let key = ctx.pop()?;
    let result = match ctx.pop()? {
        StackItem::Array(items) => index_of(&key, items.len()).is_ok(),
        StackItem::Struct(items) => index_of(&key, items.len()).is_ok(),
        StackItem::Map(items) => items.contains_key(&key),
        _ => return Err(VmError::invalid_type_simple("Expected Array, Struct, or Map")),
    };
    ctx.push(StackItem::from_bool(result))
}

fn keys(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Map(items) => ctx.push(StackItem::from_array(items.keys().cloned().collect())),
        _ => Err(VmError::invalid_type_simple("Expected Map")),
    }
}

fn values(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Map(items) => ctx.push(StackItem::from_array(items.values().cloned().collect())),
        _ => Err(VmError::invalid_type_simple("Expected Map")),
    }
}

fn pack_map(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    let mut map = BTreeMap::new();
    for _ in 0..count {
        let value = ctx.pop()?;
        let key = ctx.pop()?;
        map.insert(key, value);
    }
    ctx.push(StackItem::from_map(map))
}

fn pack_struct(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(ctx.pop()?);
    }
    items.reverse();
    ctx.push(StackItem::from_struct(items))
}

fn pack(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let count = pop_count(ctx)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(ctx.pop()?);
    }
    items.reverse();
    ctx.push(StackItem::from_array(items))
}

fn unpack(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    match ctx.pop()? {
        StackItem::Array(items) | StackItem::Struct(items) => {
            for item in items.iter() {
                ctx.push(item.clone())?;
            }
            ctx.push(StackItem::from_int(items.len()))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array or Struct")),
    }
}

fn pick_item(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let key = ctx.pop()?;
    let result = match ctx.pop()? {
        StackItem::Array(items) => items[index_of(&key, items.len())?].clone(),
        StackItem::Struct(items) => items[index_of(&key, items.len())?].clone(),
        StackItem::Map(items) => items
            .get(&key)
            .cloned()
            .ok_or_else(|| VmError::invalid_operation_msg(format!("Key not found: {key:?}")))?,
        _ => return Err(VmError::invalid_type_simple("Expected Array, Struct, or Map")),
    };
    ctx.push(result)
}

fn set_item(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let value = ctx.pop()?;
    let key = ctx.pop()?;
    match ctx.pop()? {
        StackItem::Array(mut items) => {
            let index = index_of(&key, items.len())?;
            items[index] = value;
            ctx.push(StackItem::from_array(items))
        }
        StackItem::Struct(mut items) => {
            let index = index_of(&key, items.len())?;
            items[index] = value;
            ctx.push(StackItem::from_struct(items))
        }
        StackItem::Map(mut items) => {
            items.insert(key, value);
            ctx.push(StackItem::from_map(items))
        }
        _ => Err(VmError::invalid_type_simple("Expected Array, Struct, or Map")),
    }
}

fn size(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let size = match ctx.pop()? {
        StackItem::Array(items) => items.len(),
        StackItem::Struct(items) => items.len(),
        StackItem::Map(items) => items.len(),
        StackItem::ByteString(data) => data.len(),
        StackItem::Buffer(data) => data.len(),
        _ => return Err(VmError::invalid_type_simple("Expected Array, Struct, Map, ByteString, or Buffer")),
    };
    ctx.push(StackItem::from_int(size))
}
