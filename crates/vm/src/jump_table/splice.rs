//! Byte-string/buffer operators: NEWBUFFER, MEMCPY, CAT, SUBSTR, LEFT, RIGHT.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use num_traits::ToPrimitive;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::NEWBUFFER, new_buffer);
    jump_table.register(OpCode::MEMCPY, memcpy);
    jump_table.register(OpCode::CAT, cat);
    jump_table.register(OpCode::SUBSTR, substr);
    jump_table.register(OpCode::LEFT, left);
    jump_table.register(OpCode::RIGHT, right);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut crate::execution_context::ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn pop_usize(engine: &mut ExecutionEngine, what: &str) -> VmResult<usize> {
    context(engine)?
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg(format!("Invalid {what}")))
}

/// Extracts the byte content of a `ByteString`/`Buffer`, remembering which it was.
fn bytes_of(item: StackItem) -> VmResult<(Vec<u8>, bool)> {
    match item {
        StackItem::ByteString(data) => Ok((data, false)),
        StackItem::Buffer(data) => Ok((data, true)),
        _ => Err(VmError::invalid_type_simple("Expected ByteString or Buffer")),
    }
}

fn wrap(data: Vec<u8>, is_buffer: bool) -> StackItem {
    if is_buffer {
        StackItem::from_buffer(data)
    } else {
        StackItem::from_byte_string(data)
    }
}

fn new_buffer(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let size = pop_usize(engine, "buffer size")?;
    context(engine)?.push(StackItem::from_buffer(vec![0; size]))
}

fn memcpy(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let count = pop_usize(engine, "count")?;
    let src_offset = pop_usize(engine, "source offset")?;
    let dst_offset = pop_usize(engine, "destination offset")?;
    let ctx = context(engine)?;
    let src = ctx.pop()?;
    let dst = ctx.pop()?;

    let (src_data, _) = bytes_of(src)?;
    if src_offset + count > src_data.len() {
        return Err(VmError::invalid_operation_msg(format!(
            "Source out of bounds: {src_offset} + {count} > {}",
            src_data.len()
        )));
    }

    let StackItem::Buffer(mut data) = dst else {
        return Err(VmError::invalid_type_simple("Expected Buffer for destination"));
    };
    if dst_offset + count > data.len() {
        return Err(VmError::invalid_operation_msg(format!(
            "Destination out of bounds: {dst_offset} + {count} > {}",
            data.len()
        )));
    }
    data[dst_offset..dst_offset + count].copy_from_slice(&src_data[src_offset..src_offset + count]);
    context(engine)?.push(StackItem::from_buffer(data))
}

fn cat(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = ctx.pop()?;
    let a = ctx.pop()?;
    let (mut a_bytes, a_is_buffer) = bytes_of(a)?;
    let (b_bytes, b_is_buffer) = bytes_of(b)?;
    a_bytes.extend_from_slice(&b_bytes);
    context(engine)?.push(wrap(a_bytes, a_is_buffer || b_is_buffer))
}

fn substr(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let count = pop_usize(engine, "count")?;
    let offset = pop_usize(engine, "offset")?;
    let value = context(engine)?.pop()?;
    let (data, is_buffer) = bytes_of(value)?;
    if offset + count > data.len() {
        return Err(VmError::invalid_operation_msg(format!(
            "Substring out of bounds: {offset} + {count} > {}",
            data.len()
        )));
    }
    context(engine)?.push(wrap(data[offset..offset + count].to_vec(), is_buffer))
}

fn left(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let count = pop_usize(engine, "count")?;
    let value = context(engine)?.pop()?;
    let (data, is_buffer) = bytes_of(value)?;
    if count > data.len() {
        return Err(VmError::invalid_operation_msg(format!("Left out of bounds: {count} > {}", data.len())));
    }
    context(engine)?.push(wrap(data[..count].to_vec(), is_buffer))
}

fn right(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let count = pop_usize(engine, "count")?;
    let value = context(engine)?.pop()?;
    let (data, is_buffer) = bytes_of(value)?;
    if count > data.len() {
        return Err(VmError::invalid_operation_msg(format!("Right out of bounds: {count} > {}", data.len())));
    }
    context(engine)?.push(wrap(data[data.len() - count..].to_vec(), is_buffer))
}
