//! Bitwise and equality operators: INVERT, AND, OR, XOR, EQUAL, NOTEQUAL.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use num_bigint::BigInt;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::INVERT, invert);
    jump_table.register(OpCode::AND, and);
    jump_table.register(OpCode::OR, or);
    jump_table.register(OpCode::XOR, xor);
    jump_table.register(OpCode::EQUAL, equal);
    jump_table.register(OpCode::NOTEQUAL, not_equal);
}

fn invert(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let value = context.pop()?;
    let result = match value {
        StackItem::Integer(i) => StackItem::from_int(!i),
        StackItem::Boolean(b) => StackItem::from_bool(!b),
        _ => StackItem::from_bool(!value.as_bool()?),
    };
    context.push(result)
}

/// Shared implementation for AND/OR/XOR: integers combine bitwise, booleans
/// combine logically, byte strings are reinterpreted as integers first.
fn binary_bitwise(
    engine: &mut ExecutionEngine,
    name: &str,
    int_op: fn(&BigInt, &BigInt) -> BigInt,
    bool_op: fn(bool, bool) -> bool,
) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let b = context.pop()?;
    let a = context.pop()?;
    let result = match (&a, &b) {
        (StackItem::Integer(x), StackItem::Integer(y)) => StackItem::from_int(int_op(x, y)),
        (StackItem::Boolean(x), StackItem::Boolean(y)) => StackItem::from_bool(bool_op(*x, *y)),
        (StackItem::ByteString(_), StackItem::ByteString(_)) => {
            StackItem::from_int(int_op(&a.as_int()?, &b.as_int()?))
        }
        _ => {
            return Err(VmError::invalid_operation_msg(format!(
                "{name} not supported for types: {:?} and {:?}",
                a.stack_item_type(),
                b.stack_item_type()
            )))
        }
    };
    context.push(result)
}

fn and(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary_bitwise(engine, "AND", |a, b| a & b, |a, b| a && b)
}

fn or(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary_bitwise(engine, "OR", |a, b| a | b, |a, b| a || b)
}

fn xor(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary_bitwise(engine, "XOR", |a, b| a ^ b, |a, b| a != b)
}

fn equal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    if context.evaluation_stack().len() < 2 {
        return Err(VmError::insufficient_stack_items(2, context.evaluation_stack().len()));
    }
    let b = context.pop()?;
    let a = context.pop()?;
    context.push(StackItem::from_bool(a.equals(&b)?))
}

fn not_equal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
    let b = context.pop()?;
    let a = context.pop()?;
    context.push(StackItem::from_bool(!a.equals(&b)?))
}
