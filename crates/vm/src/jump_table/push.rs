//! PUSH* operators: small integer/boolean literals, raw integer and
//! length-prefixed data pushes, and pointer literals (PUSHA).

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use neo_config::HASH_SIZE;
use num_bigint::BigInt;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::PUSHINT8, push_int8);
    jump_table.register(OpCode::PUSHINT16, push_int16);
    jump_table.register(OpCode::PUSHINT32, push_int32);
    jump_table.register(OpCode::PUSHINT64, push_int64);
    jump_table.register(OpCode::PUSHINT128, push_int128);
    jump_table.register(OpCode::PUSHINT256, push_int256);
    jump_table.register(OpCode::PUSHA, push_a);
    jump_table.register(OpCode::PUSHNULL, push_null);
    jump_table.register(OpCode::PUSHDATA1, push_data1);
    jump_table.register(OpCode::PUSHDATA2, push_data2);
    jump_table.register(OpCode::PUSHDATA4, push_data4);
    jump_table.register(OpCode::PUSHM1, push_m1);
    jump_table.register(OpCode::PUSH0, push_0);
    jump_table.register(OpCode::PUSH1, push_1);
    jump_table.register(OpCode::PUSH2, push_2);
    jump_table.register(OpCode::PUSH3, push_3);
    jump_table.register(OpCode::PUSH4, push_4);
    jump_table.register(OpCode::PUSH5, push_5);
    jump_table.register(OpCode::PUSH6, push_6);
    jump_table.register(OpCode::PUSH7, push_7);
    jump_table.register(OpCode::PUSH8, push_8);
    jump_table.register(OpCode::PUSH9, push_9);
    jump_table.register(OpCode::PUSH10, push_10);
    jump_table.register(OpCode::PUSH11, push_11);
    jump_table.register(OpCode::PUSH12, push_12);
    jump_table.register(OpCode::PUSH13, push_13);
    jump_table.register(OpCode::PUSH14, push_14);
    jump_table.register(OpCode::PUSH15, push_15);
    jump_table.register(OpCode::PUSH16, push_16);
    jump_table.register(OpCode::PUSHT, push_t);
    jump_table.register(OpCode::PUSHF, push_f);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn push_literal<T: Into<BigInt>>(engine: &mut ExecutionEngine, value: T) -> VmResult<()> {
    context(engine)?.push(StackItem::from_int(value))
}

fn push_int8(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, instruction.read_i8_operand()?)
}

fn push_int16(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, instruction.read_i16_operand()?)
}

fn push_int32(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, instruction.read_i32_operand()?)
}

fn push_int64(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, instruction.read_i64_operand()?)
}

fn push_wide_int(engine: &mut ExecutionEngine, instruction: &Instruction, expected: usize, name: &str) -> VmResult<()> {
    let bytes = instruction.operand();
    if bytes.len() != expected {
        return Err(VmError::invalid_instruction_msg(format!(
            "Expected {expected} bytes for {name}, got {}",
            bytes.len()
        )));
    }
    push_literal(engine, BigInt::from_signed_bytes_le(bytes))
}

fn push_int128(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_wide_int(engine, instruction, 16, "PUSHINT128")
}

fn push_int256(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_wide_int(engine, instruction, HASH_SIZE, "PUSHINT256")
}

fn push_a(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let offset = instruction.read_i32_operand()?;
    let ctx = context(engine)?;
    let address = ctx.instruction_pointer() as i32 + offset;
    let script_len = ctx.script().len();
    if address < 0 || address > script_len as i32 {
        return Err(VmError::invalid_operation_msg(format!("Address out of bounds: {address}")));
    }
    ctx.push(StackItem::from_pointer(address as usize))
}

fn push_null(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::Null)
}

/// Shared implementation for PUSHDATA1/2/4: `prefix_width` bytes already
/// consumed at decode time, so `instruction.operand()` is prefix + payload.
fn push_data(engine: &mut ExecutionEngine, instruction: &Instruction, prefix_width: usize) -> VmResult<()> {
    let operand = instruction.operand();
    let data = operand.get(prefix_width..).unwrap_or(&[]);
    context(engine)?.push(StackItem::from_byte_string(data.to_vec()))
}

fn push_data1(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_data(engine, instruction, 1)
}

fn push_data2(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_data(engine, instruction, 2)
}

fn push_data4(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    push_data(engine, instruction, 4)
}

fn push_m1(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, -1)
}

fn push_0(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 0)
}

fn push_1(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 1)
}

fn push_2(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 2)
}

fn push_3(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 3)
}

fn push_4(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 4)
}

fn push_5(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 5)
}

fn push_6(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 6)
}

fn push_7(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 7)
}

fn push_8(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 8)
}

fn push_9(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 9)
}

fn push_10(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 10)
}

fn push_11(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 11)
}

fn push_12(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 12)
}

fn push_13(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 13)
}

fn push_14(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 14)
}

fn push_15(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 15)
}

fn push_16(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    push_literal(engine, 16)
}

fn push_t(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::from_bool(true))
}

fn push_f(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    context(engine)?.push(StackItem::from_bool(false))
}
