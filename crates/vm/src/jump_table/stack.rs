//! Stack manipulation operations: DUP, SWAP, ROT, PICK, ROLL, and friends.

use crate::error::VmError;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use crate::VmResult;
use num_traits::ToPrimitive;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::DEPTH, depth);
    jump_table.register(OpCode::DROP, drop_top);
    jump_table.register(OpCode::NIP, nip);
    jump_table.register(OpCode::XDROP, xdrop);
    jump_table.register(OpCode::CLEAR, clear);
    jump_table.register(OpCode::DUP, dup);
    jump_table.register(OpCode::OVER, over);
    jump_table.register(OpCode::PICK, pick);
    jump_table.register(OpCode::TUCK, tuck);
    jump_table.register(OpCode::SWAP, swap);
    jump_table.register(OpCode::ROT, rot);
    jump_table.register(OpCode::ROLL, roll);
    jump_table.register(OpCode::REVERSE3, reverse3);
    jump_table.register(OpCode::REVERSE4, reverse4);
    jump_table.register(OpCode::REVERSEN, reverse_n);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut crate::execution_context::ExecutionContext> {
    engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("no current context"))
}

fn depth(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let n = ctx.evaluation_stack().len() as i64;
    ctx.push(StackItem::from_int(n))
}

fn drop_top(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    context(engine)?.pop().map(|_| ())
}

fn nip(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    ctx.evaluation_stack_mut().remove(1)?;
    Ok(())
}

fn xdrop(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let n = ctx
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("invalid XDROP index"))?;
    ctx.evaluation_stack_mut().remove(n)?;
    Ok(())
}

fn clear(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    context(engine)?.evaluation_stack_mut().clear();
    Ok(())
}

fn dup(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let top = ctx.evaluation_stack().peek(0)?.clone();
    ctx.push(top)
}

fn over(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let item = ctx.evaluation_stack().peek(1)?.clone();
    ctx.push(item)
}

fn pick(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let n = ctx
        .pop()?
        .as_int()?
        .to_isize()
        .ok_or_else(|| VmError::invalid_operation_msg("invalid PICK index"))?;
    let item = ctx.evaluation_stack().peek(n)?.clone();
    ctx.push(item)
}

fn tuck(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let top = ctx.evaluation_stack().peek(0)?.clone();
    ctx.evaluation_stack_mut().insert(2, top)?;
    Ok(())
}

fn swap(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let len = ctx.evaluation_stack().len();
    ctx.evaluation_stack_mut().swap(len - 1, len - 2)?;
    Ok(())
}

fn rot(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let len = ctx.evaluation_stack().len();
    ctx.evaluation_stack_mut().swap(len - 1, len - 3)?;
    ctx.evaluation_stack_mut().swap(len - 1, len - 2)?;
    Ok(())
}

fn roll(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let n = ctx
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("invalid ROLL index"))?;
    if n > 0 {
        let len = ctx.evaluation_stack().len();
        let item = ctx.evaluation_stack_mut().remove(len - 1 - n)?;
        ctx.push(item)?;
    }
    Ok(())
}

fn reverse3(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    context(engine)?.evaluation_stack_mut().reverse(3)
}

fn reverse4(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    context(engine)?.evaluation_stack_mut().reverse(4)
}

fn reverse_n(engine: &mut ExecutionEngine, _i: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let n = ctx
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("invalid REVERSEN count"))?;
    if n > 1 {
        ctx.evaluation_stack_mut().reverse(n)?;
    }
    Ok(())
}
