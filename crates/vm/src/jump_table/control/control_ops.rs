//! Basic control flow: unconditional/conditional jumps, calls, and RET.

use crate::{
    error::{VmError, VmResult},
    execution_engine::ExecutionEngine,
    execution_context::ExecutionContext,
    instruction::Instruction,
    stack_item::StackItem,
};
use num_traits::ToPrimitive;

pub fn nop(_engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    Ok(())
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn pop_two(engine: &mut ExecutionEngine) -> VmResult<(StackItem, StackItem)> {
    let ctx = context(engine)?;
    let b = ctx.pop()?;
    let a = ctx.pop()?;
    Ok((a, b))
}

/// Moves the current context's instruction pointer by `offset`, relative to
/// the jump opcode's own position, and marks the engine as mid-jump.
fn jump(engine: &mut ExecutionEngine, offset: i32) -> VmResult<()> {
    let context = context(engine)?;
    let new_ip = context.instruction_pointer() as i32 + offset;
    if new_ip < 0 || new_ip > context.script().len() as i32 {
        return Err(VmError::invalid_operation_msg(format!("Jump out of bounds: {new_ip}")));
    }
    context.set_instruction_pointer(new_ip as usize);
    engine.is_jumping = true;
    Ok(())
}

fn jump_if(engine: &mut ExecutionEngine, offset: i32, condition: bool) -> VmResult<()> {
    if condition {
        jump(engine, offset)
    } else {
        Ok(())
    }
}

pub fn jmp(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    jump(engine, instruction.read_i16_operand()? as i32)
}

pub fn jmp_l(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    jump(engine, instruction.read_i32_operand()?)
}

fn pop_bool(engine: &mut ExecutionEngine) -> VmResult<bool> {
    context(engine)?.pop()?.as_bool()
}

fn cond_if(engine: &mut ExecutionEngine) -> VmResult<bool> {
    pop_bool(engine)
}

fn cond_ifnot(engine: &mut ExecutionEngine) -> VmResult<bool> {
    Ok(!pop_bool(engine)?)
}

fn cond_eq(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    a.equals(&b)
}

fn cond_ne(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    Ok(!a.equals(&b)?)
}

fn cond_gt(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    Ok(a.as_int()? > b.as_int()?)
}

fn cond_ge(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    Ok(a.as_int()? >= b.as_int()?)
}

fn cond_lt(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    Ok(a.as_int()? < b.as_int()?)
}

fn cond_le(engine: &mut ExecutionEngine) -> VmResult<bool> {
    let (a, b) = pop_two(engine)?;
    Ok(a.as_int()? <= b.as_int()?)
}

macro_rules! conditional_jumps {
    ($(($short:ident, $long:ident, $cond:ident)),* $(,)?) => {
        $(
            pub fn $short(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
                let condition = $cond(engine)?;
                jump_if(engine, instruction.read_i16_operand()? as i32, condition)
            }

            pub fn $long(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
                let condition = $cond(engine)?;
                jump_if(engine, instruction.read_i32_operand()?, condition)
            }
        )*
    };
}

conditional_jumps!(
    (jmpif, jmpif_l, cond_if),
    (jmpifnot, jmpifnot_l, cond_ifnot),
    (jmpeq, jmpeq_l, cond_eq),
    (jmpne, jmpne_l, cond_ne),
    (jmpgt, jmpgt_l, cond_gt),
    (jmpge, jmpge_l, cond_ge),
    (jmplt, jmplt_l, cond_lt),
    (jmple, jmple_l, cond_le),
);

fn call_at(engine: &mut ExecutionEngine, target: usize) -> VmResult<()> {
    let context = context(engine)?;
    let script = context.script().clone();
    let new_context = engine.create_context(script, -1, target);
    engine.load_context(new_context)?;
    engine.is_jumping = true;
    Ok(())
}

fn call_offset(engine: &mut ExecutionEngine, offset: i32) -> VmResult<()> {
    let context = context(engine)?;
    let target = context.instruction_pointer() as i32 + offset;
    if target < 0 || target > context.script().len() as i32 {
        return Err(VmError::invalid_operation_msg(format!("Call target out of bounds: {target}")));
    }
    call_at(engine, target as usize)
}

pub fn call(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    call_offset(engine, instruction.read_i16_operand()? as i32)
}

pub fn call_l(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    call_offset(engine, instruction.read_i32_operand()?)
}

fn pop_call_target(engine: &mut ExecutionEngine) -> VmResult<usize> {
    context(engine)?
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid call target"))
}

pub fn calla(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let target = pop_call_target(engine)?;
    call_at(engine, target)
}

pub fn callt(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let target = pop_call_target(engine)?;
    call_at(engine, target)
}

pub fn ret(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let (rvcount, items_to_copy) = {
        let context = engine.current_context().ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;
        let rvcount = context.rvcount();
        let stack_size = context.evaluation_stack().len();

        let count = if rvcount == -1 {
            stack_size
        } else if rvcount > 0 {
            let rvcount = rvcount as usize;
            if rvcount > stack_size {
                return Err(VmError::invalid_operation_msg(format!(
                    "Not enough items on stack for return: {rvcount} > {stack_size}"
                )));
            }
            rvcount
        } else {
            0
        };

        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            items.push(context.evaluation_stack().peek(i as isize)?.clone());
        }
        items.reverse();
        (rvcount, items)
    };

    if rvcount != 0 && !items_to_copy.is_empty() {
        let result_stack = engine.result_stack_mut();
        for item in items_to_copy {
            result_stack.push(item);
        }
    }

    let context_index = engine.invocation_stack().len() - 1;
    engine.remove_context(context_index)?;
    engine.is_jumping = true;

    Ok(())
}
