//! TRY/CATCH/FINALLY and THROW/ABORT/ASSERT opcodes.

use crate::error::{VmError, VmResult};
use crate::exception_handling::{ExceptionHandlingContext, ExceptionHandlingState};
use crate::execution_engine::{ExecutionEngine, VMState};
use crate::execution_context::ExecutionContext;
use crate::instruction::Instruction;
use crate::stack_item::StackItem;

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn read_i8_pair(operand: &[u8]) -> VmResult<(i32, i32)> {
    if operand.len() < 2 {
        return Err(VmError::invalid_operand_msg("TRY expects two signed byte operands"));
    }
    Ok((operand[0] as i8 as i32, operand[1] as i8 as i32))
}

fn read_i32_pair(operand: &[u8]) -> VmResult<(i32, i32)> {
    if operand.len() < 8 {
        return Err(VmError::invalid_operand_msg("TRY_L expects two 32-bit signed operands"));
    }
    let catch = i32::from_le_bytes([operand[0], operand[1], operand[2], operand[3]]);
    let finally = i32::from_le_bytes([operand[4], operand[5], operand[6], operand[7]]);
    Ok((catch, finally))
}

pub fn try_op(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let (catch_offset, finally_offset) = read_i8_pair(instruction.operand())?;
    execute_try(engine, catch_offset, finally_offset)
}

pub fn try_l(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let (catch_offset, finally_offset) = read_i32_pair(instruction.operand())?;
    execute_try(engine, catch_offset, finally_offset)
}

pub fn endtry(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let operand = instruction.operand();
    let offset = operand.first().copied().ok_or_else(|| VmError::invalid_operand_msg("ENDTRY expects a signed byte operand"))? as i8 as i32;
    execute_end_try(engine, offset)
}

pub fn endtry_l(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let operand = instruction.operand();
    if operand.len() < 4 {
        return Err(VmError::invalid_operand_msg("ENDTRY_L expects a 32-bit signed operand"));
    }
    let offset = i32::from_le_bytes([operand[0], operand[1], operand[2], operand[3]]);
    execute_end_try(engine, offset)
}

pub fn endfinally(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let handler = {
        let try_stack = context(engine)?
            .try_stack_mut()
            .ok_or_else(|| VmError::invalid_operation_msg("The corresponding TRY block cannot be found."))?;
        try_stack.pop().ok_or_else(|| VmError::invalid_operation_msg("The corresponding TRY block cannot be found."))?
    };

    if engine.uncaught_exception().is_some() {
        let pending = engine.uncaught_exception().cloned().expect("uncaught exception must be present");
        return execute_throw(engine, Some(pending));
    }

    if handler.end_pointer() < 0 {
        return Err(VmError::invalid_operation_msg("ENDTRY was not executed before ENDFINALLY"));
    }
    let target = handler.end_pointer() as usize;
    context(engine)?.set_instruction_pointer(target);
    engine.is_jumping = true;
    Ok(())
}

pub fn throw(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let exception = engine.pop()?;
    execute_throw(engine, Some(exception))
}

/// Propagates an uncaught exception originating from within the runtime.
pub fn throw_uncaught(engine: &mut ExecutionEngine, exception: StackItem) -> VmResult<()> {
    execute_throw(engine, Some(exception))
}

pub fn abort(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    engine.set_state(VMState::FAULT);
    Err(VmError::execution_halted_msg("Execution aborted"))
}

pub fn assert(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    if !engine.pop()?.as_bool()? {
        engine.set_state(VMState::FAULT);
        return Err(VmError::execution_halted_msg("ASSERT executed with false result"));
    }
    Ok(())
}

fn compute_relative_pointer(base: usize, offset: i32, script_len: usize) -> VmResult<i32> {
    let destination = base as i64 + offset as i64;
    if destination < 0 || destination > script_len as i64 {
        return Err(VmError::invalid_operation_msg("Jump offset points outside of the script"));
    }
    Ok(destination as i32)
}

fn execute_try(engine: &mut ExecutionEngine, catch_offset: i32, finally_offset: i32) -> VmResult<()> {
    if catch_offset == 0 && finally_offset == 0 {
        return Err(VmError::invalid_operation_msg("TRY requires either a catch or a finally target"));
    }

    let max_try_depth = engine.limits().max_try_nesting_depth;
    let context = context(engine)?;
    let script_len = context.script().len();
    let base_pointer = context.instruction_pointer();

    let catch_pointer = if catch_offset == 0 { -1 } else { compute_relative_pointer(base_pointer, catch_offset, script_len)? };
    let finally_pointer = if finally_offset == 0 { -1 } else { compute_relative_pointer(base_pointer, finally_offset, script_len)? };

    if context.try_stack_len() as u32 >= max_try_depth {
        return Err(VmError::invalid_operation_msg("MaxTryNestingDepth exceed"));
    }
    context.push_try_context(ExceptionHandlingContext::new(catch_pointer, finally_pointer));
    Ok(())
}

fn execute_end_try(engine: &mut ExecutionEngine, end_offset: i32) -> VmResult<()> {
    let context = context(engine)?;
    let current_index = context.instruction_pointer();
    let script_len = context.script().len();

    let handler = context
        .try_stack_last_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("The corresponding TRY block cannot be found."))?;
    if handler.state() == ExceptionHandlingState::Finally {
        return Err(VmError::invalid_operation_msg("ENDTRY cannot be executed from within a FINALLY block"));
    }

    let end_pointer = compute_relative_pointer(current_index, end_offset, script_len)?;
    let target = if handler.has_finally() {
        handler.set_state(ExceptionHandlingState::Finally);
        handler.set_end_pointer(end_pointer);
        handler.finally_pointer() as usize
    } else {
        context.pop_try_context();
        end_pointer as usize
    };
    context.set_instruction_pointer(target);
    engine.is_jumping = true;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum HandlerAction {
    Catch { context_index: usize, target: i32 },
    Finally { context_index: usize, target: i32 },
}

impl HandlerAction {
    fn context_index(self) -> usize {
        match self {
            HandlerAction::Catch { context_index, .. } | HandlerAction::Finally { context_index, .. } => context_index,
        }
    }
}

/// Walks the invocation stack outward from the top looking for a handler that
/// wants this exception; unwinds intervening frames and jumps into it.
fn execute_throw(engine: &mut ExecutionEngine, exception: Option<StackItem>) -> VmResult<()> {
    if let Some(ex) = exception {
        engine.set_uncaught_exception(Some(ex));
    } else if engine.uncaught_exception().is_none() {
        return Err(VmError::invalid_operation_msg("THROW requires an exception value"));
    }

    let mut index = engine.invocation_stack().len();
    while index > 0 {
        index -= 1;
        let action = find_handler_action(engine, index);

        if let Some(action) = action {
            let pop_count = engine.invocation_stack().len() - 1 - action.context_index();
            for _ in 0..pop_count {
                let top_index = engine.invocation_stack().len() - 1;
                engine.remove_context(top_index)?;
            }

            match action {
                HandlerAction::Catch { target, context_index } => {
                    if let Some(exception) = engine.uncaught_exception().cloned() {
                        engine.push(exception)?;
                    }
                    engine.set_uncaught_exception(None);
                    engine.invocation_stack_mut()[context_index].set_instruction_pointer(target as usize);
                }
                HandlerAction::Finally { target, context_index } => {
                    engine.invocation_stack_mut()[context_index].set_instruction_pointer(target as usize);
                }
            }
            engine.is_jumping = true;
            return Ok(());
        }
    }

    let message = engine.uncaught_exception().map(|item| format!("{item:?}")).unwrap_or_else(|| "<unknown exception>".to_string());
    Err(VmError::execution_halted_msg(format!("Unhandled exception: {message}")))
}

fn find_handler_action(engine: &mut ExecutionEngine, context_index: usize) -> Option<HandlerAction> {
    let stack = engine.invocation_stack_mut();
    let context = &mut stack[context_index];
    let try_stack = context.try_stack_mut()?;

    while let Some(handler) = try_stack.last() {
        let should_pop = handler.state() == ExceptionHandlingState::Finally
            || (handler.state() == ExceptionHandlingState::Catch && !handler.has_finally());
        if should_pop {
            try_stack.pop();
        } else {
            break;
        }
    }

    let handler = try_stack.last_mut()?;
    if handler.state() == ExceptionHandlingState::Try && handler.has_catch() {
        handler.set_state(ExceptionHandlingState::Catch);
        Some(HandlerAction::Catch { context_index, target: handler.catch_pointer() })
    } else if handler.has_finally() {
        handler.set_state(ExceptionHandlingState::Finally);
        Some(HandlerAction::Finally { context_index, target: handler.finally_pointer() })
    } else {
        try_stack.pop();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op_code::OpCode;
    use crate::script::Script;

    fn engine() -> ExecutionEngine {
        let mut engine = ExecutionEngine::new(None);
        engine.load_script(Script::new(vec![0; 20], false).unwrap(), -1, 0).unwrap();
        engine
    }

    #[test]
    fn try_op_pushes_a_handler_with_relative_catch_and_finally_pointers() {
        let mut engine = engine();
        try_op(&mut engine, &Instruction::new(OpCode::TRY, &[5, 10])).unwrap();
        let ctx = engine.current_context_mut().unwrap();
        assert_eq!(ctx.try_stack_len(), 1);
    }

    #[test]
    fn throw_with_no_handler_faults_with_an_unhandled_exception_error() {
        let mut engine = engine();
        let result = throw_uncaught(&mut engine, StackItem::from_int(1));
        assert!(result.is_err());
    }

    #[test]
    fn throw_jumps_to_the_catch_pointer_and_pushes_the_exception() {
        let mut engine = engine();
        try_op(&mut engine, &Instruction::new(OpCode::TRY, &[5, 0])).unwrap();
        throw_uncaught(&mut engine, StackItem::from_int(7)).unwrap();
        assert!(engine.is_jumping);
        let top = context(&mut engine).unwrap().pop().unwrap();
        assert_eq!(top.as_int().unwrap(), num_bigint::BigInt::from(7));
    }
}
