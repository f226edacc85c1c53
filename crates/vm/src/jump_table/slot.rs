//! Local variable, argument and static field slots: INITSLOT/INITSSLOT plus
//! the LDLOC/STLOC/LDARG/STARG/LDSFLD/STSFLD load-store families.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_context::{ExecutionContext, Slot};
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::INITSSLOT, init_static_slot);
    jump_table.register(OpCode::INITSLOT, init_slot);

    jump_table.register(OpCode::LDSFLD0, load_static_field_0);
    jump_table.register(OpCode::LDSFLD1, load_static_field_1);
    jump_table.register(OpCode::LDSFLD2, load_static_field_2);
    jump_table.register(OpCode::LDSFLD3, load_static_field_3);
    jump_table.register(OpCode::LDSFLD4, load_static_field_4);
    jump_table.register(OpCode::LDSFLD5, load_static_field_5);
    jump_table.register(OpCode::LDSFLD6, load_static_field_6);
    jump_table.register(OpCode::LDSFLD, load_static_field);
    jump_table.register(OpCode::STSFLD0, store_static_field_0);
    jump_table.register(OpCode::STSFLD1, store_static_field_1);
    jump_table.register(OpCode::STSFLD2, store_static_field_2);
    jump_table.register(OpCode::STSFLD3, store_static_field_3);
    jump_table.register(OpCode::STSFLD4, store_static_field_4);
    jump_table.register(OpCode::STSFLD5, store_static_field_5);
    jump_table.register(OpCode::STSFLD6, store_static_field_6);
    jump_table.register(OpCode::STSFLD, store_static_field);

    jump_table.register(OpCode::LDLOC0, load_local_0);
    jump_table.register(OpCode::LDLOC1, load_local_1);
    jump_table.register(OpCode::LDLOC2, load_local_2);
    jump_table.register(OpCode::LDLOC3, load_local_3);
    jump_table.register(OpCode::LDLOC4, load_local_4);
    jump_table.register(OpCode::LDLOC5, load_local_5);
    jump_table.register(OpCode::LDLOC6, load_local_6);
    jump_table.register(OpCode::LDLOC, load_local);
    jump_table.register(OpCode::STLOC0, store_local_0);
    jump_table.register(OpCode::STLOC1, store_local_1);
    jump_table.register(OpCode::STLOC2, store_local_2);
    jump_table.register(OpCode::STLOC3, store_local_3);
    jump_table.register(OpCode::STLOC4, store_local_4);
    jump_table.register(OpCode::STLOC5, store_local_5);
    jump_table.register(OpCode::STLOC6, store_local_6);
    jump_table.register(OpCode::STLOC, store_local);

    jump_table.register(OpCode::LDARG0, load_argument_0);
    jump_table.register(OpCode::LDARG1, load_argument_1);
    jump_table.register(OpCode::LDARG2, load_argument_2);
    jump_table.register(OpCode::LDARG3, load_argument_3);
    jump_table.register(OpCode::LDARG4, load_argument_4);
    jump_table.register(OpCode::LDARG5, load_argument_5);
    jump_table.register(OpCode::LDARG6, load_argument_6);
    jump_table.register(OpCode::LDARG, load_argument);
    jump_table.register(OpCode::STARG0, store_argument_0);
    jump_table.register(OpCode::STARG1, store_argument_1);
    jump_table.register(OpCode::STARG2, store_argument_2);
    jump_table.register(OpCode::STARG3, store_argument_3);
    jump_table.register(OpCode::STARG4, store_argument_4);
    jump_table.register(OpCode::STARG5, store_argument_5);
    jump_table.register(OpCode::STARG6, store_argument_6);
    jump_table.register(OpCode::STARG, store_argument);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn operand_index(instruction: &Instruction) -> VmResult<usize> {
    instruction.operand().first().copied().map(|b| b as usize).ok_or_else(|| VmError::invalid_instruction_msg("Missing index"))
}

/// Allocates a slot of `count` nulls sharing the context's reference counter.
fn new_slot(context: &ExecutionContext, count: usize) -> Slot {
    Slot::new(vec![StackItem::null(); count], context.evaluation_stack().reference_counter().clone())
}

fn init_slot(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let context = context(engine)?;
    if context.local_variables().is_some() || context.arguments().is_some() {
        return Err(VmError::invalid_operation_msg("INITSLOT cannot be executed twice"));
    }
    let local_count = *instruction.operand().first().ok_or_else(|| VmError::invalid_instruction_msg("Missing local count"))? as usize;
    let argument_count = instruction.operand().get(1).copied().ok_or_else(|| VmError::invalid_instruction_msg("Missing argument count"))? as usize;
    if local_count == 0 && argument_count == 0 {
        return Err(VmError::invalid_operation_msg("The operand is invalid for OpCode.INITSLOT"));
    }

    if local_count > 0 {
        context.set_local_variables(Some(new_slot(context, local_count)));
    }
    if argument_count > 0 {
        let mut arg_items = Vec::with_capacity(argument_count);
        for _ in 0..argument_count {
            arg_items.push(context.pop()?);
        }
        let reference_counter = context.evaluation_stack().reference_counter().clone();
        context.set_arguments(Some(Slot::new(arg_items, reference_counter)));
    }
    Ok(())
}

fn init_static_slot(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let context = context(engine)?;
    if context.static_fields().is_some() {
        return Err(VmError::invalid_operation_msg("INITSSLOT cannot be executed twice"));
    }
    let static_count = *instruction.operand().first().ok_or_else(|| VmError::invalid_instruction_msg("Missing static count"))? as usize;
    if static_count > 0 {
        context.set_static_fields(Some(new_slot(context, static_count)));
    }
    Ok(())
}

fn load_static_field(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.load_static_field(index)?;
    context.push(value)
}

fn store_static_field(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.pop()?;
    context.store_static_field(index, value)
}

fn load_local(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.load_local(index)?;
    context.push(value)
}

fn store_local(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.pop()?;
    context.store_local(index, value)
}

fn load_argument(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.load_argument(index)?;
    context.push(value)
}

fn store_argument(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let index = operand_index(instruction)?;
    let context = context(engine)?;
    let value = context.pop()?;
    context.store_argument(index, value)
}

macro_rules! fixed_index_ops {
    ($(($n:literal, $load_fn:ident, $store_fn:ident, $load:ident, $store:ident)),* $(,)?) => {
        $(
            fn $load_fn(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
                let context = context(engine)?;
                let value = context.$load($n)?;
                context.push(value)
            }

            fn $store_fn(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
                let context = context(engine)?;
                let value = context.pop()?;
                context.$store($n, value)
            }
        )*
    };
}

fixed_index_ops!(
    (0, load_static_field_0, store_static_field_0, load_static_field, store_static_field),
    (1, load_static_field_1, store_static_field_1, load_static_field, store_static_field),
    (2, load_static_field_2, store_static_field_2, load_static_field, store_static_field),
    (3, load_static_field_3, store_static_field_3, load_static_field, store_static_field),
    (4, load_static_field_4, store_static_field_4, load_static_field, store_static_field),
    (5, load_static_field_5, store_static_field_5, load_static_field, store_static_field),
    (6, load_static_field_6, store_static_field_6, load_static_field, store_static_field),
    (0, load_local_0, store_local_0, load_local, store_local),
    (1, load_local_1, store_local_1, load_local, store_local),
    (2, load_local_2, store_local_2, load_local, store_local),
    (3, load_local_3, store_local_3, load_local, store_local),
    (4, load_local_4, store_local_4, load_local, store_local),
    (5, load_local_5, store_local_5, load_local, store_local),
    (6, load_local_6, store_local_6, load_local, store_local),
    (0, load_argument_0, store_argument_0, load_argument, store_argument),
    (1, load_argument_1, store_argument_1, load_argument, store_argument),
    (2, load_argument_2, store_argument_2, load_argument, store_argument),
    (3, load_argument_3, store_argument_3, load_argument, store_argument),
    (4, load_argument_4, store_argument_4, load_argument, store_argument),
    (5, load_argument_5, store_argument_5, load_argument, store_argument),
    (6, load_argument_6, store_argument_6, load_argument, store_argument),
);
