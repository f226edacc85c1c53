//! Type introspection and conversion: CONVERT, ISTYPE, ISNULL.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::stack_item_type::StackItemType;
use crate::stack_item::StackItem;

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::CONVERT, convert);
    jump_table.register(OpCode::ISTYPE, is_type);
    jump_table.register(OpCode::ISNULL, is_null);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut crate::execution_context::ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn target_type(instruction: &Instruction) -> VmResult<StackItemType> {
    let byte = instruction.operand().first().copied().ok_or_else(|| VmError::invalid_instruction_msg("Missing type operand"))?;
    StackItemType::from_byte(byte).ok_or_else(|| VmError::invalid_instruction_msg(format!("Invalid type: {byte}")))
}

fn convert(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let item_type = target_type(instruction)?;
    let item = context(engine)?.pop()?;

    let result = match (item, item_type) {
        (item, StackItemType::Boolean) => StackItem::from_bool(item.as_bool()?),
        (item, StackItemType::Integer) => StackItem::from_int(item.as_int()?),
        (item, StackItemType::ByteString) => StackItem::from_byte_string(item.as_bytes()?),
        (item, StackItemType::Buffer) => StackItem::from_buffer(item.as_bytes()?),
        (StackItem::Array(items), StackItemType::Array) | (StackItem::Struct(items), StackItemType::Array) => {
            StackItem::from_array(items)
        }
        (StackItem::Array(items), StackItemType::Struct) | (StackItem::Struct(items), StackItemType::Struct) => {
            StackItem::from_struct(items)
        }
        (StackItem::Map(items), StackItemType::Map) => StackItem::from_map(items),
        (StackItem::Pointer(position), StackItemType::Pointer) => StackItem::from_pointer(position),
        (StackItem::InteropInterface(interface), StackItemType::InteropInterface) => {
            StackItem::InteropInterface(interface)
        }
        (item, target_type) => {
            return Err(VmError::invalid_type_simple(format!(
                "Cannot convert {:?} to {target_type:?}",
                item.stack_item_type()
            )));
        }
    };

    context(engine)?.push(result)
}

/// Implements ISTYPE: a strict type-tag equality check, not a coercion test.
fn is_type(engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
    let item_type = target_type(instruction)?;
    let ctx = context(engine)?;
    let actual = ctx.peek(0)?.stack_item_type();
    ctx.push(StackItem::from_bool(actual == item_type))
}

fn is_null(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let result = matches!(ctx.peek(0)?, StackItem::Null);
    ctx.push(StackItem::from_bool(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn engine() -> ExecutionEngine {
        let mut engine = ExecutionEngine::new(None);
        engine.load_script(Script::new(vec![], false).unwrap(), -1, 0).unwrap();
        engine
    }

    #[test]
    fn convert_integer_to_byte_string_and_back() {
        let mut engine = engine();
        context(&mut engine).unwrap().push(StackItem::from_int(258)).unwrap();
        convert(&mut engine, &Instruction::new(OpCode::CONVERT, &[StackItemType::ByteString as u8])).unwrap();
        let item = context(&mut engine).unwrap().pop().unwrap();
        assert!(matches!(item, StackItem::ByteString(_)));
    }

    #[test]
    fn istype_checks_the_exact_runtime_type() {
        let mut engine = engine();
        context(&mut engine).unwrap().push(StackItem::from_int(1)).unwrap();
        is_type(&mut engine, &Instruction::new(OpCode::ISTYPE, &[StackItemType::ByteString as u8])).unwrap();
        assert!(!context(&mut engine).unwrap().pop().unwrap().as_bool().unwrap());

        context(&mut engine).unwrap().push(StackItem::from_int(1)).unwrap();
        is_type(&mut engine, &Instruction::new(OpCode::ISTYPE, &[StackItemType::Integer as u8])).unwrap();
        assert!(context(&mut engine).unwrap().pop().unwrap().as_bool().unwrap());
    }

    #[test]
    fn isnull_detects_the_null_item() {
        let mut engine = engine();
        context(&mut engine).unwrap().push(StackItem::Null).unwrap();
        is_null(&mut engine, &Instruction::ret()).unwrap();
        assert!(context(&mut engine).unwrap().pop().unwrap().as_bool().unwrap());
    }
}
