//! Opcode dispatch table: maps each of the 256 possible opcode bytes to the
//! function that implements it.

pub mod bitwise;
pub mod compound;
pub mod control;
pub mod crypto;
pub mod numeric;
pub mod push;
pub mod slot;
pub mod splice;
pub mod stack;
pub mod types;

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::{ExecutionEngine, VMState};
use crate::instruction::Instruction;
use crate::op_code::OpCode;
use once_cell::sync::Lazy;

pub type InstructionHandler = fn(&mut ExecutionEngine, &Instruction) -> VmResult<()>;

#[derive(Clone)]
pub struct JumpTable {
    handlers: [Option<InstructionHandler>; 256],
}

static DEFAULT: Lazy<JumpTable> = Lazy::new(JumpTable::new);

impl Default for JumpTable {
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl JumpTable {
    pub fn new() -> Self {
        let mut table = Self { handlers: [None; 256] };
        bitwise::register_handlers(&mut table);
        compound::register_handlers(&mut table);
        control::register_handlers(&mut table);
        crypto::register_handlers(&mut table);
        numeric::register_handlers(&mut table);
        push::register_handlers(&mut table);
        slot::register_handlers(&mut table);
        splice::register_handlers(&mut table);
        stack::register_handlers(&mut table);
        types::register_handlers(&mut table);
        table
    }

    pub fn register(&mut self, opcode: OpCode, handler: InstructionHandler) {
        self.handlers[opcode as usize] = Some(handler);
    }

    pub fn get(&self, opcode: OpCode) -> Option<InstructionHandler> {
        self.handlers[opcode as usize]
    }

    pub fn execute(&self, engine: &mut ExecutionEngine, instruction: &Instruction) -> VmResult<()> {
        match self.get(instruction.opcode()) {
            Some(handler) => handler(engine, instruction),
            None => self.invalid_opcode(instruction),
        }
    }

    fn invalid_opcode(&self, instruction: &Instruction) -> VmResult<()> {
        Err(VmError::unsupported_operation_msg(format!(
            "unsupported opcode: {:?}",
            instruction.opcode()
        )))
    }

    /// Raises `message` as an uncaught VM exception, faulting the engine if
    /// no enclosing try/catch handles it.
    pub fn execute_throw(&self, engine: &mut ExecutionEngine, message: &str) -> VmResult<()> {
        let exception = crate::stack_item::StackItem::from_byte_string(message.as_bytes().to_vec());
        engine.set_uncaught_exception(Some(exception));
        if !engine.handle_exception() {
            engine.set_state(VMState::FAULT);
        }
        Ok(())
    }
}

impl std::ops::Index<OpCode> for JumpTable {
    type Output = InstructionHandler;

    fn index(&self, opcode: OpCode) -> &Self::Output {
        self.handlers[opcode as usize].as_ref().expect("unregistered opcode")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_decodable_opcode_has_a_handler() {
        let table = JumpTable::new();
        for opcode in OpCode::iter() {
            assert!(table.get(opcode).is_some(), "no handler for {opcode:?}");
        }
    }

    #[test]
    fn custom_handler_overrides_default() {
        fn custom(_engine: &mut ExecutionEngine, _instr: &Instruction) -> VmResult<()> {
            Ok(())
        }
        let mut table = JumpTable::new();
        table.register(OpCode::NOP, custom);
        assert_eq!(table.get(OpCode::NOP).unwrap() as usize, custom as usize);
    }
}
