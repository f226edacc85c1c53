//! Script builder module for the Neo Virtual Machine.
//!
//! This module provides a way to programmatically construct scripts for the Neo VM.

use crate::op_code::OpCode;
use crate::script::Script;
use std::convert::TryFrom;

/// Helps construct VM scripts programmatically.
pub struct ScriptBuilder {
    /// The script being built
    script: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates a new script builder.
    pub fn new() -> Self {
        Self {
            script: Vec::new(),
        }
    }

    /// Emits a single byte to the script.
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    /// Emits an opcode to the script.
    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Emits raw bytes to the script.
    pub fn emit_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    /// Emits a push operation with the given data.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();

        if len <= 0x75 {
            // For small data (1-75 bytes), use direct push opcodes
            self.emit(len as u8);
            self.script.extend_from_slice(data);
        } else if len <= 0xFF {
            // PUSHDATA1
            self.emit_opcode(OpCode::PUSHDATA1);
            self.emit(len as u8);
            self.script.extend_from_slice(data);
        } else if len <= 0xFFFF {
            // PUSHDATA2
            self.emit_opcode(OpCode::PUSHDATA2);
            self.emit((len & 0xFF) as u8);
            self.emit((len >> 8) as u8);
            self.script.extend_from_slice(data);
        } else {
            // PUSHDATA4
            self.emit_opcode(OpCode::PUSHDATA4);
            self.emit((len & 0xFF) as u8);
            self.emit(((len >> 8) & 0xFF) as u8);
            self.emit(((len >> 16) & 0xFF) as u8);
            self.emit(((len >> 24) & 0xFF) as u8);
            self.script.extend_from_slice(data);
        }

        self
    }

    /// Emits a push operation for an integer.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        // Handle special cases for small integers
        if value == -1 {
            return self.emit_opcode(OpCode::PUSHM1);
        }
        if value >= 0 && value <= 16 {
            let opcode_value = OpCode::PUSH0 as u8 + (value as u8);
            self.emit(opcode_value);
            return self;
        }

        // For larger integers, encode as bytes
        let mut bytes = Vec::new();
        let mut v = value;

        // Convert to little-endian byte representation
        while v != 0 && v != -1 {
            bytes.push((v & 0xFF) as u8);
            v >>= 8;
        }

        // Handle sign bit
        if v == -1 && (bytes.last().unwrap_or(&0) & 0x80) == 0 {
            bytes.push(0xFF);
        } else if v == 0 && !bytes.is_empty() && (bytes.last().unwrap() & 0x80) != 0 {
            bytes.push(0x00);
        }

        self.emit_push(&bytes)
    }

    /// Emits a push operation for a boolean.
    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.emit_opcode(OpCode::PUSH1)
        } else {
            self.emit_opcode(OpCode::PUSH0)
        }
    }

    /// Emits a push operation for a byte array.
    pub fn emit_push_byte_array(&mut self, data: &[u8]) -> &mut Self {
        self.emit_push(data)
    }

    /// Emits a push operation for a string.
    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push(value.as_bytes())
    }

    /// Emits a push operation for raw bytes.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.emit_push(data)
    }

    /// Emits a push operation for a stack item.
    pub fn emit_push_stack_item(
        &mut self,
        item: crate::stack_item::StackItem,
    ) -> crate::VmResult<&mut Self> {
        use crate::stack_item::StackItem;

        match item {
            StackItem::Null => {
                self.emit_opcode(OpCode::PUSHNULL);
            }
            StackItem::Boolean(b) => {
                self.emit_push_bool(b);
            }
            StackItem::Integer(i) => {
                // Convert BigInt to i64 for emission
                use num_traits::ToPrimitive;
                if let Some(value) = i.to_i64() {
                    self.emit_push_int(value);
                } else {
                    // For very large integers, convert to bytes
                    let bytes = i.to_bytes_le().1;
                    self.emit_push(&bytes);
                }
            }
            StackItem::ByteString(bytes) | StackItem::Buffer(bytes) => {
                self.emit_push(&bytes);
            }
            StackItem::Array(items) | StackItem::Struct(items) => {
                // Push items in reverse order, then pack
                let items_len = items.len();
                for item in items.into_iter().rev() {
                    self.emit_push_stack_item(item)?;
                }
                self.emit_push_int(items_len as i64);
                self.emit_pack();
            }
            StackItem::Map(map) => {
                self.emit_push_int(map.len() as i64);
                self.emit_opcode(OpCode::NEWMAP);

                for (key, value) in map {
                    self.emit_opcode(OpCode::DUP);
                    self.emit_push_stack_item(key)?;
                    self.emit_push_stack_item(value)?;
                    self.emit_opcode(OpCode::SETITEM);
                }
            }
            StackItem::Pointer(addr) => {
                self.emit_push_int(addr as i64);
            }
            StackItem::InteropInterface(_) => {
                return Err(crate::VmError::invalid_operation_msg(
                    "Cannot serialize InteropInterface to script",
                ));
            }
        }
        
        Ok(self)
    }

    /// Emits a jump operation.
    pub fn emit_jump(&mut self, op: OpCode, offset: i16) -> &mut Self {
        if op != OpCode::JMP && op != OpCode::JMPIF && op != OpCode::JMPIFNOT && op != OpCode::CALL {
            panic!("Invalid jump operation");
        }

        self.emit_opcode(op);

        // Emit offset as little-endian
        self.emit((offset & 0xFF) as u8);
        self.emit(((offset >> 8) & 0xFF) as u8);

        self
    }

    /// Emits a call operation.
    pub fn emit_call(&mut self, offset: i16) -> &mut Self {
        self.emit_jump(OpCode::CALL, offset)
    }

    /// Emits a syscall operation.
    pub fn emit_syscall(&mut self, api: &str) -> &mut Self {
        let api_bytes = api.as_bytes();
        let api_bytes_len = api_bytes.len();

        if api_bytes_len > 252 {
            panic!("Syscall api is too long");
        }

        self.emit_opcode(OpCode::SYSCALL);
        self.emit(api_bytes_len as u8);
        self.script.extend_from_slice(api_bytes);

        self
    }

    /// Emits an append operation.
    pub fn emit_append(&mut self) -> &mut Self {
        self.emit_opcode(OpCode::APPEND)
    }

    /// Emits a pack operation.
    pub fn emit_pack(&mut self) -> &mut Self {
        self.emit_opcode(OpCode::PACK)
    }

    /// Converts the builder to a script, skipping the strict decode check
    /// (relaxed construction never fails).
    pub fn to_script(&self) -> Script {
        Script::new(self.script.clone(), false).expect("relaxed script construction never fails")
    }

    /// Converts the builder to a byte array.
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
