//! Executable script bytes: raw bytecode plus the opcode boundary table used
//! to validate jump targets before execution.

use crate::error::{VmError, VmResult};
use crate::op_code::OpCode;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Script {
    bytes: Arc<[u8]>,
    /// Byte offset of each decoded instruction's start, in order.
    instruction_offsets: Vec<usize>,
}

impl Script {
    /// Builds a script, optionally strict-checking that it decodes into
    /// well-formed instructions with no truncated operands.
    pub fn new(bytes: Vec<u8>, strict_check: bool) -> VmResult<Self> {
        let instruction_offsets = Self::scan_offsets(&bytes)?;
        if strict_check && instruction_offsets.is_empty() && !bytes.is_empty() {
            return Err(VmError::invalid_script("script failed to decode"));
        }
        Ok(Self { bytes: bytes.into(), instruction_offsets })
    }

    fn scan_offsets(bytes: &[u8]) -> VmResult<Vec<usize>> {
        let mut offsets = Vec::new();
        let mut pos = 0usize;
        while pos < bytes.len() {
            offsets.push(pos);
            let Some(opcode) = OpCode::from_byte(bytes[pos]) else {
                return Ok(Vec::new());
            };
            let info = opcode.operand_size_info();
            let prefix = info.size_prefix();
            let operand_size = if prefix == 0 {
                info.size()
            } else {
                let len_start = pos + 1;
                let len_end = len_start + prefix;
                if len_end > bytes.len() {
                    return Ok(Vec::new());
                }
                let length = match prefix {
                    1 => bytes[len_start] as usize,
                    2 => u16::from_le_bytes([bytes[len_start], bytes[len_start + 1]]) as usize,
                    4 => u32::from_le_bytes([
                        bytes[len_start],
                        bytes[len_start + 1],
                        bytes[len_start + 2],
                        bytes[len_start + 3],
                    ]) as usize,
                    _ => return Ok(Vec::new()),
                };
                prefix + length
            };
            pos += 1 + operand_size;
            if pos > bytes.len() {
                return Ok(Vec::new());
            }
        }
        Ok(offsets)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether `position` is the start of a decoded instruction.
    pub fn is_instruction_boundary(&self, position: usize) -> bool {
        self.instruction_offsets.binary_search(&position).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_has_no_offsets() {
        let script = Script::new(vec![], true).unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn push1_add_decodes_into_three_instructions() {
        let script = Script::new(vec![0x11, 0x12, 0x9E], false).unwrap();
        assert!(script.is_instruction_boundary(0));
        assert!(script.is_instruction_boundary(1));
        assert!(script.is_instruction_boundary(2));
    }
}
