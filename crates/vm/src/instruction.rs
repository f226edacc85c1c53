//! Decoded VM instructions: an opcode plus its operand bytes.

use crate::error::{VmError, VmResult};
use crate::op_code::OpCode;

/// A single decoded instruction: the opcode at `pointer` plus its operand bytes.
///
/// For length-prefixed opcodes (`PUSHDATA1/2/4`, `SYSCALL`) `operand` holds the
/// prefix bytes followed by the payload; [`Instruction::size`] accounts for this
/// when computing the instruction's total width in the script.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub pointer: usize,
    pub opcode: OpCode,
    pub operand: Vec<u8>,
}

impl Instruction {
    /// Decodes the instruction starting at `position` in `script`.
    pub fn parse(script: &[u8], position: usize) -> VmResult<Self> {
        let mut reader = neo_io::MemoryReader::new(script);
        reader.set_position(position)?;
        Self::parse_from_reader(&mut reader)
    }

    /// Decodes the next instruction from `reader`.
    pub fn parse_from_reader(reader: &mut neo_io::MemoryReader) -> VmResult<Self> {
        let pointer = reader.position();
        if pointer >= reader.len() {
            return Err(VmError::parse("position out of bounds"));
        }

        let raw_opcode = reader.read_byte()?;
        let opcode = OpCode::from_byte(raw_opcode)
            .ok_or_else(|| VmError::parse(format!("invalid opcode: {raw_opcode}")))?;

        let operand = match opcode {
            OpCode::SYSCALL => Self::read_length_prefixed(reader, 1, "SYSCALL")?,
            OpCode::PUSHDATA1 => Self::read_length_prefixed(reader, 1, "PUSHDATA1")?,
            OpCode::PUSHDATA2 => Self::read_length_prefixed(reader, 2, "PUSHDATA2")?,
            OpCode::PUSHDATA4 => Self::read_length_prefixed(reader, 4, "PUSHDATA4")?,
            _ => {
                let size = opcode.operand_size_info().size();
                if size > 0 {
                    reader.read_bytes(size)?
                } else {
                    Vec::new()
                }
            }
        };

        Ok(Self { pointer, opcode, operand })
    }

    /// Reads a length-prefixed operand (prefix width `prefix_width` bytes), returning
    /// the prefix bytes followed by the payload bytes.
    fn read_length_prefixed(
        reader: &mut neo_io::MemoryReader,
        prefix_width: usize,
        name: &str,
    ) -> VmResult<Vec<u8>> {
        let prefix_bytes = reader
            .read_bytes(prefix_width)
            .map_err(|_| VmError::parse(format!("{name} missing length prefix")))?;
        let length = match prefix_width {
            1 => prefix_bytes[0] as usize,
            2 => u16::from_le_bytes([prefix_bytes[0], prefix_bytes[1]]) as usize,
            4 => u32::from_le_bytes([
                prefix_bytes[0],
                prefix_bytes[1],
                prefix_bytes[2],
                prefix_bytes[3],
            ]) as usize,
            _ => unreachable!("prefix width is always 1, 2 or 4"),
        };

        let mut operand = prefix_bytes;
        if length > 0 {
            let payload = reader
                .read_bytes(length)
                .map_err(|_| VmError::parse(format!("{name} operand exceeds script bounds")))?;
            operand.extend_from_slice(&payload);
        }
        Ok(operand)
    }

    /// Builds an instruction directly from an opcode and operand, for tests and
    /// programmatic script construction.
    pub fn new(opcode: OpCode, operand: &[u8]) -> Self {
        Self { pointer: 0, opcode, operand: operand.to_vec() }
    }

    /// Builds a bare `RET` instruction.
    pub fn ret() -> Self {
        Self::new(OpCode::RET, &[])
    }

    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn operand(&self) -> &[u8] {
        &self.operand
    }

    pub fn operand_data(&self) -> &[u8] {
        &self.operand
    }

    pub fn operand_as<T: FromOperand>(&self) -> VmResult<T> {
        T::from_operand(&self.operand)
    }

    pub fn read_i8_operand(&self) -> VmResult<i8> {
        self.operand_as::<i8>()
    }

    pub fn read_u8_operand(&self) -> VmResult<u8> {
        self.operand_as::<u8>()
    }

    pub fn read_i16_operand(&self) -> VmResult<i16> {
        self.operand_as::<i16>()
    }

    pub fn read_i32_operand(&self) -> VmResult<i32> {
        self.operand_as::<i32>()
    }

    pub fn read_i64_operand(&self) -> VmResult<i64> {
        self.operand_as::<i64>()
    }

    /// Total size of the instruction in bytes, as it appears in the script.
    pub fn size(&self) -> usize {
        match self.opcode {
            OpCode::PUSHDATA1 if !self.operand.is_empty() => 1 + 1 + self.operand[0] as usize,
            OpCode::PUSHDATA2 if self.operand.len() >= 2 => {
                1 + 2 + u16::from_le_bytes([self.operand[0], self.operand[1]]) as usize
            }
            OpCode::PUSHDATA4 if self.operand.len() >= 4 => {
                let length = u32::from_le_bytes([
                    self.operand[0],
                    self.operand[1],
                    self.operand[2],
                    self.operand[3],
                ]) as usize;
                1 + 4 + length
            }
            _ => 1 + self.operand.len(),
        }
    }

    /// Returns the interop method name for a `SYSCALL` instruction.
    pub fn syscall_name(&self) -> VmResult<String> {
        if self.opcode != OpCode::SYSCALL {
            return Err(VmError::invalid_operation_msg("not a SYSCALL instruction"));
        }
        let length = *self
            .operand
            .first()
            .ok_or_else(|| VmError::invalid_operand_msg("empty operand for SYSCALL"))? as usize;
        if length == 0 || self.operand.len() < length + 1 {
            return Err(VmError::invalid_operand_msg("invalid syscall name length"));
        }
        String::from_utf8(self.operand[1..length + 1].to_vec())
            .map_err(|_| VmError::invalid_operand_msg("invalid UTF-8 in syscall name"))
    }
}

/// Decodes a fixed-size operand from its little-endian byte encoding.
pub trait FromOperand: Sized {
    fn from_operand(operand: &[u8]) -> VmResult<Self>;
}

macro_rules! impl_from_operand {
    ($ty:ty, $size:expr) => {
        impl FromOperand for $ty {
            fn from_operand(operand: &[u8]) -> VmResult<Self> {
                let bytes: [u8; $size] = operand.get(..$size).and_then(|s| s.try_into().ok()).ok_or_else(|| {
                    VmError::invalid_operand_msg(format!(
                        "operand too small for {}",
                        stringify!($ty)
                    ))
                })?;
                Ok(<$ty>::from_le_bytes(bytes))
            }
        }
    };
}

impl_from_operand!(i8, 1);
impl_from_operand!(u8, 1);
impl_from_operand!(i16, 2);
impl_from_operand!(u16, 2);
impl_from_operand!(i32, 4);
impl_from_operand!(u32, 4);
impl_from_operand!(i64, 8);
impl_from_operand!(u64, 8);
