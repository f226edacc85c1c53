//! Neo N3 has no bitcode-level cryptographic opcodes: signature checks
//! (`System.Crypto.CheckSig`, `CheckMultisig`) are interop services invoked
//! through [`OpCode::SYSCALL`], not entries in this jump table.

use crate::jump_table::JumpTable;

pub fn register_handlers(_jump_table: &mut JumpTable) {}
