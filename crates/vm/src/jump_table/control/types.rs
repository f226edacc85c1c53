//! Shared types for the interop-facing control handlers: storage contexts,
//! syscall parameter conversion, and the witness/oracle data that verification
//! reads from the host's script container.

use crate::{call_flags::CallFlags, stack_item::stack_item::InteropInterface, stack_item::StackItem};
use neo_core::UInt256;

/// A handle to a contract's storage area, as seen by `System.Storage.*` syscalls.
#[derive(Debug, Clone)]
pub struct StorageContext {
    pub script_hash: Vec<u8>,
    pub is_read_only: bool,
    pub id: i32,
}

impl InteropInterface for StorageContext {
    fn interface_type(&self) -> &str {
        "StorageContext"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Parameter types a syscall descriptor declares for its arguments and return value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterType {
    Boolean,
    Integer,
    ByteArray,
    String,
    Hash160,
    Array,
    InteropInterface,
    Any,
    Void,
}

/// A syscall argument or return value, converted from/to a [`StackItem`].
#[derive(Debug, Clone)]
pub enum InteropParameter {
    Boolean(bool),
    Integer(i64),
    ByteArray(Vec<u8>),
    String(String),
    Hash160(Vec<u8>),
    Array(Vec<InteropParameter>),
    InteropInterface(StackItem),
    Any(StackItem),
}

/// Static metadata for a single `SYSCALL` target, used to validate call flags,
/// charge the fixed price, and convert stack arguments before dispatch.
#[derive(Debug, Clone)]
pub struct SyscallDescriptor {
    pub name: String,
    pub fixed_price: u64,
    pub required_call_flags: CallFlags,
    pub parameters: Vec<ParameterType>,
    pub return_type: ParameterType,
}

/// The container being verified or executed against: a transaction (most
/// syscalls and witness checks) or a block (only a subset of read-only checks).
#[derive(Debug, Clone)]
pub enum ScriptContainer {
    Transaction(neo_core::Transaction),
    Block(neo_core::Block),
}

/// An Oracle request recorded in the Oracle contract's storage, keyed by
/// request id and resolved back to the transaction that originated it.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub original_txid: UInt256,
    pub gas_for_response: u64,
    pub url: String,
}
