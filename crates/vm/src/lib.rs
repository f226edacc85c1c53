//! # Neo Virtual Machine (NeoVM)
//!
//! A stack-based virtual machine that executes Neo N3 smart contracts.
//!
//! ## Architecture
//!
//! - **ExecutionEngine**: the execution loop and state machine
//! - **ApplicationEngine**: adds interop services and gas accounting on top
//! - **EvaluationStack** / **ExecutionContext**: per-frame stack and locals
//! - **JumpTable**: opcode decode and dispatch
//! - **StackItem**: the polymorphic value type that flows through the stack
//! - **ScriptBuilder**: programmatic bytecode construction
//!
//! ## Example
//!
//! ```rust,no_run
//! use neo_vm::{ApplicationEngine, Script};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let script = Script::new(vec![0x11, 0x12, 0x9E], false)?; // PUSH1 PUSH2 ADD
//! let mut engine = ApplicationEngine::new();
//! engine.load_script(script, -1, 0)?;
//! engine.execute()?;
//! # Ok(())
//! # }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

extern crate std;

/// High-level VM engine with interop services and gas accounting.
pub mod application_engine;
/// Call permission flags for interop services.
pub mod call_flags;
/// VM error types and result handling.
pub mod error;
/// Type-safe evaluation stack implementation.
pub mod evaluation_stack;
/// Exception handling and try-catch support.
pub mod exception_handling;
/// Script execution context and local variables.
pub mod execution_context;
/// Low-level VM execution engine.
pub mod execution_engine;
/// Resource ceilings enforced during execution.
mod execution_engine_limits;
/// Gas cost tables for opcodes and interop calls.
pub mod gas_calculator;
/// VM instruction representation.
pub mod instruction;
/// Interop service registry and native calls.
pub mod interop_service;
/// OpCode implementation and instruction dispatch.
pub mod jump_table;
/// VM opcode definitions and utilities.
pub mod op_code;
/// Memory management for complex data structures.
pub mod reference_counter;
/// VM script representation and validation.
pub mod script;
/// Utility for constructing VM bytecode.
pub mod script_builder;
/// Slot storage for local variables, arguments and static fields.
pub mod slot;
/// Polymorphic data types for VM values.
pub mod stack_item;
/// VM execution state flags.
mod vm_state;

pub use application_engine::{ApplicationEngine, NotificationEvent, TriggerType};
pub use call_flags::CallFlags;
pub use error::{VmError, VmResult};
pub use evaluation_stack::EvaluationStack;
pub use exception_handling::{ExceptionHandlingContext, ExceptionHandlingState};
pub use execution_context::ExecutionContext;
pub use slot::Slot;
pub use execution_engine::{ExecutionEngine, ExecutionEngineLimits, VMState};
pub use instruction::Instruction;
pub use interop_service::InteropHost;
pub use jump_table::{InstructionHandler, JumpTable};
pub use op_code::{OpCode, OperandSize};
pub use reference_counter::ReferenceCounter;
pub use script::Script;
pub use script_builder::ScriptBuilder;
pub use stack_item::{StackItem, StackItemType};

pub extern crate neo_io;
pub use neo_io as io;
