//! Interop host callback used by the execution engine to reach back into its
//! owner (almost always an `ApplicationEngine`) from opcode handlers that only
//! ever see `&mut ExecutionEngine`.
//!
//! The actual syscall registry — method lookup, pricing, parameter
//! conversion, and dispatch — lives in [`crate::jump_table::control`]; it is
//! the one implementation both `ExecutionEngine::execute` and
//! `ApplicationEngine::execute` run through.

use crate::error::VmResult;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;

/// Callbacks an `ExecutionEngine` invokes on whatever owns it, reached through
/// the raw pointer stashed by [`ExecutionEngine::set_interop_host`]. This is
/// how opcode handlers — which only ever see `&mut ExecutionEngine` — let an
/// owning [`ApplicationEngine`](crate::application_engine::ApplicationEngine)
/// track gas, notifications, and context lifecycle without a generic engine
/// parameter threaded through every handler.
pub trait InteropHost {
    /// Runs before an instruction executes.
    fn pre_execute_instruction(
        &mut self,
        _engine: &mut ExecutionEngine,
        _context: &ExecutionContext,
        _instruction: &Instruction,
    ) -> VmResult<()> {
        Ok(())
    }

    /// Runs after an instruction executes.
    fn post_execute_instruction(
        &mut self,
        _engine: &mut ExecutionEngine,
        _context: &ExecutionContext,
        _instruction: &Instruction,
    ) -> VmResult<()> {
        Ok(())
    }

    /// Runs after a new context is pushed onto the invocation stack.
    fn on_context_loaded(
        &mut self,
        _engine: &mut ExecutionEngine,
        _context: &ExecutionContext,
    ) -> VmResult<()> {
        Ok(())
    }

    /// Runs after a context is popped off the invocation stack.
    fn on_context_unloaded(
        &mut self,
        _engine: &mut ExecutionEngine,
        _context: &mut ExecutionContext,
    ) -> VmResult<()> {
        Ok(())
    }

    /// Downcasting hook so opcode handlers can recover the concrete host
    /// (almost always an `ApplicationEngine`) to reach its blockchain-facing
    /// state (script container, storage, notifications).
    fn as_any(&self) -> &dyn std::any::Any;

    /// Mutable counterpart of [`InteropHost::as_any`].
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
