//! Exception handling for the Neo Virtual Machine.
//!
//! This module provides exception handling functionality for the Neo VM.

use crate::stack_item::StackItem;

/// Indicates the state of the ExceptionHandlingContext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExceptionHandlingState {
    /// No exception handling state (initial state).
    None,

    /// Indicates that the try block is being executed.
    Try,

    /// Indicates that the catch block is being executed.
    Catch,

    /// Indicates that the finally block is being executed.
    Finally,
}

/// Represents one entry on a context's try-block stack: where its catch and
/// finally handlers live, and what state it's currently in.
#[derive(Debug, Clone)]
pub struct ExceptionHandlingContext {
    /// The position of the catch block, or -1 if there isn't one.
    catch_pointer: i32,

    /// The position of the finally block, or -1 if there isn't one.
    finally_pointer: i32,

    /// The position right after the try-catch-finally block.
    end_pointer: i32,

    /// The current state of exception handling.
    state: ExceptionHandlingState,

    /// The exception being handled, if any.
    exception: Option<StackItem>,
}

impl ExceptionHandlingContext {
    /// Creates a new exception handling context.
    pub fn new(catch_pointer: i32, finally_pointer: i32) -> Self {
        Self {
            catch_pointer,
            finally_pointer,
            end_pointer: -1,
            state: ExceptionHandlingState::Try,
            exception: None,
        }
    }

    /// Checks if the context has a catch block.
    pub fn has_catch(&self) -> bool {
        self.catch_pointer >= 0
    }

    /// Checks if the context has a finally block.
    pub fn has_finally(&self) -> bool {
        self.finally_pointer >= 0
    }

    /// Gets the current state of exception handling.
    pub fn state(&self) -> ExceptionHandlingState {
        self.state
    }

    /// Gets the exception being handled.
    pub fn exception(&self) -> Option<&StackItem> {
        self.exception.as_ref()
    }

    /// Sets the exception being handled.
    pub fn set_exception(&mut self, exception: Option<StackItem>) {
        self.exception = exception;
    }

    /// Gets the catch pointer.
    pub fn catch_pointer(&self) -> i32 {
        self.catch_pointer
    }

    /// Gets the finally pointer.
    pub fn finally_pointer(&self) -> i32 {
        self.finally_pointer
    }

    /// Gets the end pointer.
    pub fn end_pointer(&self) -> i32 {
        self.end_pointer
    }

    /// Sets the end pointer.
    pub fn set_end_pointer(&mut self, end_pointer: i32) {
        self.end_pointer = end_pointer;
    }

    /// Sets the state.
    pub fn set_state(&mut self, state: ExceptionHandlingState) {
        self.state = state;
    }

    /// Checks if this exception handling context is currently in an exception state.
    pub fn is_in_exception(&self) -> bool {
        matches!(
            self.state,
            ExceptionHandlingState::Catch | ExceptionHandlingState::Finally
        ) || self.exception.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_handling_context_creation() {
        let context = ExceptionHandlingContext::new(30, 40);

        assert_eq!(context.catch_pointer(), 30);
        assert_eq!(context.finally_pointer(), 40);
        assert_eq!(context.end_pointer(), -1);
        assert_eq!(context.state(), ExceptionHandlingState::Try);
        assert!(context.exception().is_none());
    }

    #[test]
    fn test_exception_handling_context_state() {
        let mut context = ExceptionHandlingContext::new(30, 40);

        context.set_state(ExceptionHandlingState::Catch);
        assert_eq!(context.state(), ExceptionHandlingState::Catch);

        context.set_state(ExceptionHandlingState::Finally);
        assert_eq!(context.state(), ExceptionHandlingState::Finally);

        context.set_state(ExceptionHandlingState::Try);
        assert_eq!(context.state(), ExceptionHandlingState::Try);
    }

    #[test]
    fn test_exception_handling_context_exception() {
        let mut context = ExceptionHandlingContext::new(30, 40);

        let exception = StackItem::from_byte_string("Test exception".as_bytes().to_vec());
        context.set_exception(Some(exception.clone()));

        assert!(context.exception().is_some());
        assert_eq!(
            context.exception().unwrap().as_bytes().unwrap(),
            exception.as_bytes().unwrap()
        );

        context.set_exception(None);
        assert!(context.exception().is_none());
    }

    #[test]
    fn test_exception_handling_context_end_pointer() {
        let mut context = ExceptionHandlingContext::new(30, 40);

        assert_eq!(context.end_pointer(), -1);

        context.set_end_pointer(50);
        assert_eq!(context.end_pointer(), 50);
    }

    #[test]
    fn test_exception_handling_context_has_catch_finally() {
        let context = ExceptionHandlingContext::new(30, 40);
        assert!(context.has_catch());
        assert!(context.has_finally());

        let context = ExceptionHandlingContext::new(30, -1);
        assert!(context.has_catch());
        assert!(!context.has_finally());

        let context = ExceptionHandlingContext::new(-1, 40);
        assert!(!context.has_catch());
        assert!(context.has_finally());

        let context = ExceptionHandlingContext::new(-1, -1);
        assert!(!context.has_catch());
        assert!(!context.has_finally());
    }
}
