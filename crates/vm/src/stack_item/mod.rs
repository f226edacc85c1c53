//! Stack item module for the Neo Virtual Machine.
//!
//! This module provides the stack item types used in the Neo VM.

pub mod stack_item; // allow module inception for clarity of type name
pub mod stack_item_type;

pub use stack_item::InteropInterface;
pub use stack_item::StackItem;
pub use stack_item_type::StackItemType;
