// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction module for Neo blockchain transactions, broken into logical
//! components:
//!
//! - `core` - the `Transaction` struct and basic operations
//! - `attributes` - transaction attributes (HighPriority, Oracle, etc.)
//! - `serialization` - binary encode/decode

pub mod attributes;
pub mod core;
pub mod serialization;

// Re-export main types for convenience
pub use attributes::*;
pub use core::*;

// Re-export constants
pub use core::{HEADER_SIZE, MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE};
