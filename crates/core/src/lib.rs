// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # Neo Core
//!
//! Primitive types and cross-cutting concerns shared by every other crate in
//! the node: fixed-size hashes, transaction/witness data structures, hardfork
//! identifiers, and the [`NodeContext`] dependency-injection container that
//! replaces process-global state.

// Module declarations
pub mod big_decimal;
pub mod binary_writer;
pub mod block;
pub mod builders;
pub mod constants;
pub mod events;
pub mod extensions;
pub mod hardfork;
pub mod node_context;
pub mod shutdown;
pub mod signer;
pub mod transaction;
pub mod transaction_type;
pub mod uint160;
pub mod uint256;
pub mod witness;
pub mod witness_rule;
pub mod witness_scope;

// Re-exports
pub use big_decimal::BigDecimal;
pub use block::{Block, BlockHeader};
pub use hardfork::Hardfork;
pub use node_context::{
    BlockchainTrait, ConsensusTrait, MempoolTrait, NetworkTrait, NodeContext, ProtocolSettings,
};
pub use shutdown::{Shutdown, ShutdownCoordinator, ShutdownError, ShutdownEvent, ShutdownStage, SignalHandler};
pub use signer::Signer;
pub use transaction::{
    Transaction, TransactionAttribute, TransactionAttributeType, OracleResponseCode,
    HEADER_SIZE, MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE,
};
pub use transaction_type::ContainsTransactionType;
pub use uint160::UInt160;
pub use uint256::UInt256;
pub use witness::Witness;
pub use witness_rule::{WitnessCondition, WitnessConditionType, WitnessRule, WitnessRuleAction};
pub use witness_scope::WitnessScope;

/// Trait implemented by objects that can be hashed and verified (blocks,
/// transactions, and anything else signed by a witness).
pub trait IVerifiable: std::any::Any {
    /// Verifies the object's witnesses.
    fn verify(&self) -> bool;

    /// Returns the hash identifying this object.
    fn hash(&self) -> CoreResult<UInt256>;

    /// Returns the serialized data that gets signed.
    fn get_hash_data(&self) -> Vec<u8>;

    fn as_any(&self) -> &dyn std::any::Any;
}

use thiserror::Error;

/// Errors shared across the `neo-core` primitives.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("system error: {0}")]
    SystemError(String),

    #[error("insufficient gas")]
    InsufficientGas,

    #[error("cryptographic error: {0}")]
    CryptographicError(String),
}

/// Result type for `neo-core` operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl From<neo_io::Error> for CoreError {
    fn from(error: neo_io::Error) -> Self {
        match error {
            neo_io::Error::EndOfStream => {
                CoreError::InvalidData("unexpected end of stream".to_string())
            }
            neo_io::Error::InvalidData(msg) => CoreError::InvalidData(msg),
            neo_io::Error::FormatException => {
                CoreError::InvalidFormat("format exception".to_string())
            }
            neo_io::Error::Deserialization(msg) => CoreError::SerializationError(msg),
            neo_io::Error::InvalidOperation(msg) => CoreError::InvalidOperation(msg),
            neo_io::Error::Io(msg) => CoreError::SystemError(msg),
            neo_io::Error::Serialization(msg) => CoreError::SerializationError(msg),
            neo_io::Error::InvalidFormat(msg) => CoreError::InvalidFormat(msg),
            neo_io::Error::BufferOverflow => CoreError::InvalidData("buffer overflow".to_string()),
        }
    }
}
