//! Block structure for the Neo blockchain.

use crate::{CoreResult, Transaction, UInt160, UInt256, Witness};
use serde::{Deserialize, Serialize};

/// Block header: everything that is hashed and signed, independent of the
/// transactions it commits to via `merkle_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: u32,
    pub previous_hash: UInt256,
    pub merkle_root: UInt256,
    pub timestamp: u64,
    pub nonce: u64,
    pub index: u32,
    pub primary_index: u8,
    pub next_consensus: UInt160,
    /// Single witness proving the block was signed by the consensus
    /// committee's multi-signature account.
    pub witness: Witness,
}

impl BlockHeader {
    /// The block hash: double-SHA256 over the unsigned header fields.
    pub fn hash(&self) -> CoreResult<UInt256> {
        use sha2::{Digest, Sha256};

        let mut buffer = Vec::new();
        buffer.extend_from_slice(&self.version.to_le_bytes());
        buffer.extend_from_slice(self.previous_hash.as_bytes());
        buffer.extend_from_slice(self.merkle_root.as_bytes());
        buffer.extend_from_slice(&self.timestamp.to_le_bytes());
        buffer.extend_from_slice(&self.nonce.to_le_bytes());
        buffer.extend_from_slice(&self.index.to_le_bytes());
        buffer.push(self.primary_index);
        buffer.extend_from_slice(self.next_consensus.as_bytes());

        let first = Sha256::digest(&buffer);
        let second = Sha256::digest(first);

        UInt256::from_bytes(&second)
            .map_err(|e| crate::CoreError::SerializationError(format!("hash conversion failed: {e}")))
    }
}

/// A block: header plus the transactions it commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn hash(&self) -> CoreResult<UInt256> {
        self.header.hash()
    }

    pub fn index(&self) -> u32 {
        self.header.index
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}
