// Copyright (C) 2015-2025 The Neo Project.
//
// node_context.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Explicit dependency-injection context for a running node.
//!
//! Every component that needs access to the blockchain, mempool, network or
//! consensus state receives a `NodeContext` at construction instead of
//! reaching into a process-global singleton. This keeps independent node
//! instances (e.g. in tests) from interfering with one another.

use crate::hardfork::Hardfork;
use crate::transaction_type::ContainsTransactionType;
use crate::uint160::UInt160;
use crate::uint256::UInt256;
use crate::CoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Read-only view of the ledger a node is tracking.
///
/// Implementations typically wrap an actor-style blockchain service whose
/// state lives behind an async lock, so every accessor here is async too.
#[async_trait]
pub trait BlockchainTrait: Send + Sync + std::fmt::Debug {
    async fn height(&self) -> u32;
    async fn best_block_hash(&self) -> UInt256;
    async fn contains_transaction(&self, hash: &UInt256) -> bool;
    async fn contains_conflict_hash(&self, hash: &UInt256, signers: &[UInt160]) -> bool;
}

/// Read-only view of the memory pool a node is tracking.
#[async_trait]
pub trait MempoolTrait: Send + Sync + std::fmt::Debug {
    async fn transaction_count(&self) -> usize;
    async fn contains(&self, hash: &UInt256) -> bool;
}

/// Read-only view of the P2P layer a node is tracking.
#[async_trait]
pub trait NetworkTrait: Send + Sync + std::fmt::Debug {
    async fn peer_count(&self) -> usize;
}

/// Read-only view of the consensus service a node is tracking.
#[async_trait]
pub trait ConsensusTrait: Send + Sync + std::fmt::Debug {
    async fn is_running(&self) -> bool;
}

/// Network-wide parameters agreed upon by all nodes on a given chain.
#[derive(Debug, Clone)]
pub struct ProtocolSettings {
    /// Magic number identifying the network (mainnet/testnet/private).
    pub network: u32,
    /// Version byte used when deriving addresses from script hashes.
    pub address_version: u8,
    /// Public keys of the standby committee, highest-to-lowest weight.
    pub standby_committee: Vec<neo_cryptography::ECPoint>,
    /// Number of committee members that also serve as consensus validators.
    pub validators_count: u32,
    /// Size of the full committee (validators + non-validator members).
    pub committee_size: u32,
    /// Seed nodes used for initial peer discovery.
    pub seed_list: Vec<String>,
    /// Target time between blocks, in milliseconds.
    pub milliseconds_per_block: u32,
    /// Maximum allowed distance between a transaction's `valid_until_block`
    /// and the current height at the time it was signed.
    pub max_valid_until_block_increment: u32,
    /// Maximum number of transactions a single block may contain.
    pub max_transactions_per_block: u32,
    /// Maximum wire size of a block, in bytes.
    pub max_block_size: u32,
    /// Maximum cumulative system fee a block's transactions may spend.
    pub max_block_system_fee: u64,
    /// Maximum number of transactions the mempool will hold at once.
    pub memory_pool_max_transactions: i32,
    /// Number of blocks after which on-chain state becomes untraceable.
    pub max_traceable_blocks: u32,
    /// Total GAS minted at genesis.
    pub initial_gas_distribution: u64,
    /// Block height at which each hardfork activates, if configured.
    pub hardforks: HashMap<Hardfork, u32>,
}

impl ProtocolSettings {
    /// Settings with conservative defaults and no committee configured.
    pub fn new() -> Self {
        Self {
            network: 0,
            address_version: 0x35,
            standby_committee: Vec::new(),
            validators_count: 0,
            committee_size: 0,
            seed_list: Vec::new(),
            milliseconds_per_block: 15_000,
            max_valid_until_block_increment: 86_400_000 / 15_000,
            max_transactions_per_block: 512,
            max_block_size: 2_097_152,
            max_block_system_fee: 150_000_000_00000000,
            memory_pool_max_transactions: 50_000,
            max_traceable_blocks: 2_102_400,
            initial_gas_distribution: 52_000_000_00000000,
            hardforks: HashMap::new(),
        }
    }

    /// MainNet protocol parameters.
    pub fn mainnet() -> Self {
        let mut settings = Self::new();
        settings.network = 860_833_102;
        settings.validators_count = 7;
        settings.committee_size = 21;
        settings.max_transactions_per_block = 512;
        settings.memory_pool_max_transactions = 50_000;
        settings.max_traceable_blocks = 2_102_400;
        settings.initial_gas_distribution = 52_000_000_00000000;
        settings.hardforks.insert(Hardfork::HfAspidochelone, 1_730_000);
        settings.hardforks.insert(Hardfork::HfBasilisk, 4_120_000);
        settings.hardforks.insert(Hardfork::HfCockatrice, 5_450_000);
        settings.hardforks.insert(Hardfork::HfDomovoi, 5_570_000);
        settings.hardforks.insert(Hardfork::HfEchidna, 7_300_000);
        settings
    }

    /// TestNet protocol parameters.
    pub fn testnet() -> Self {
        let mut settings = Self::new();
        settings.network = 894_710_606;
        settings.validators_count = 7;
        settings.committee_size = 21;
        settings.max_transactions_per_block = 5_000;
        settings.memory_pool_max_transactions = 50_000;
        settings.max_traceable_blocks = 2_102_400;
        settings.initial_gas_distribution = 52_000_000_00000000;
        settings.hardforks.insert(Hardfork::HfAspidochelone, 210_000);
        settings.hardforks.insert(Hardfork::HfBasilisk, 2_680_000);
        settings.hardforks.insert(Hardfork::HfCockatrice, 3_967_000);
        settings.hardforks.insert(Hardfork::HfDomovoi, 4_144_000);
        settings.hardforks.insert(Hardfork::HfEchidna, 5_870_000);
        settings
    }

    /// Whether `hardfork` is active at block height `index`.
    pub fn is_hardfork_enabled(&self, hardfork: Hardfork, index: u32) -> bool {
        match self.hardforks.get(&hardfork) {
            Some(&height) => index >= height,
            None => false,
        }
    }
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the protocol settings and live component handles a node's
/// subsystems need, passed by reference into each subsystem at construction
/// rather than looked up through a global.
#[derive(Debug)]
pub struct NodeContext {
    settings: ProtocolSettings,
    blockchain: RwLock<Option<Arc<dyn BlockchainTrait>>>,
    mempool: RwLock<Option<Arc<dyn MempoolTrait>>>,
    network: RwLock<Option<Arc<dyn NetworkTrait>>>,
    consensus: RwLock<Option<Arc<dyn ConsensusTrait>>>,
    services: RwLock<HashMap<String, Arc<dyn std::any::Any + Send + Sync>>>,
}

impl NodeContext {
    pub fn new(settings: ProtocolSettings) -> Self {
        Self {
            settings,
            blockchain: RwLock::new(None),
            mempool: RwLock::new(None),
            network: RwLock::new(None),
            consensus: RwLock::new(None),
            services: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    pub fn set_blockchain(&self, blockchain: Arc<dyn BlockchainTrait>) {
        *self.blockchain.write().expect("lock poisoned") = Some(blockchain);
    }

    pub fn blockchain(&self) -> Option<Arc<dyn BlockchainTrait>> {
        self.blockchain.read().expect("lock poisoned").clone()
    }

    pub fn set_mempool(&self, mempool: Arc<dyn MempoolTrait>) {
        *self.mempool.write().expect("lock poisoned") = Some(mempool);
    }

    pub fn mempool(&self) -> Option<Arc<dyn MempoolTrait>> {
        self.mempool.read().expect("lock poisoned").clone()
    }

    pub fn set_network(&self, network: Arc<dyn NetworkTrait>) {
        *self.network.write().expect("lock poisoned") = Some(network);
    }

    pub fn network(&self) -> Option<Arc<dyn NetworkTrait>> {
        self.network.read().expect("lock poisoned").clone()
    }

    pub fn set_consensus(&self, consensus: Arc<dyn ConsensusTrait>) {
        *self.consensus.write().expect("lock poisoned") = Some(consensus);
    }

    pub fn consensus(&self) -> Option<Arc<dyn ConsensusTrait>> {
        self.consensus.read().expect("lock poisoned").clone()
    }

    /// Registers an arbitrary named service (e.g. a shutdown coordinator or
    /// metrics registry) so other components constructed later can fetch it.
    pub fn add_service<T: 'static + Send + Sync>(
        &self,
        name: &str,
        service: T,
    ) -> Result<(), CoreError> {
        let mut services = self
            .services
            .write()
            .map_err(|_| CoreError::SystemError("failed to acquire write lock".to_string()))?;
        services.insert(name.to_string(), Arc::new(service));
        Ok(())
    }

    pub fn get_service<T: 'static + Send + Sync>(&self, name: &str) -> Result<Arc<T>, CoreError> {
        let services = self
            .services
            .read()
            .map_err(|_| CoreError::SystemError("failed to acquire read lock".to_string()))?;

        match services.get(name) {
            Some(service) => service
                .clone()
                .downcast::<T>()
                .map_err(|_| CoreError::SystemError(format!("service {name} is not of the requested type"))),
            None => Err(CoreError::SystemError(format!("service {name} not found"))),
        }
    }

    /// Whether `hash` is present in the mempool or the ledger.
    pub async fn contains_transaction(&self, hash: &UInt256) -> ContainsTransactionType {
        if let Some(mempool) = self.mempool() {
            if mempool.contains(hash).await {
                return ContainsTransactionType::ExistsInPool;
            }
        }

        if let Some(blockchain) = self.blockchain() {
            if blockchain.contains_transaction(hash).await {
                return ContainsTransactionType::ExistsInLedger;
            }
        }

        ContainsTransactionType::NotExist
    }

    /// Whether `hash` conflicts with an on-chain transaction for any of
    /// `signers`, delegating the actual lookup to the ledger implementation.
    pub async fn contains_conflict_hash(&self, hash: &UInt256, signers: &[UInt160]) -> bool {
        match self.blockchain() {
            Some(blockchain) => blockchain.contains_conflict_hash(hash, signers).await,
            None => false,
        }
    }
}
