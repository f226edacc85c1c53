//! Wires the modular blockchain crates (ledger, network, persistence, RPC)
//! together behind a single [`NodeContext`], replacing what used to be a
//! monolithic, globally-reachable orchestrator.

use crate::config::NodeConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use neo_core::{
    BlockchainTrait, ConsensusTrait, MempoolTrait, NetworkTrait, NodeContext, ProtocolSettings,
    UInt160, UInt256,
};
use neo_ledger::{Ledger, LedgerConfig, MemoryPool, MempoolConfig, NetworkType};
use neo_network::{NetworkCommand, P2pNode};
use neo_persistence::RocksDbStore;
use neo_rpc_server::RpcServer;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Debug)]
struct LedgerAdapter(Arc<Ledger>);

#[async_trait]
impl BlockchainTrait for LedgerAdapter {
    async fn height(&self) -> u32 {
        self.0.get_height().await
    }

    async fn best_block_hash(&self) -> UInt256 {
        self.0.get_best_block_hash().await.unwrap_or(UInt256::zero())
    }

    async fn contains_transaction(&self, hash: &UInt256) -> bool {
        self.0.contains_transaction(hash).await
    }

    async fn contains_conflict_hash(&self, hash: &UInt256, signers: &[UInt160]) -> bool {
        self.0.contains_conflict_hash(hash, signers).await
    }
}

#[derive(Debug)]
struct MempoolAdapter(Arc<MemoryPool>);

#[async_trait]
impl MempoolTrait for MempoolAdapter {
    async fn transaction_count(&self) -> usize {
        self.0.count()
    }

    async fn contains(&self, hash: &UInt256) -> bool {
        self.0.contains(hash)
    }
}

#[derive(Debug)]
struct P2pAdapter(Arc<P2pNode>);

#[async_trait]
impl NetworkTrait for P2pAdapter {
    async fn peer_count(&self) -> usize {
        self.0.get_statistics().await.peer_count
    }
}

/// A node with no consensus service registered reports itself as not running
/// rather than fabricating a consensus presence it doesn't have.
#[derive(Debug)]
struct NoConsensus;

#[async_trait]
impl ConsensusTrait for NoConsensus {
    async fn is_running(&self) -> bool {
        false
    }
}

/// Owns the long-lived subsystems of a running node and the [`NodeContext`]
/// that exposes them to callers (health checks, RPC, future consensus wiring)
/// without a process-global.
pub struct NodeService {
    pub context: Arc<NodeContext>,
    pub ledger: Arc<Ledger>,
    pub mempool: Arc<MemoryPool>,
    pub network: Arc<P2pNode>,
    pub rpc: Option<Arc<RpcServer>>,
    storage_path: Option<String>,
}

impl NodeService {
    pub async fn start(
        settings: ProtocolSettings,
        node_config: &NodeConfig,
        storage_path: Option<String>,
    ) -> Result<Self> {
        let network_type = match settings.network {
            n if n == ProtocolSettings::testnet().network => NetworkType::TestNet,
            _ => NetworkType::MainNet,
        };

        let ledger = Arc::new(
            Ledger::new_with_network(LedgerConfig::default(), network_type)
                .await
                .context("failed to initialize ledger")?,
        );
        let mempool = Arc::new(MemoryPool::new(MempoolConfig::default()));

        let network_config = node_config.network_config(&settings);
        let (_command_tx, command_rx) = mpsc::channel::<NetworkCommand>(256);
        let network = Arc::new(
            P2pNode::new(network_config, command_rx).context("failed to initialize P2P node")?,
        );

        let context = Arc::new(NodeContext::new(settings.clone()));
        context.set_blockchain(Arc::new(LedgerAdapter(ledger.clone())));
        context.set_mempool(Arc::new(MempoolAdapter(mempool.clone())));
        context.set_network(Arc::new(P2pAdapter(network.clone())));
        context.set_consensus(Arc::new(NoConsensus));

        network.start().await.context("failed to start P2P node")?;
        info!(target: "neo", "p2p node started");

        let rpc = if node_config.rpc.enabled {
            let rpc_config = node_config.rpc_server_config(&settings);
            let storage_dir = storage_path.clone().unwrap_or_else(|| "./data/rpc".to_string());
            let store = Arc::new(
                RocksDbStore::new(&storage_dir).context("failed to open RPC storage backend")?,
            );
            let server = RpcServer::new(rpc_config, ledger.clone(), store)
                .await
                .map_err(|e| anyhow::anyhow!("failed to initialize RPC server: {e}"))?;
            let server = Arc::new(server);
            let handle = server.clone();
            tokio::spawn(async move {
                if let Err(e) = handle.start().await {
                    tracing::error!(target: "neo", error = %e, "rpc server terminated");
                }
            });
            Some(server)
        } else {
            None
        };

        Ok(Self {
            context,
            ledger,
            mempool,
            network,
            rpc,
            storage_path,
        })
    }

    pub fn settings(&self) -> &ProtocolSettings {
        self.context.settings()
    }

    pub fn storage_path(&self) -> Option<&str> {
        self.storage_path.as_deref()
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.network.stop().await.context("failed to stop P2P node")?;
        info!(target: "neo", "p2p node stopped");
        Ok(())
    }
}
