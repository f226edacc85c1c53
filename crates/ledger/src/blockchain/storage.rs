//! Storage interface and implementation.
//!
//! This module provides storage functionality exactly Storage classes.

use crate::{Error, Result};
use neo_config::{MAX_SCRIPT_SIZE, MAX_TRANSACTIONS_PER_BLOCK};
use rocksdb::{IteratorMode, Options, DB};
use std::collections::HashMap;
use std::sync::Arc;

const STORAGE_PREFIX_STORAGE: u8 = 0x05; // Matches the reference implementation StoragePrefix.Storage

/// Storage key for blockchain data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub prefix: Vec<u8>,
    pub key: Vec<u8>,
}

impl StorageKey {
    /// Creates a new storage key
    pub fn new(prefix: Vec<u8>, key: Vec<u8>) -> Self {
        Self { prefix, key }
    }

    /// Gets the full key bytes (prefix + key)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut full_key = self.prefix.clone();
        full_key.extend_from_slice(&self.key);
        full_key
    }

    /// Creates a storage key for current blockchain height
    pub fn current_height() -> Self {
        Self::new(b"SYS".to_vec(), b"CurrentHeight".to_vec())
    }

    /// Creates a storage key for contract data
    pub fn contract(script_hash: neo_core::UInt160) -> Self {
        Self::new(b"ST".to_vec(), script_hash.as_bytes().to_vec())
    }

    /// Creates a storage key for contract storage entries (script hash prefix + raw key).
    pub fn contract_storage(script_hash: &neo_core::UInt160, key: &[u8]) -> Self {
        let mut prefix = Vec::with_capacity(1 + script_hash.as_bytes().len());
        prefix.push(STORAGE_PREFIX_STORAGE);
        prefix.extend_from_slice(&script_hash.as_bytes());
        Self::new(prefix, key.to_vec())
    }

    /// Creates a storage key for block header
    pub fn block_header(index: u32) -> Self {
        Self::new(b"DATA_BlockHeader".to_vec(), index.to_le_bytes().to_vec())
    }

    /// Creates a storage key for block hash
    pub fn block_hash(index: u32) -> Self {
        Self::new(b"DATA_BlockHash".to_vec(), index.to_le_bytes().to_vec())
    }

    /// Creates a storage key for transaction
    pub fn transaction(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_Transaction".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for transaction block index
    pub fn transaction_block(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_TransactionBlock".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for transaction index within block
    pub fn transaction_index(hash: neo_core::UInt256) -> Self {
        Self::new(b"DATA_TransactionIndex".to_vec(), hash.as_bytes().to_vec())
    }

    /// Creates a storage key for the list of transactions in a block
    pub fn block_transactions(index: u32) -> Self {
        Self::new(b"DATA_BlockTxs".to_vec(), index.to_le_bytes().to_vec())
    }
}

/// Storage item containing value data
#[derive(Debug, Clone, PartialEq)]
pub struct StorageItem {
    pub value: Vec<u8>,
}

impl StorageItem {
    /// Creates a new storage item
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }
}

/// Storage interface for blockchain data
#[async_trait::async_trait]
pub trait StorageProvider: Send + Sync {
    /// Gets a value by key
    async fn get(&self, key: &StorageKey) -> Result<StorageItem>;

    /// Puts a value by key
    async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()>;

    /// Deletes a value by key
    async fn delete(&self, key: &StorageKey) -> Result<()>;

    /// Checks if a key exists
    async fn contains(&self, key: &StorageKey) -> Result<bool>;

    /// Creates a snapshot for consistent reads
    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>>;
}

/// RocksDB-based storage implementation
pub struct RocksDBStorage {
    db: Arc<DB>,
}

impl RocksDBStorage {
    /// Creates a new RocksDB storage instance
    pub fn new(path: &str) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_max_open_files(10000);
        opts.set_write_buffer_size(64 * MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE);
        opts.set_target_file_size_base((64 * MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE) as u64);
        opts.set_level_zero_file_num_compaction_trigger(8);
        opts.set_level_zero_slowdown_writes_trigger(17);
        opts.set_level_zero_stop_writes_trigger(24);
        opts.set_num_levels(4);
        opts.set_max_bytes_for_level_base(
            (MAX_TRANSACTIONS_PER_BLOCK * MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE) as u64,
        );
        opts.set_max_bytes_for_level_multiplier(8.0);

        let db = DB::open(&opts, path)
            .map_err(|e| Error::StorageError(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Creates a new RocksDB storage instance with default path
    pub fn new_default() -> Result<Self> {
        Self::new("./data/blocks")
    }
}

impl Default for RocksDBStorage {
    fn default() -> Self {
        Self::new_default().unwrap_or_else(|_| {
            Self::new("/tmp/neo-blocks").expect("Failed to create RocksDB storage")
        })
    }
}

#[async_trait::async_trait]
impl StorageProvider for RocksDBStorage {
    async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        let full_key = key.to_bytes();
        let db = self.db.clone();

        let result = tokio::task::spawn_blocking(move || db.get(&full_key))
            .await
            .map_err(|e| Error::StorageError(format!("Task join error: {}", e)))?;

        match result {
            Ok(Some(value)) => Ok(StorageItem::new(value)),
            Ok(None) => Err(Error::NotFound),
            Err(e) => Err(Error::StorageError(format!("RocksDB get error: {}", e))),
        }
    }

    async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()> {
        let full_key = key.to_bytes();
        let value = item.value.clone();
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || db.put(&full_key, &value))
            .await
            .map_err(|e| Error::StorageError(format!("Task join error: {}", e)))?
            .map_err(|e| Error::StorageError(format!("RocksDB put error: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<()> {
        let full_key = key.to_bytes();
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || db.delete(&full_key))
            .await
            .map_err(|e| Error::StorageError(format!("Task join error: {}", e)))?
            .map_err(|e| Error::StorageError(format!("RocksDB delete error: {}", e)))?;

        Ok(())
    }

    async fn contains(&self, key: &StorageKey) -> Result<bool> {
        let full_key = key.to_bytes();
        let db = self.db.clone();

        let result = tokio::task::spawn_blocking(move || db.get(&full_key))
            .await
            .map_err(|e| Error::StorageError(format!("Task join error: {}", e)))?;

        match result {
            Ok(Some(_)) => Ok(true),
            Ok(None) => Ok(false),
            Err(e) => Err(Error::StorageError(format!(
                "RocksDB contains error: {}",
                e
            ))),
        }
    }

    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>> {
        let db = self.db.clone();

        let data = tokio::task::spawn_blocking(move || -> Result<HashMap<Vec<u8>, Vec<u8>>> {
            let mut map = HashMap::new();
            let iter = db.iterator(IteratorMode::Start);
            for entry in iter {
                match entry {
                    Ok((key, value)) => {
                        map.insert(key.to_vec(), value.to_vec());
                    }
                    Err(e) => {
                        return Err(Error::StorageError(format!(
                            "RocksDB snapshot iteration error: {}",
                            e
                        )));
                    }
                }
            }
            Ok(map)
        })
        .await
        .map_err(|e| Error::StorageError(format!("Task join error: {}", e)))??;

        Ok(Arc::new(InMemorySnapshot::new(data)))
    }
}

/// In-memory snapshot used for consistent read views during testing and lightweight usage
struct InMemorySnapshot {
    data: Arc<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemorySnapshot {
    fn new(data: HashMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }
}

#[async_trait::async_trait]
impl StorageProvider for InMemorySnapshot {
    async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        let full_key = key.to_bytes();
        match self.data.get(&full_key) {
            Some(value) => Ok(StorageItem::new(value.clone())),
            None => Err(Error::NotFound),
        }
    }

    async fn put(&self, _key: &StorageKey, _item: &StorageItem) -> Result<()> {
        Err(Error::StorageError("Snapshots are read-only".to_string()))
    }

    async fn delete(&self, _key: &StorageKey) -> Result<()> {
        Err(Error::StorageError("Snapshots are read-only".to_string()))
    }

    async fn contains(&self, key: &StorageKey) -> Result<bool> {
        let full_key = key.to_bytes();
        Ok(self.data.contains_key(&full_key))
    }

    async fn snapshot(&self) -> Result<Arc<dyn StorageProvider>> {
        Ok(Arc::new(InMemorySnapshot {
            data: self.data.clone(),
        }))
    }
}

/// Main storage wrapper
pub struct Storage {
    provider: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("provider", &"<dyn StorageProvider>")
            .finish()
    }
}

impl Storage {
    /// Creates a new storage instance with a provider
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Creates a new RocksDB-based storage instance (default)
    pub fn new_default() -> Result<Self> {
        Self::new_rocksdb("./data/blocks")
    }

    /// Creates a new RocksDB-based storage instance with custom path
    pub fn new_rocksdb(path: &str) -> Result<Self> {
        let provider = Arc::new(RocksDBStorage::new(path)?);
        Ok(Self { provider })
    }

    /// Creates a new temporary RocksDB storage instance for testing
    pub fn new_temp() -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let final_dir = format!("/tmp/neo-test-{}-{}", std::process::id(), timestamp);
        Self::new_rocksdb(&final_dir).unwrap_or_else(|_| {
            let fallback_dir = format!("/tmp/neo-fallback-{}", timestamp);
            Self::new_rocksdb(&fallback_dir).expect("Failed to create temporary RocksDB storage")
        })
    }

    /// Gets a value by key
    pub async fn get(&self, key: &StorageKey) -> Result<StorageItem> {
        self.provider.get(key).await
    }

    /// Puts a value by key
    pub async fn put(&self, key: &StorageKey, item: &StorageItem) -> Result<()> {
        self.provider.put(key, item).await
    }

    /// Deletes a value by key
    pub async fn delete(&self, key: &StorageKey) -> Result<()> {
        self.provider.delete(key).await
    }

    /// Checks if a key exists
    pub async fn contains(&self, key: &StorageKey) -> Result<bool> {
        self.provider.contains(key).await
    }

    /// Creates a snapshot for consistent reads
    pub async fn snapshot(&self) -> Result<Storage> {
        let snapshot_provider = self.provider.snapshot().await?;
        Ok(Storage {
            provider: snapshot_provider,
        })
    }
}
