use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::key::validate_key;
use crate::traits::{AccessMode, StorageContext, StorageProvider};
use crate::value::{decode_object, encode_object};

/// In-memory, HashMap-based storage provider.
///
/// Intended for tests and embedding. Semantics match the filesystem backend:
/// object values are held as their encoded JSON bytes, key validation and
/// read-only enforcement are identical, and every context derived from one
/// provider shares the same underlying map. State lives and dies with the
/// provider; two instances with the same key prefix do not share anything.
pub struct MemoryProvider {
    key_prefix: String,
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryProvider {
    /// Create a new empty in-memory namespace.
    pub fn new(key_prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the namespace holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }
}

#[async_trait]
impl StorageProvider for MemoryProvider {
    type Context = MemoryContext;

    async fn open(&mut self) -> StoreResult<bool> {
        if self.key_prefix.is_empty() {
            return Err(StoreError::MissingKeyPrefix);
        }
        let first_access = self.is_empty();
        debug!(key_prefix = %self.key_prefix, first_access, "in-memory namespace opened");
        Ok(first_access)
    }

    fn read_only_context(&self) -> MemoryContext {
        MemoryContext {
            entries: Arc::clone(&self.entries),
            mode: AccessMode::ReadOnly,
        }
    }

    fn read_write_context(&self) -> MemoryContext {
        MemoryContext {
            entries: Arc::clone(&self.entries),
            mode: AccessMode::ReadWrite,
        }
    }
}

impl std::fmt::Debug for MemoryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryProvider")
            .field("key_prefix", &self.key_prefix)
            .field("key_count", &self.len())
            .finish()
    }
}

/// A bound handle into one in-memory namespace.
#[derive(Clone, Debug)]
pub struct MemoryContext {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    mode: AccessMode,
}

impl MemoryContext {
    fn check_writable(&self) -> StoreResult<()> {
        if self.mode.is_read_only() {
            return Err(StoreError::ReadOnly);
        }
        Ok(())
    }

    fn insert(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        validate_key(key)?;
        self.entries
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), bytes);
        Ok(())
    }
}

#[async_trait]
impl StorageContext for MemoryContext {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    async fn put_object(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.check_writable()?;
        let bytes = encode_object(value)?;
        self.insert(key, bytes)
    }

    async fn get_object(&self, key: &str) -> StoreResult<Option<Value>> {
        match self.get_buffer(key).await? {
            Some(bytes) => Ok(Some(decode_object(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put_buffer(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        self.check_writable()?;
        self.insert(key, data.to_vec())
    }

    async fn get_buffer(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self
            .entries
            .read()
            .expect("lock poisoned")
            .get(key)
            .cloned())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.check_writable()?;
        validate_key(key)?;
        // Removing an absent key is a successful no-op.
        self.entries.write().expect("lock poisoned").remove(key);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.check_writable()?;
        self.entries.write().expect("lock poisoned").clear();
        Ok(())
    }
}
