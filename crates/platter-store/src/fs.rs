use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{StoreError, StoreResult};
use crate::key::validate_key;
use crate::traits::{AccessMode, StorageContext, StorageProvider};
use crate::value::{decode_object, encode_object};

/// Prefix for in-flight staging files. Keys may not start with `.`, so no
/// valid key can collide with a staging file.
const TMP_PREFIX: &str = ".tmp-";

/// Filesystem-backed storage provider.
///
/// Owns one namespace directory, `<root>/<key prefix>`, holding one file per
/// key with no subdirectories and no manifest. [`open`] materializes the
/// directory and reports whether it was empty; contexts handed out afterwards
/// resolve keys against the canonical absolute path.
///
/// [`open`]: StorageProvider::open
#[derive(Debug)]
pub struct FsProvider {
    name: String,
    key_prefix: String,
    /// Namespace directory; rebound to the canonical absolute path by `open`.
    dir: PathBuf,
}

impl FsProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let dir = config.root.join(&config.key_prefix);
        Self {
            name: config.name,
            key_prefix: config.key_prefix,
            dir,
        }
    }

    /// Instance identifier (log output only).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace directory keys resolve under.
    pub fn namespace_dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl StorageProvider for FsProvider {
    type Context = FsContext;

    async fn open(&mut self) -> StoreResult<bool> {
        if self.key_prefix.is_empty() {
            return Err(StoreError::MissingKeyPrefix);
        }

        fs::create_dir_all(&self.dir).await?;
        self.dir = fs::canonicalize(&self.dir).await?;

        // First access iff the namespace holds nothing yet; this is the only
        // state the consuming filesystem's format-vs-mount decision reads.
        let mut entries = fs::read_dir(&self.dir).await?;
        let first_access = entries.next_entry().await?.is_none();

        debug!(
            name = %self.name,
            dir = %self.dir.display(),
            first_access,
            "namespace opened"
        );
        Ok(first_access)
    }

    fn read_only_context(&self) -> FsContext {
        FsContext::new(self.dir.clone(), AccessMode::ReadOnly)
    }

    fn read_write_context(&self) -> FsContext {
        FsContext::new(self.dir.clone(), AccessMode::ReadWrite)
    }
}

/// A bound handle into one on-disk namespace.
#[derive(Clone, Debug)]
pub struct FsContext {
    dir: PathBuf,
    mode: AccessMode,
}

impl FsContext {
    fn new(dir: PathBuf, mode: AccessMode) -> Self {
        Self { dir, mode }
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.mode.is_read_only() {
            return Err(StoreError::ReadOnly);
        }
        Ok(())
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }

    /// Stage into a sibling temp file, then rename over the target, so an
    /// interrupted put leaves at worst a stale staging file, never a
    /// truncated value.
    async fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.key_path(key)?;
        let staging = self.dir.join(format!("{TMP_PREFIX}{key}"));

        fs::write(&staging, bytes)
            .await
            .map_err(|source| StoreError::WriteFailed {
                path: staging.clone(),
                source,
            })?;
        fs::rename(&staging, &path)
            .await
            .map_err(|source| StoreError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        debug!(key, len = bytes.len(), "value written");
        Ok(())
    }

    async fn read_bytes(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            // An absent key is a normal outcome, not an error.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::ReadFailed { path, source }),
        }
    }
}

#[async_trait]
impl StorageContext for FsContext {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    async fn put_object(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.check_writable()?;
        let bytes = encode_object(value)?;
        self.write_atomic(key, &bytes).await
    }

    async fn get_object(&self, key: &str) -> StoreResult<Option<Value>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(decode_object(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put_buffer(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        self.check_writable()?;
        self.write_atomic(key, data).await
    }

    async fn get_buffer(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.read_bytes(key).await
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.check_writable()?;
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "key deleted");
                Ok(())
            }
            // Deleting a key that was never written is a successful no-op.
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::WriteFailed { path, source }),
        }
    }

    async fn clear(&self) -> StoreResult<()> {
        self.check_writable()?;

        // Directory-replace: drop the whole namespace tree, then recreate it
        // empty. No stale entry can survive a partial enumeration, and the
        // namespace ends in the state a first-access open would produce.
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StoreError::WriteFailed {
                    path: self.dir.clone(),
                    source,
                })
            }
        }
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::WriteFailed {
                path: self.dir.clone(),
                source,
            })?;

        debug!(dir = %self.dir.display(), "namespace cleared");
        Ok(())
    }
}
