use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;

/// Access mode of a [`StorageContext`], fixed for the context's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    /// Reads only; every mutating call fails with `StoreError::ReadOnly`.
    ReadOnly,
    /// Full access.
    ReadWrite,
}

impl AccessMode {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::ReadWrite => write!(f, "read-write"),
        }
    }
}

/// A storage backend scoped to one namespace (one owner's filesystem
/// instance).
///
/// The provider owns namespace lifecycle; contexts never create or open the
/// namespace themselves. The consuming filesystem calls [`open`] exactly once
/// per mount attempt and branches on the returned first-access flag: `true`
/// means a brand-new namespace to format, `false` means existing state to
/// mount.
///
/// [`open`]: StorageProvider::open
#[async_trait]
pub trait StorageProvider: Send + Sync {
    type Context: StorageContext;

    /// Materialize the namespace and report whether it was empty.
    ///
    /// Idempotent: a pre-existing namespace is not an error and is not
    /// disturbed. Also rebinds the provider's namespace path to its resolved
    /// absolute form, so contexts created afterwards use the resolved path.
    async fn open(&mut self) -> StoreResult<bool>;

    /// New context that can only read. Pure constructor, no I/O.
    fn read_only_context(&self) -> Self::Context;

    /// New context with full access. Pure constructor, no I/O.
    fn read_write_context(&self) -> Self::Context;
}

/// A bound handle into one namespace.
///
/// Contexts are cheap, stateless handles; all contexts derived from one
/// provider share the same underlying namespace. Operations issued in
/// sequence on one context (each after the previous completion) execute in
/// that order; concurrently in-flight operations on the same key have no
/// ordering guarantee — callers needing one must serialize externally.
///
/// "Not found" is never an error here: reads of an absent key return
/// `Ok(None)` and deleting an absent key succeeds.
#[async_trait]
pub trait StorageContext: Send + Sync {
    /// The access mode this context was created with.
    fn mode(&self) -> AccessMode;

    /// Store a structured value under `key`, replacing any previous value.
    async fn put_object(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Read back a structured value, or `Ok(None)` if the key was never
    /// written.
    async fn get_object(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Store raw bytes under `key`, replacing any previous value. The bytes
    /// round-trip exactly; zero-length payloads are valid.
    async fn put_buffer(&self, key: &str, data: &[u8]) -> StoreResult<()>;

    /// Read back raw bytes, or `Ok(None)` if the key was never written.
    async fn get_buffer(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Remove `key`. Removing a key that was never written is a successful
    /// no-op.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Remove every key in the namespace, leaving it in the state a
    /// first-access open would produce.
    async fn clear(&self) -> StoreResult<()>;
}
