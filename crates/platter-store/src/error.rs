use std::path::PathBuf;

/// Errors from storage-provider operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The provider was constructed without a namespace identifier.
    #[error("missing key prefix: cannot open an unnamed namespace")]
    MissingKeyPrefix,

    /// A mutating operation was issued on a read-only context.
    #[error("write operation on read-only context")]
    ReadOnly,

    /// The key cannot name a file inside the namespace directory.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// A write, delete, or clear step failed at the filesystem level.
    #[error("unable to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A read failed for a reason other than the key being absent.
    #[error("unable to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored object payload is not valid JSON.
    #[error("invalid object encoding: {0}")]
    Decode(#[from] serde_json::Error),

    /// I/O error outside a per-key operation (namespace open/listing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage-provider operations.
pub type StoreResult<T> = Result<T, StoreError>;
