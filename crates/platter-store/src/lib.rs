//! Key-value storage providers for the Platter virtual filesystem.
//!
//! The filesystem layer above this crate stores everything -- superblocks,
//! nodes, data blocks -- as values under string keys. A provider scopes those
//! keys to one namespace (one owner's filesystem instance) and hands out
//! contexts to operate on them.
//!
//! # Providers
//!
//! All backends implement the [`StorageProvider`] / [`StorageContext`] trait
//! pair:
//!
//! - [`FsProvider`] -- one directory per namespace, one file per key
//! - [`MemoryProvider`] -- `HashMap`-based provider for tests and embedding
//!
//! # Design Rules
//!
//! 1. The provider owns namespace lifecycle; contexts never create or open
//!    the namespace themselves.
//! 2. `open` is idempotent and reports first access, which is how the
//!    consuming filesystem decides between formatting and mounting.
//! 3. Buffers round-trip as exact raw bytes; objects round-trip through
//!    self-describing UTF-8 JSON.
//! 4. An absent key is a normal outcome, never an error: reads return
//!    `Ok(None)` and deletes are no-ops.
//! 5. A read-only context rejects every mutation before any I/O is issued.
//! 6. All I/O errors are propagated with their cause, never silently
//!    ignored.
//!
//! # Example
//!
//! ```no_run
//! use platter_store::{FsProvider, ProviderConfig, StorageContext, StorageProvider};
//!
//! # async fn demo() -> platter_store::StoreResult<()> {
//! let config = ProviderConfig::new("local", "alice");
//! let mut provider = FsProvider::new(config);
//!
//! let first_access = provider.open().await?;
//! let ctx = provider.read_write_context();
//! if first_access {
//!     ctx.put_object("superblock", &serde_json::json!({"version": 1})).await?;
//! }
//! ctx.put_buffer("block-0", &[5, 2, 5]).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod key;
pub mod memory;
pub mod traits;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{default_root, ProviderConfig};
pub use error::{StoreError, StoreResult};
pub use fs::{FsContext, FsProvider};
pub use memory::{MemoryContext, MemoryProvider};
pub use traits::{AccessMode, StorageContext, StorageProvider};
