use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Subdirectory of the platform temp dir used when no root is configured.
const DEFAULT_ROOT_SUBDIR: &str = "platter-data";

/// Construction options for a storage provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Instance identifier, used in log output only.
    pub name: String,
    /// Base directory under which namespaces live.
    pub root: PathBuf,
    /// Namespace identifier; one directory under `root` per prefix.
    ///
    /// Not validated here — `open` rejects an empty prefix, so a
    /// misconfigured provider can be constructed but never opened.
    pub key_prefix: String,
}

impl ProviderConfig {
    /// Config with the default storage root.
    ///
    /// The temp-directory lookup happens once, here, never inside provider
    /// operations.
    pub fn new(name: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: default_root(),
            key_prefix: key_prefix.into(),
        }
    }

    /// Override the storage root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}

/// Default storage root: platform temp dir plus a fixed subdirectory.
pub fn default_root() -> PathBuf {
    env::temp_dir().join(DEFAULT_ROOT_SUBDIR)
}
