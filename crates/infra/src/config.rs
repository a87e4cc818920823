//! Storage configuration.

use std::path::PathBuf;

/// Environment variable naming the snapshot file.
pub const SNAPSHOT_PATH_ENV: &str = "HBNB_FILE_PATH";

/// Snapshot file used when [`SNAPSHOT_PATH_ENV`] is unset or empty.
pub const DEFAULT_SNAPSHOT_PATH: &str = "file.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub snapshot_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl StorageConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let snapshot_path = lookup(SNAPSHOT_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        Self { snapshot_path }
    }
}
