//! Configuration for jsondb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a jsondb instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The single backing file. Holds both the record log and its index footer.
    pub path: PathBuf,

    /// Create missing parent directories when the engine is constructed
    pub create_dirs: bool,

    /// Sync strategy: when to push written data to disk
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Read Path Configuration
    // -------------------------------------------------------------------------
    /// Keep the loaded index in memory between reads (`Engine` only).
    /// Replaced on every `add`, dropped on `close`.
    pub cache_index: bool,

    /// Reads against a missing file return an empty result instead of
    /// `FileNotFound` (only the per-operation engine can observe this)
    pub silent_missing: bool,
}

/// Sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync only when `flush()` is called explicitly
    OnFlush,

    /// fsync at the end of every `add` (safest, slowest)
    EveryAdd,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./jsondb.jsonl"),
            create_dirs: false,
            sync_strategy: SyncStrategy::OnFlush,
            cache_index: true,
            silent_missing: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Create missing parent directories on construction
    pub fn create_dirs(mut self, enabled: bool) -> Self {
        self.config.create_dirs = enabled;
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Enable or disable the in-memory index cache
    pub fn cache_index(mut self, enabled: bool) -> Self {
        self.config.cache_index = enabled;
        self
    }

    /// Treat a missing backing file as empty on reads
    pub fn silent_missing(mut self, enabled: bool) -> Self {
        self.config.silent_missing = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
