//! Engine Module
//!
//! The handle-holding storage engine.
//!
//! ## Responsibilities
//! - Own exactly one read/write handle on the backing file
//! - Explicit open/flush/close lifecycle and scoped sessions
//! - Reject operations with `ClosedDatabase` while no handle is held
//! - Keep the optional index cache coherent with the footer

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::cache::IndexCache;
use crate::config::{Config, SyncStrategy};
use crate::error::{JsonDbError, Result};
use crate::footer::{self, Index};
use crate::storage::{self, Values};

/// The main storage engine
///
/// ## Handle Model
///
/// - Construction creates the file if needed and opens it
/// - `close()` drops the handle and the cached index; `open()` reacquires it
/// - Every data operation checks for a handle first and fails with
///   [`JsonDbError::ClosedDatabase`] when there is none
///
/// One engine per file. Nothing coordinates two engines (or processes) on the
/// same path; concurrent writers can corrupt the footer.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Open handle on the backing file, `None` while closed
    file: Option<File>,

    /// Index cache (only populated when `config.cache_index` is set)
    cache: IndexCache,
}

impl Engine {
    /// Create the backing file if absent and open the engine on it
    pub fn new(config: Config) -> Result<Self> {
        storage::ensure_file(&config.path, config.create_dirs)?;

        let mut engine = Self {
            cache: IndexCache::new(config.cache_index),
            config,
            file: None,
        };
        engine.open()?;
        Ok(engine)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Config::builder().path(path.as_ref()).build())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Acquire the file handle. No-op if already open.
    pub fn open(&mut self) -> Result<()> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.config.path)?;
            self.file = Some(file);
            tracing::info!("Opened database {}", self.config.path.display());
        }
        Ok(())
    }

    /// Push written data to disk. No-op if closed.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
            file.sync_data()?;
        }
        Ok(())
    }

    /// Release the file handle and forget the cached index. No-op if closed.
    pub fn close(&mut self) {
        self.cache.invalidate();
        if self.file.take().is_some() {
            tracing::info!("Closed database {}", self.config.path.display());
        }
    }

    /// Open the engine for the lifetime of the returned guard.
    ///
    /// Dropping the guard closes the engine, including on early return or
    /// unwinding out of the scope.
    pub fn session(&mut self) -> Result<Session<'_>> {
        self.open()?;
        Ok(Session { engine: self })
    }

    // =========================================================================
    // Data Operations
    // =========================================================================

    /// Append key/value pairs, in iteration order.
    ///
    /// Never overwrites: a key added again gains another value, and reads
    /// return every value in append order.
    pub fn add<I, K, V>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let file = self.file.as_mut().ok_or(JsonDbError::ClosedDatabase)?;

        // Stale until the new footer is on disk
        self.cache.invalidate();
        let index = storage::append(file, items)?;

        if self.config.sync_strategy == SyncStrategy::EveryAdd {
            file.sync_data()?;
        }

        self.cache.replace(index);
        Ok(())
    }

    /// Every value stored for each of `keys`. Keys never added are omitted.
    pub fn get_many<I, K>(&mut self, keys: I) -> Result<Values>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let file = self.file.as_mut().ok_or(JsonDbError::ClosedDatabase)?;
        let index = self.cache.resolve(|| footer::load_index(file, false))?;
        let values = storage::read_many(file, &index, keys)?;

        tracing::debug!("Read {} keys", values.len());
        Ok(values)
    }

    /// Every value stored for `key`, in append order. Empty if never added.
    pub fn get(&mut self, key: &str) -> Result<Vec<Value>> {
        let mut values = self.get_many([key])?;
        Ok(values.remove(key).unwrap_or_default())
    }

    /// The current index (footer projection)
    pub fn index(&mut self) -> Result<Index> {
        let file = self.file.as_mut().ok_or(JsonDbError::ClosedDatabase)?;
        let index = self.cache.resolve(|| footer::load_index(file, false))?;
        Ok(index.into_owned())
    }

    /// Every key with at least one record
    pub fn keys(&mut self) -> Result<Vec<String>> {
        Ok(self.index()?.into_keys().collect())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Whether a file handle is currently held
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Whether an index is currently cached
    pub fn is_index_cached(&self) -> bool {
        self.cache.is_populated()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Scoped acquisition of an [`Engine`]: open on creation, closed on drop.
pub struct Session<'a> {
    engine: &'a mut Engine,
}

impl Deref for Session<'_> {
    type Target = Engine;

    fn deref(&self) -> &Engine {
        self.engine
    }
}

impl DerefMut for Session<'_> {
    fn deref_mut(&mut self) -> &mut Engine {
        self.engine
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.engine.close();
    }
}
