//! Per-operation engine
//!
//! Opens the backing file inside every call and closes it before returning,
//! so no handle is held between operations and there is nothing to close.
//!
//! The index is reloaded from the footer on every call. Without a held handle
//! the file may change between calls, so `config.cache_index` is not honoured.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, SyncStrategy};
use crate::error::{JsonDbError, Result};
use crate::footer::{self, Index};
use crate::storage::{self, Values};

/// Storage engine that holds no file handle between calls.
///
/// Reads against a file that has disappeared fail with
/// [`JsonDbError::FileNotFound`], or return an empty result when
/// `config.silent_missing` is set. `add` recreates a missing file.
pub struct OneShotEngine {
    config: Config,
}

impl OneShotEngine {
    /// Create the backing file if absent
    pub fn new(config: Config) -> Result<Self> {
        storage::ensure_file(&config.path, config.create_dirs)?;

        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Config::builder().path(path.as_ref()).build())
    }

    /// Append key/value pairs, in iteration order
    pub fn add<I, K, V>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.config.path)?;

        storage::append(&mut file, items)?;

        if self.config.sync_strategy == SyncStrategy::EveryAdd {
            file.sync_data()?;
        }
        Ok(())
    }

    /// Every value stored for each of `keys`. Keys never added are omitted.
    pub fn get_many<I, K>(&self, keys: I) -> Result<Values>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut file = match self.open_existing()? {
            Some(file) => file,
            None => return Ok(Values::new()),
        };

        let index = footer::load_index(&mut file, false)?;
        storage::read_many(&mut file, &index, keys)
    }

    /// Every value stored for `key`, in append order. Empty if never added.
    pub fn get(&self, key: &str) -> Result<Vec<Value>> {
        let mut values = self.get_many([key])?;
        Ok(values.remove(key).unwrap_or_default())
    }

    /// The current index (footer projection)
    pub fn index(&self) -> Result<Index> {
        let mut file = match self.open_existing()? {
            Some(file) => file,
            None => return Ok(Index::new()),
        };

        footer::load_index(&mut file, false)
    }

    /// Every key with at least one record
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.index()?.into_keys().collect())
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the file for reading.
    ///
    /// `Ok(None)` means the file is missing and silent mode is on.
    fn open_existing(&self) -> Result<Option<File>> {
        match File::open(&self.config.path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.config.silent_missing {
                    tracing::debug!("{} missing, returning empty result", self.config.path.display());
                    Ok(None)
                } else {
                    Err(JsonDbError::FileNotFound(self.config.path.clone()))
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
