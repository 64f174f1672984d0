//! Storage Module
//!
//! The append and read paths over a single log file.
//!
//! ## Responsibilities
//! - Strip the stale footer, append records, write a fresh footer
//! - Resolve keys through the index and decode one record per offset
//!
//! Neither path owns the file handle; the engines in [`crate::engine`] and
//! [`crate::oneshot`] decide when a handle is open.

mod append;
mod read;

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::Path;

use serde_json::Value;

use crate::error::Result;

pub use append::append;
pub use read::read_many;

/// Result of a multi-key read: key → values in append order
pub type Values = BTreeMap<String, Vec<Value>>;

/// Make sure the backing file exists, creating it (and optionally its parent
/// directories) if absent. Existing content is left untouched.
pub(crate) fn ensure_file(path: &Path, create_dirs: bool) -> Result<()> {
    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(())
}
