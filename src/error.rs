//! Error types for jsondb
//!
//! Provides a unified error type for all operations.
//!
//! A damaged index footer is deliberately NOT an error: the footer loader
//! degrades to an empty index instead (see [`crate::footer`]).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using JsonDbError
pub type Result<T> = std::result::Result<T, JsonDbError>;

/// Unified error type for jsondb operations
#[derive(Debug, Error)]
pub enum JsonDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Database is closed")]
    ClosedDatabase,

    #[error("Database file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record at offset {offset}: {source}")]
    CorruptRecord {
        offset: u64,
        #[source]
        source: serde_json::Error,
    },
}
