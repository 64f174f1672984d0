//! # jsondb
//!
//! A minimal single-file, append-only record store:
//! - Records are JSON lines, one `{key: value}` object each
//! - A key → byte-offset index is kept as a footer at the end of the same file
//! - Reads seek straight to recorded offsets instead of scanning the log
//! - Values are never overwritten; repeated keys accumulate
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │   Engine + cache     │     │    OneShotEngine     │
//! │  (holds one handle)  │     │ (handle per call)    │
//! └──────────┬───────────┘     └──────────┬───────────┘
//!            └─────────────┬──────────────┘
//!                          ▼
//!              ┌───────────────────────┐
//!              │        Storage        │
//!              │  append / read_many   │
//!              └───────────┬───────────┘
//!                          ▼
//!              ┌───────────────────────┐
//!              │        Footer         │
//!              │ load_index / write    │
//!              └───────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use jsondb::Engine;
//! use serde_json::json;
//!
//! let mut db = Engine::open_path("people.jsonl")?;
//! db.add([("alice", 30), ("bob", 41)])?;
//! db.add([("alice", 31)])?;
//! assert_eq!(db.get("alice")?, vec![json!(30), json!(31)]);
//! # Ok::<(), jsondb::JsonDbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod footer;
pub mod record;
pub mod storage;
pub mod cache;
pub mod engine;
pub mod oneshot;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JsonDbError, Result};
pub use config::{Config, SyncStrategy};
pub use engine::{Engine, Session};
pub use footer::Index;
pub use oneshot::OneShotEngine;
pub use storage::Values;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of jsondb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
