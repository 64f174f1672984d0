//! Index Footer Module
//!
//! The index lives at the tail of the very file it indexes.
//!
//! ## Responsibilities
//! - Locate the footer by scanning backward for the pointer line
//! - Decode the index (best effort, a damaged footer reads as empty)
//! - Strip the footer before an append so records stay contiguous
//! - Write a fresh footer after an append
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Records (JSON lines, append order)                       │
//! │   {"x":"a"}\n                        <- offset 0          │
//! │   {"y":"b"}\n                        <- offset 10         │
//! │   {"x":"c"}\n                        <- offset 20         │
//! ├──────────────────────────────────────────────────────────┤
//! │ Footer                                                   │
//! │   {"x":[0,20],"y":[10]}\n            <- index_pos (30)    │
//! │   30                                 (no trailing \n)     │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod reader;
mod writer;

use indexmap::IndexMap;

pub use reader::load_index;
pub use writer::write_footer;

/// In-memory projection of the footer: key → record offsets in append order.
/// Keys keep first-append order, so the footer JSON lists them that way.
pub type Index = IndexMap<String, Vec<u64>>;
