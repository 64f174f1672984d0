//! Record encoding
//!
//! A record is one line holding a single-key JSON object: `{"key":value}\n`.

use serde_json::{Map, Value};

use crate::error::{JsonDbError, Result};

/// Encode one record line, trailing newline included
pub fn encode(key: &str, value: Value) -> Result<Vec<u8>> {
    let mut object = Map::with_capacity(1);
    object.insert(key.to_owned(), value);

    let mut line = serde_json::to_vec(&object)?;
    line.push(b'\n');
    Ok(line)
}

/// Decode the record line found at `offset` into its value(s)
///
/// A well-formed record holds exactly one entry; any extra entries are
/// returned in document order rather than dropped.
pub fn decode(line: &[u8], offset: u64) -> Result<Vec<Value>> {
    let object: Map<String, Value> = serde_json::from_slice(line)
        .map_err(|source| JsonDbError::CorruptRecord { offset, source })?;
    Ok(object.into_iter().map(|(_, value)| value).collect())
}
