//! Footer Reader
//!
//! Recovers the index from the trailing footer, optionally truncating it away.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;

use super::Index;

/// Load the index stored in the file's footer.
///
/// The cursor position is restored before returning, whatever the outcome.
///
/// A file without a footer (empty, freshly truncated, or interrupted mid-append)
/// and a file whose footer does not parse both yield an empty index. Only real
/// I/O failures are returned as errors.
///
/// With `truncate` set and a footer successfully decoded, the file is cut at
/// the start of the footer so its end is the end of the last record.
pub fn load_index(file: &mut File, truncate: bool) -> Result<Index> {
    let original_pos = file.stream_position()?;
    let result = locate_and_load(file, truncate);
    file.seek(SeekFrom::Start(original_pos))?;
    result
}

fn locate_and_load(file: &mut File, truncate: bool) -> Result<Index> {
    let end = file.seek(SeekFrom::End(0))?;

    let pointer_pos = match find_pointer_line(file, end)? {
        Some(pos) => pos,
        None => {
            tracing::debug!("No footer present (file size {})", end);
            return Ok(Index::new());
        }
    };

    // Pointer line: decimal offset of the index JSON
    file.seek(SeekFrom::Start(pointer_pos))?;
    let mut tail = Vec::with_capacity((end - pointer_pos) as usize);
    file.read_to_end(&mut tail)?;

    let index_pos = match parse_pointer(&tail) {
        Some(pos) if pos <= pointer_pos => pos,
        _ => {
            tracing::debug!("Last line is not a footer pointer, treating index as empty");
            return Ok(Index::new());
        }
    };

    // Index JSON spans [index_pos, pointer_pos)
    file.seek(SeekFrom::Start(index_pos))?;
    let mut blob = vec![0u8; (pointer_pos - index_pos) as usize];
    file.read_exact(&mut blob)?;

    let index: Index = match serde_json::from_slice(&blob) {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!("Unreadable index footer at offset {}: {}", index_pos, e);
            return Ok(Index::new());
        }
    };

    if truncate {
        file.set_len(index_pos)?;
        tracing::debug!("Truncated footer at offset {}", index_pos);
    }

    tracing::debug!("Loaded index with {} keys from offset {}", index.len(), index_pos);
    Ok(index)
}

/// Scan backward from `end`, one byte at a time, for the newline that ends
/// the index line. Returns `None` when the scan would drop below offset 1.
fn find_pointer_line(file: &mut File, end: u64) -> Result<Option<u64>> {
    let mut pos = end;
    let mut byte = [0u8; 1];

    while pos > 1 {
        file.seek(SeekFrom::Start(pos))?;
        // Reading at EOF yields 0 bytes
        if file.read(&mut byte)? == 1 && byte[0] == b'\n' {
            break;
        }
        pos -= 1;
    }

    if pos < 1 {
        return Ok(None);
    }
    Ok(Some(pos))
}

fn parse_pointer(bytes: &[u8]) -> Option<u64> {
    std::str::from_utf8(bytes).ok()?.trim().parse().ok()
}
