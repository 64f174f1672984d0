//! Append path

use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};

use serde::Serialize;

use crate::error::Result;
use crate::footer::{self, Index};
use crate::record;

/// Append `items` to the log and rewrite the footer.
///
/// Steps:
/// 1. Encode every item (a value that cannot be encoded aborts before the
///    file is touched)
/// 2. Load the index and truncate the old footer away
/// 3. Position after the last record's newline
/// 4. Write each record, recording its offset under its key
/// 5. Write the new footer
///
/// Returns the index as written to the new footer.
pub fn append<I, K, V>(file: &mut File, items: I) -> Result<Index>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Serialize,
{
    let mut lines = Vec::new();
    for (key, value) in items {
        let key = key.into();
        let line = record::encode(&key, serde_json::to_value(value)?)?;
        lines.push((key, line));
    }

    let mut index = footer::load_index(file, true)?;
    let mut offset = seek_append_position(file)?;
    let index_before = index.len();

    let mut writer = BufWriter::new(&mut *file);
    for (key, line) in &lines {
        index.entry(key.clone()).or_default().push(offset);
        writer.write_all(line)?;
        offset += line.len() as u64;
    }

    let index_pos = offset;
    footer::write_footer(&mut writer, &index, index_pos)?;
    writer.flush()?;

    tracing::debug!(
        "Appended {} records ({} new keys), footer at offset {}",
        lines.len(),
        index.len() - index_before,
        index_pos
    );

    Ok(index)
}

/// Seek to where the next record starts and return that offset.
///
/// Backs up one byte from the end to look at the previous record's
/// terminator. A log whose tail lacks a newline (e.g. an unreadable footer
/// left in place) gets one, so two records never share a line.
fn seek_append_position(file: &mut File) -> Result<u64> {
    let end = file.seek(SeekFrom::End(0))?;
    if end == 0 {
        return Ok(0);
    }

    file.seek(SeekFrom::Start(end - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;

    if last[0] == b'\n' {
        return Ok(end);
    }
    file.write_all(b"\n")?;
    Ok(end + 1)
}
