//! Footer Writer

use std::io::Write;

use crate::error::Result;

use super::Index;

/// Write the two footer lines: the index as one JSON line, then `index_pos`
/// (where that JSON line begins) in decimal with no trailing newline.
pub fn write_footer<W: Write>(writer: &mut W, index: &Index, index_pos: u64) -> Result<()> {
    let mut line = serde_json::to_vec(index)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.write_all(index_pos.to_string().as_bytes())?;
    Ok(())
}
