//! Read path

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};

use crate::error::Result;
use crate::footer::Index;
use crate::record;

use super::Values;

/// Read every value recorded for `keys`, following the offsets in `index`.
///
/// Keys with no offsets are left out of the result. Values for each key come
/// back in offset order, which is append order.
pub fn read_many<I, K>(file: &mut File, index: &Index, keys: I) -> Result<Values>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    let mut reader = BufReader::new(file);
    let mut results = Values::new();
    let mut line = Vec::new();

    for key in keys {
        let key = key.as_ref();
        let offsets = match index.get(key) {
            Some(offsets) if !offsets.is_empty() => offsets,
            _ => continue,
        };

        let mut values = Vec::with_capacity(offsets.len());
        for &offset in offsets {
            reader.seek(SeekFrom::Start(offset))?;
            line.clear();
            reader.read_until(b'\n', &mut line)?;
            values.extend(record::decode(&line, offset)?);
        }
        results.insert(key.to_owned(), values);
    }

    Ok(results)
}
