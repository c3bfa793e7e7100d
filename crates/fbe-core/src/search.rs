//! Byte pattern search through the edit overlay.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::address::Region;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::stream::{ByteSource, ReaderSource};

/// Search `region` of the session's open file for `pattern`.
pub fn search_file(session: &Session, region: Region, pattern: &[u8]) -> Result<Option<u64>> {
    let mut file = File::open(session.require_path()?)?;
    file.seek(SeekFrom::Start(region.from))?;
    search_reader(session, region, file, pattern)
}

/// Search `region` of `reader` positioned at `region.from`.
///
/// A read error fails the search unless the pattern was already found.
pub fn search_reader<R: Read>(
    session: &Session,
    region: Region,
    reader: R,
    pattern: &[u8],
) -> Result<Option<u64>> {
    let mut src = ReaderSource::new(reader);
    let found = search(session, region, &mut src, pattern)?;
    match (found, src.take_error()) {
        (None, Some(e)) => Err(e.into()),
        (found, _) => Ok(found),
    }
}

/// Scan `region` for the first occurrence of `pattern` and return the
/// address of its first byte.
///
/// `file` must be positioned at `region.from`. The matcher is streaming and
/// only backs up one byte on a mismatch, so patterns with a repeated prefix
/// (`aab` in `aaab`) can be missed.
pub fn search<S: ByteSource + ?Sized>(
    session: &Session,
    region: Region,
    file: &mut S,
    pattern: &[u8],
) -> Result<Option<u64>> {
    let Some(&first) = pattern.first() else {
        return Err(Error::EmptyData);
    };
    let last = pattern.len() - 1;

    let mut matched = 0usize;
    for address in region.from..=region.to {
        let file_byte = file.next_byte();
        let byte = session.edits().byte_at(address).or(file_byte);

        if byte == Some(pattern[matched]) {
            if matched == last {
                let found = address - last as u64;
                debug!("Pattern found at {:#x}", found);
                return Ok(Some(found));
            }
            matched += 1;
        } else {
            matched = usize::from(byte == Some(first));
        }
    }

    Ok(None)
}
