//! Flushing pending edits to disk.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use tracing::{debug, info};

use crate::edit::EditList;
use crate::error::Result;
use crate::session::Session;

/// Write every pending edit to the open file in insertion order, then clear
/// the list. Returns the number of bytes written.
///
/// The first failing seek or write aborts the flush. Edits already written
/// stay on disk and the whole list stays pending.
pub fn flush(session: &mut Session) -> Result<u64> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(session.require_path()?)?;

    let total = write_edits(session.edits(), &mut file)?;

    info!("Flushed {} edit(s), {} byte(s)", session.edits().len(), total);
    session.edits_mut().clear();
    Ok(total)
}

/// Seek to and write each edit in order, stopping at the first failure.
pub fn write_edits<F: Write + Seek>(edits: &EditList, file: &mut F) -> Result<u64> {
    let mut total = 0u64;
    for edit in edits.iter() {
        let region = edit.region();
        file.seek(SeekFrom::Start(region.from))?;
        file.write_all(edit.bytes())?;
        debug!("Wrote {} byte(s) at {:#x}", region.len(), region.from);
        total += region.len();
    }
    file.flush()?;
    Ok(total)
}
