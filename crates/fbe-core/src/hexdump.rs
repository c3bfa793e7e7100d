//! Hexdump rendering through the edit overlay.
//!
//! # Output Format
//!
//! ```text
//! Address   0  1  2  3  4  5  6  7   8  9  a  b  c  d  e  f
//! 00000000  48 65 6c 6c 6f 20 57 6f  72 6c 64 00 00 00 00 00  |Hello World.....|
//! 00000010
//! ```
//!
//! Rows are 16-byte aligned. Columns outside the region, or past the end
//! of the file, are blank. The last line is the exclusive end of the region.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::address::Region;
use crate::error::Result;
use crate::session::Session;
use crate::stream::{ByteSource, ReaderSource};

const ROW: u64 = 16;

/// Dump `region` of the session's open file to `out`.
pub fn dump_file<W: Write + ?Sized>(session: &Session, region: Region, out: &mut W) -> Result<()> {
    let mut file = File::open(session.require_path()?)?;
    file.seek(SeekFrom::Start(region.from))?;
    dump_reader(session, region, file, out)
}

/// Dump `region` from `reader` positioned at `region.from`.
///
/// A read error fails the dump after the rows already rendered.
pub fn dump_reader<R, W>(session: &Session, region: Region, reader: R, out: &mut W) -> Result<()>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut src = ReaderSource::new(reader);
    render(session, region, &mut src, out)?;
    match src.take_error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Render `region`, reading file bytes from `file` positioned at `region.from`.
///
/// Reads are forward-only. Once `file` runs out, every remaining column is
/// blank, even if a staged edit covers it.
pub fn render<S, W>(session: &Session, region: Region, file: &mut S, out: &mut W) -> Result<()>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let width = session.width();
    let size = region.to.saturating_add(1);
    let start = region.from & !(ROW - 1);
    let stop = size.saturating_add(ROW - 1) & !(ROW - 1);

    writeln!(
        out,
        "{:<width$.width$}  0  1  2  3  4  5  6  7   8  9  a  b  c  d  e  f",
        "Address"
    )?;

    let mut over = false;
    let mut ascii = String::with_capacity(ROW as usize);
    for i in start..stop {
        if i % ROW == 0 {
            write!(out, "{:0width$x}  ", i)?;
        }

        let mut byte = None;
        if !over && region.contains(i) {
            match file.next_byte() {
                Some(b) => byte = Some(session.edits().byte_at(i).unwrap_or(b)),
                None => over = true,
            }
        }

        match byte {
            Some(b) => {
                write!(out, "{:02x} ", b)?;
                ascii.push(printable(b));
            }
            None => {
                write!(out, "   ")?;
                ascii.push('.');
            }
        }

        if i % 8 == 7 {
            write!(out, " ")?;
        }
        if i % ROW == ROW - 1 {
            writeln!(out, "|{}|", ascii)?;
            ascii.clear();
        }
    }

    writeln!(out, "{:0width$x}", size)?;
    Ok(())
}

fn printable(b: u8) -> char {
    if (0x20..0x7F).contains(&b) {
        b as char
    } else {
        '.'
    }
}
