use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::address::Selection;
use crate::edit::read_hex_data;
use crate::error::{Error, Result};
use crate::hexdump::dump_file;
use crate::persist::flush;
use crate::search::search_file;
use crate::session::Session;
use crate::stream::ByteSource;

use super::Outcome;

/// (.)c: stage hex data at the region start.
pub(super) fn change<S: ByteSource + ?Sized>(
    session: &mut Session,
    selection: Selection,
    input: &mut S,
) -> Result<Outcome> {
    let bytes = read_hex_data(input, b'.')?;
    session.require_path()?;
    session.edits_mut().stage(selection.region.from, bytes)?;
    Ok(Outcome::Continue)
}

/// e file
pub(super) fn edit<S, W>(session: &mut Session, input: &mut S, out: &mut W) -> Result<Outcome>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let name = read_file_name(input)?;
    edit_file(session, name, out)?;
    Ok(Outcome::Continue)
}

/// Open `path` in `session` and echo its size unless silent.
pub fn edit_file<W: Write + ?Sized>(
    session: &mut Session,
    path: impl AsRef<Path>,
    out: &mut W,
) -> Result<u64> {
    let size = session.open(path)?;
    if !session.is_silent() {
        writeln!(out, "{}", size)?;
    }
    Ok(size)
}

/// (.,.)p
pub(super) fn print<W: Write + ?Sized>(
    session: &mut Session,
    selection: Selection,
    out: &mut W,
) -> Result<Outcome> {
    dump_file(session, selection.region, out)?;
    session.set_cursor(selection.region.to);
    Ok(Outcome::Continue)
}

pub(super) fn quit(session: &Session) -> Outcome {
    if !session.edits().is_empty() {
        warn!(
            "Quitting with {} unwritten edit(s), {} byte(s)",
            session.edits().len(),
            session.edits().total_bytes()
        );
    }
    Outcome::Quit
}

/// w
pub(super) fn write<W: Write + ?Sized>(session: &mut Session, out: &mut W) -> Result<Outcome> {
    let total = flush(session)?;
    if !session.is_silent() {
        writeln!(out, "{}", total)?;
    }
    Ok(Outcome::Continue)
}

/// (0,$)/hex-pattern
pub(super) fn search<S, W>(
    session: &mut Session,
    selection: Selection,
    input: &mut S,
    out: &mut W,
) -> Result<Outcome>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let pattern = read_hex_data(input, b'\n')?;
    let region = selection.or_to_end(session.end());
    let found = search_file(session, region, &pattern)?.ok_or(Error::PatternNotFound)?;
    writeln!(out, "{}", session.format_address(found))?;
    Ok(Outcome::Continue)
}

/// Read a file name: leading blanks skipped, then a run of non-space bytes.
fn read_file_name<S: ByteSource + ?Sized>(input: &mut S) -> Result<String> {
    let mut c = input.next_byte();
    while matches!(c, Some(b' ' | b'\t')) {
        c = input.next_byte();
    }

    let mut name = Vec::new();
    while let Some(b) = c.filter(|b| b.is_ascii_graphic() || *b >= 0x80) {
        name.try_reserve(1)?;
        name.push(b);
        c = input.next_byte();
    }

    if name.is_empty() {
        return Err(Error::MissingFileName);
    }
    String::from_utf8(name).map_err(|_| Error::InvalidFileName)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::TextSource;

    #[test]
    fn test_read_file_name() {
        let mut src = TextSource::new(" \tdata/image.bin\np");
        assert_eq!(read_file_name(&mut src).unwrap(), "data/image.bin");
        assert_eq!(src.last_byte(), Some(b'\n'));
    }

    #[test]
    fn test_read_file_name_to_end_of_input() {
        let mut src = TextSource::new("a.bin");
        assert_eq!(read_file_name(&mut src).unwrap(), "a.bin");
        assert!(src.at_end());
    }

    #[test]
    fn test_read_file_name_missing() {
        assert!(matches!(
            read_file_name(&mut TextSource::new("  \n")),
            Err(Error::MissingFileName)
        ));
        assert!(matches!(
            read_file_name(&mut TextSource::new("")),
            Err(Error::MissingFileName)
        ));
    }

    #[test]
    fn test_read_file_name_utf8() {
        let mut src = TextSource::new("données.bin");
        assert_eq!(read_file_name(&mut src).unwrap(), "données.bin");
    }

    #[test]
    fn test_edit_file_echo() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut out = Vec::new();

        let mut session = Session::new(false);
        assert_eq!(edit_file(&mut session, file.path(), &mut out).unwrap(), 0);
        assert_eq!(out, b"0\n");

        let mut quiet = Session::new(true);
        out.clear();
        edit_file(&mut quiet, file.path(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
