//! Editing session state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::edit::EditList;
use crate::error::{Error, Result};

/// Minimum number of hex digits used to print addresses.
pub const MIN_DISPLAY_WIDTH: usize = 8;

/// Hex digit count needed to print `end`: 8, plus 2 per byte above the low 32 bits.
pub fn display_width(end: u64) -> usize {
    let mut width = MIN_DISPLAY_WIDTH;
    let mut high = end >> 32;
    while high != 0 {
        width += 2;
        high >>= 8;
    }
    width
}

/// Process-wide editing context, passed explicitly to every command.
#[derive(Debug)]
pub struct Session {
    path: Option<PathBuf>,
    cursor: u64,
    end: u64,
    width: usize,
    silent: bool,
    edits: EditList,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Session {
    pub fn new(silent: bool) -> Self {
        Self {
            path: None,
            cursor: 0,
            end: 0,
            width: display_width(0),
            silent,
            edits: EditList::new(),
        }
    }

    /// Open `path` for subsequent commands and return its size in bytes.
    ///
    /// On failure the session is left as it was.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<u64> {
        let path = path.as_ref();
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(Error::NotAFile(path.display().to_string()));
        }

        let size = meta.len();
        if self.path.as_deref() != Some(path) && !self.edits.is_empty() {
            warn!(
                "Discarding {} pending edit(s) for {:?}",
                self.edits.len(),
                self.path
            );
            self.edits.clear();
        }

        self.path = Some(path.to_path_buf());
        self.end = size.saturating_sub(1);
        self.width = display_width(self.end);
        self.cursor = self.end;
        info!("Opened {:?} ({} bytes)", path, size);

        Ok(size)
    }

    /// Path of the open file, or [`Error::NoFile`].
    pub fn require_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or(Error::NoFile)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Move the cursor. Values past `end` are clamped.
    pub fn set_cursor(&mut self, address: u64) {
        self.cursor = address.min(self.end);
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn edits(&self) -> &EditList {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut EditList {
        &mut self.edits
    }

    /// Format an address zero-padded to the session width.
    pub fn format_address(&self, address: u64) -> String {
        format!("{:0width$x}", address, width = self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width(0), 8);
        assert_eq!(display_width(0xFFFF_FFFF), 8);
        assert_eq!(display_width(0x1_0000_0000), 10);
        assert_eq!(display_width(0xFF_FFFF_FFFF), 10);
        assert_eq!(display_width(0x100_0000_0000), 12);
        assert_eq!(display_width(u64::MAX), 16);
    }

    #[test]
    fn test_new_session_has_no_file() {
        let session = Session::new(false);
        assert!(session.path().is_none());
        assert!(matches!(session.require_path(), Err(Error::NoFile)));
        assert_eq!(session.width(), 8);
    }

    #[test]
    fn test_open_sets_end_and_cursor() {
        let file = temp_with(&[0u8; 32]);
        let mut session = Session::new(false);

        assert_eq!(session.open(file.path()).unwrap(), 32);
        assert_eq!(session.end(), 31);
        assert_eq!(session.cursor(), 31);
        assert_eq!(session.path(), Some(file.path()));
    }

    #[test]
    fn test_open_empty_file() {
        let file = temp_with(&[]);
        let mut session = Session::new(false);

        assert_eq!(session.open(file.path()).unwrap(), 0);
        assert_eq!(session.end(), 0);
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_open_missing_file_keeps_session() {
        let file = temp_with(&[1, 2, 3]);
        let mut session = Session::new(false);
        session.open(file.path()).unwrap();

        let err = session.open("/nonexistent/fbe/file.bin").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.path(), Some(file.path()));
        assert_eq!(session.end(), 2);
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(false);
        assert!(matches!(
            session.open(dir.path()),
            Err(Error::NotAFile(_))
        ));
    }

    #[test]
    fn test_open_other_file_discards_edits() {
        let first = temp_with(&[0; 4]);
        let second = temp_with(&[0; 4]);
        let mut session = Session::new(false);
        session.open(first.path()).unwrap();
        session.edits_mut().stage(0, vec![0xAA]).unwrap();

        session.open(first.path()).unwrap();
        assert_eq!(session.edits().len(), 1);

        session.open(second.path()).unwrap();
        assert!(session.edits().is_empty());
    }

    #[test]
    fn test_format_address() {
        let session = Session::new(false);
        assert_eq!(session.format_address(0x1f), "0000001f");
    }
}
