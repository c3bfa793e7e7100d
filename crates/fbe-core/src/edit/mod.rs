//! Pending edits and the overlay view built from them.
//!
//! Edits are staged byte replacements that live in memory until a flush.
//! Reads that go through [`EditList::byte_at`] see the newest staged byte
//! for an address; addresses no edit covers fall through to the file.

mod input;

pub use input::read_hex_data;

use crate::address::Region;
use crate::error::{Error, Result};

/// A staged replacement of `region` with `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    region: Region,
    bytes: Vec<u8>,
}

impl Edit {
    /// Build an edit starting at `from`. The region is derived from the byte count.
    pub fn new(from: u64, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::EmptyData);
        }
        let to = from.saturating_add(bytes.len() as u64 - 1);
        Ok(Self {
            region: Region::new(from, to),
            bytes,
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn contains(&self, address: u64) -> bool {
        self.region.contains(address)
    }

    fn byte_at(&self, address: u64) -> Option<u8> {
        let offset = address.checked_sub(self.region.from)?;
        self.bytes.get(usize::try_from(offset).ok()?).copied()
    }
}

/// Ordered list of pending edits, oldest first.
#[derive(Debug, Clone, Default)]
pub struct EditList {
    edits: Vec<Edit>,
}

impl EditList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Stage `bytes` at `from` as a new edit.
    pub fn stage(&mut self, from: u64, bytes: Vec<u8>) -> Result<()> {
        self.append(Edit::new(from, bytes)?);
        Ok(())
    }

    /// Overlay lookup: the byte of the newest edit covering `address`.
    ///
    /// `None` means no edit covers it and the caller should read the file.
    pub fn byte_at(&self, address: u64) -> Option<u8> {
        self.edits
            .iter()
            .rev()
            .find(|edit| edit.contains(address))
            .and_then(|edit| edit.byte_at(address))
    }

    pub fn clear(&mut self) {
        self.edits.clear();
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Total staged byte count across all edits.
    pub fn total_bytes(&self) -> u64 {
        self.edits.iter().map(|e| e.bytes.len() as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edit> {
        self.edits.iter()
    }
}
