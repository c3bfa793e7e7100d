use crate::error::{Error, Result};
use crate::session::Session;
use crate::stream::ByteSource;

use super::resolve_address;

/// Inclusive byte range `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub from: u64,
    pub to: u64,
}

impl Region {
    pub fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }

    /// Single-address region.
    pub fn point(address: u64) -> Self {
        Self::new(address, address)
    }

    pub fn contains(&self, address: u64) -> bool {
        self.from <= address && address <= self.to
    }

    pub fn len(&self) -> u64 {
        self.to - self.from + 1
    }
}

/// How many addresses the user actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Given {
    Omitted,
    Single,
    Range,
}

/// A resolved region plus how it was written, so commands can apply their own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub region: Region,
    pub given: Given,
}

impl Selection {
    /// Region with `to` widened to `end` when only a start (or nothing) was given.
    ///
    /// With no address at all the region covers the whole file.
    pub fn or_to_end(&self, end: u64) -> Region {
        match self.given {
            Given::Omitted => Region::new(0, end),
            Given::Single => Region::new(self.region.from, end),
            Given::Range => self.region,
        }
    }
}

/// Resolve `[address[,address]]`.
///
/// No address defaults to `(cursor, cursor)`. A `,` must be followed by a
/// second address no smaller than the first.
pub fn resolve_region<S: ByteSource + ?Sized>(session: &Session, src: &mut S) -> Result<Selection> {
    let Some(from) = resolve_address(session, src)? else {
        return Ok(Selection {
            region: Region::point(session.cursor()),
            given: Given::Omitted,
        });
    };

    if src.last_byte() != Some(b',') {
        return Ok(Selection {
            region: Region::point(from),
            given: Given::Single,
        });
    }

    let to = resolve_address(session, src)?.ok_or(Error::MissingAddress)?;
    if to < from {
        return Err(Error::InvertedRegion { from, to });
    }

    Ok(Selection {
        region: Region::new(from, to),
        given: Given::Range,
    })
}
