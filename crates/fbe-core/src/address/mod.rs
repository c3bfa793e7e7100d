//! Address and region expressions.
//!
//! ```text
//! region  := [address [ "," address ]]
//! address := digits | "$" | "." | "-" [digits] | "+" [digits]
//! ```
//!
//! Digits are decimal offsets, `$` is the last offset of the file, `.` is
//! the cursor, and `-`/`+` step backward/forward from the cursor (by 1 when
//! no digits follow). One form is consumed per address. Every resolved
//! address lies in `0..=end`.

mod region;

pub use region::{Given, Region, Selection, resolve_region};

use crate::error::{Error, Result};
use crate::session::Session;
use crate::stream::ByteSource;

/// Resolve one address expression, skipping leading whitespace.
///
/// Returns `Ok(None)` when no address token is present; the unrecognised
/// byte is left as the source's lookahead.
pub fn resolve_address<S: ByteSource + ?Sized>(session: &Session, src: &mut S) -> Result<Option<u64>> {
    let end = session.end();
    let cursor = session.cursor();

    let mut c = src.next_byte();
    while c.is_some_and(|b| b.is_ascii_whitespace()) {
        c = src.next_byte();
    }

    let address = match c {
        Some(b) if b.is_ascii_digit() => {
            check_in_range(read_number(src, b), end)?
        }
        Some(b'$') => {
            src.next_byte();
            end
        }
        Some(b'.') => {
            src.next_byte();
            cursor
        }
        Some(b'-') => {
            let step = read_step(src);
            cursor
                .checked_sub(step)
                .ok_or(Error::AddressUnderflow { step, cursor })?
        }
        Some(b'+') => {
            let step = read_step(src);
            let address = cursor.checked_add(step).ok_or(Error::AddressOutOfRange {
                address: u64::MAX,
                end,
            })?;
            check_in_range(address, end)?
        }
        _ => return Ok(None),
    };

    Ok(Some(address))
}

fn check_in_range(address: u64, end: u64) -> Result<u64> {
    if address > end {
        return Err(Error::AddressOutOfRange { address, end });
    }
    Ok(address)
}

/// Accumulate decimal digits starting with `first`; stops on the first non-digit.
///
/// Saturates at `u64::MAX`, which is always out of range for a real file.
fn read_number<S: ByteSource + ?Sized>(src: &mut S, first: u8) -> u64 {
    let mut n = u64::from(first - b'0');
    while let Some(d) = src.next_byte().filter(u8::is_ascii_digit) {
        n = n.saturating_mul(10).saturating_add(u64::from(d - b'0'));
    }
    n
}

/// Step after a `+` or `-`: the following digits, or 1 when none follow.
fn read_step<S: ByteSource + ?Sized>(src: &mut S) -> u64 {
    match src.next_byte() {
        Some(d) if d.is_ascii_digit() => read_number(src, d),
        _ => 1,
    }
}
