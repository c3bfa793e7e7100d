use crate::error::{Error, Result};
use crate::stream::ByteSource;

/// Read hex-digit pairs from `src` until `terminator` or end of data.
///
/// Whitespace between digits is skipped. A non-hex character or an odd
/// number of digits fails the whole read and nothing partial is returned.
pub fn read_hex_data<S: ByteSource + ?Sized>(src: &mut S, terminator: u8) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut high: Option<u8> = None;

    while let Some(c) = src.next_byte() {
        if c == terminator {
            break;
        }
        if c.is_ascii_whitespace() || c == b'\x0b' {
            continue;
        }

        let nibble = hex_value(c).ok_or(Error::InvalidHexDigit(char::from(c)))?;
        match high.take() {
            None => high = Some(nibble),
            Some(h) => {
                data.try_reserve(1)?;
                data.push((h << 4) | nibble);
            }
        }
    }

    if high.is_some() {
        return Err(Error::OddHexDigits);
    }
    Ok(data)
}

fn hex_value(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}
