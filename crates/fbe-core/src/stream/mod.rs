//! Byte sources for command input and file reads.
//!
//! Both the command parser and the file scanners consume bytes one at a
//! time through [`ByteSource`]:
//!
//! - [`TextSource`] reads from an in-memory script (the `-e` flag, or a
//!   file name given on the command line)
//! - [`ReaderSource`] reads from any [`std::io::Read`], which covers
//!   stdin and open files
//!
//! The last byte read stays available as the lookahead, which is how the
//! parser hands the byte following an address over to the command table.

mod source;

pub use source::*;

#[cfg(test)]
pub(crate) use source::tests;
