//! # fbe-core
//!
//! Core library for `fbe`, a fixed-size binary file patch editor.
//!
//! This crate provides:
//! - Address and region expressions resolved against the editing session
//! - A pending-edit overlay so dumps and searches see unwritten changes
//! - Hexdump rendering and byte pattern search through that overlay
//! - Flushing staged edits back to the file
//! - The command table and read-eval loop driving all of the above

pub mod address;
pub mod command;
pub mod edit;
pub mod error;
pub mod hexdump;
pub mod persist;
pub mod search;
pub mod session;
pub mod stream;

pub use address::{Given, Region, Selection, resolve_address, resolve_region};
pub use command::{Command, Outcome, edit_file, execute, run};
pub use edit::{Edit, EditList, read_hex_data};
pub use error::{Error, Result};
pub use hexdump::{dump_file, dump_reader, render};
pub use persist::{flush, write_edits};
pub use search::{search, search_file, search_reader};
pub use session::{Session, display_width};
pub use stream::{ByteSource, ReaderSource, TextSource};
