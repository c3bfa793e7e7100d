use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Address {address} is past end of file ({end})")]
    AddressOutOfRange { address: u64, end: u64 },

    #[error("Cannot step back {step} from address {cursor}")]
    AddressUnderflow { step: u64, cursor: u64 },

    #[error("Missing address after ','")]
    MissingAddress,

    #[error("Region end {to} is before region start {from}")]
    InvertedRegion { from: u64, to: u64 },

    #[error("Address given without a command")]
    MissingCommand,

    #[error("Unknown command: {0:?}")]
    UnknownCommand(char),

    #[error("Invalid hex digit: {0:?}")]
    InvalidHexDigit(char),

    #[error("Odd number of hex digits")]
    OddHexDigits,

    #[error("No data given")]
    EmptyData,

    #[error("Missing file name")]
    MissingFileName,

    #[error("File name is not valid UTF-8")]
    InvalidFileName,

    #[error("No file is open")]
    NoFile,

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Pattern not found")]
    PatternNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Out of memory: {0}")]
    Resource(#[from] std::collections::TryReserveError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
