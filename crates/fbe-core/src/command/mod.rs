//! Command table and the read-eval loop.
//!
//! Each command is `[address[,address]] COMMAND [trailer]`:
//!
//! | Command | Trailer                     | Action                                 |
//! |---------|-----------------------------|----------------------------------------|
//! | `c`     | hex pairs ending with `.`   | stage a change at the region start     |
//! | `e`     | file name                   | open a file, echo its size             |
//! | `p`     |                             | hexdump the region, move the cursor    |
//! | `q`     |                             | quit                                   |
//! | `w`     |                             | flush pending edits, echo bytes written |
//! | `/`     | hex pairs ending at newline | search, echo the match address         |
//!
//! A failed command prints `?` and the loop carries on.

mod handlers;

pub use handlers::edit_file;

use std::io::Write;

use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::address::{Given, resolve_region};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::stream::ByteSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Change,
    Edit,
    Print,
    Quit,
    Write,
    Search,
}

impl Command {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'c' => Some(Self::Change),
            b'e' => Some(Self::Edit),
            b'p' => Some(Self::Print),
            b'q' => Some(Self::Quit),
            b'w' => Some(Self::Write),
            b'/' => Some(Self::Search),
            _ => None,
        }
    }

}

/// What the loop does after a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Parse and run one command from `input`.
///
/// Input that ends where a command byte is expected yields [`Outcome::Quit`],
/// unless an address was given, which is [`Error::MissingCommand`].
pub fn execute<S, W>(session: &mut Session, input: &mut S, out: &mut W) -> Result<Outcome>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    let selection = resolve_region(session, input)?;

    let Some(b) = input.last_byte() else {
        if selection.given != Given::Omitted {
            return Err(Error::MissingCommand);
        }
        debug!("Input exhausted");
        return Ok(Outcome::Quit);
    };
    let command = Command::from_byte(b).ok_or(Error::UnknownCommand(char::from(b)))?;
    debug!("Running {} on {:?}", command, selection);

    match command {
        Command::Change => handlers::change(session, selection, input),
        Command::Edit => handlers::edit(session, input, out),
        Command::Print => handlers::print(session, selection, out),
        Command::Quit => Ok(handlers::quit(session)),
        Command::Write => handlers::write(session, out),
        Command::Search => handlers::search(session, selection, input, out),
    }
}

/// Run commands until `q` or end of input.
///
/// Failed commands print `?`. Only a failure to write to `out` ends the loop early.
pub fn run<S, W>(session: &mut Session, input: &mut S, out: &mut W) -> std::io::Result<()>
where
    S: ByteSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        match execute(session, input, out) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue) => {}
            Err(e) => {
                debug!("Command failed: {}", e);
                writeln!(out, "?")?;
            }
        }
        out.flush()?;

        if input.at_end() {
            break;
        }
    }
    out.flush()
}
