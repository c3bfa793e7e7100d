use anyhow::Result;
use clap::Parser;
use fbe_core::{ByteSource, ReaderSource, Session, TextSource};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fbe")]
#[command(about = "Fixed binary editor: patch bytes in place with ed-style commands")]
struct Args {
    /// Run COMMANDS instead of reading commands from stdin
    #[arg(short = 'e', long = "expression", value_name = "COMMANDS")]
    script: Option<String>,

    /// Suppress size and byte-count echoes
    #[arg(short, long, env = "FBE_SILENT")]
    silent: bool,

    /// File to open before the first command
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the editor protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fbe=warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!("Starting with {:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new(args.silent);

    if let Some(ref file) = args.file
        && let Err(e) = fbe_core::edit_file(&mut session, file, &mut out)
    {
        warn!("Failed to open {:?}: {}", file, e);
        writeln!(out, "?")?;
    }

    let mut input: Box<dyn ByteSource + '_> = match args.script {
        Some(ref script) => Box::new(TextSource::new(script)),
        None => Box::new(ReaderSource::new(io::stdin().lock())),
    };

    fbe_core::run(&mut session, input.as_mut(), &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_and_file() {
        let args = Args::try_parse_from(["fbe", "-e", "0,$p", "image.bin"]).unwrap();
        assert_eq!(args.script.as_deref(), Some("0,$p"));
        assert_eq!(args.file, Some(PathBuf::from("image.bin")));
    }

    #[test]
    fn test_parse_defaults() {
        let args = Args::try_parse_from(["fbe"]).unwrap();
        assert!(args.script.is_none());
        assert!(args.file.is_none());
    }

    #[test]
    fn test_parse_silent_flag() {
        let args = Args::try_parse_from(["fbe", "-s", "image.bin"]).unwrap();
        assert!(args.silent);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["fbe", "-x"]).is_err());
    }

    #[test]
    fn test_missing_script_value_rejected() {
        assert!(Args::try_parse_from(["fbe", "-e"]).is_err());
    }
}
