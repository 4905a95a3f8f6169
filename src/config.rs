use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_COMPRESSED: &str = "compressed.huff";
pub const DEFAULT_DECOMPRESSED: &str = "decompressed.txt";

pub const USAGE: &str = "\
usage: huffpack compress <input> [output]     (default output: compressed.huff)
       huffpack decompress <input> [output]   (default output: decompressed.txt)
       huffpack                               (interactive)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    fn default_output(self) -> PathBuf {
        match self {
            Mode::Compress => PathBuf::from(DEFAULT_COMPRESSED),
            Mode::Decompress => PathBuf::from(DEFAULT_DECOMPRESSED),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no operation given")]
    MissingMode,
    #[error("unknown operation '{0}'")]
    UnknownMode(String),
    #[error("no input path given")]
    MissingInput,
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("failed to read from terminal: {0}")]
    Prompt(#[from] io::Error),
}

/// What one invocation of the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Config {
    /// Parses `<mode> <input> [output]`, program name already stripped.
    pub fn from_args<I, S>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let mode = match args.next().as_deref() {
            Some("compress" | "c") => Mode::Compress,
            Some("decompress" | "d") => Mode::Decompress,
            Some(other) => return Err(ConfigError::UnknownMode(other.to_string())),
            None => return Err(ConfigError::MissingMode),
        };
        let input = args.next().map(PathBuf::from).ok_or(ConfigError::MissingInput)?;
        let output = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| mode.default_output());
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        Ok(Config {
            mode,
            input,
            output,
        })
    }

    /// Asks for the operation and the input path. The output always goes
    /// to the fixed default name.
    pub fn from_prompt<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<Config, ConfigError> {
        write!(
            out,
            "Select Operation:\n\
             1. Compress a file to     -> {DEFAULT_COMPRESSED}\n\
             2. Decompress a file to   -> {DEFAULT_DECOMPRESSED}\n\
             Enter choice (1 or 2): "
        )?;
        out.flush()?;
        let choice = read_token(&mut input)?;
        let mode = match choice.as_str() {
            "1" => Mode::Compress,
            "2" => Mode::Decompress,
            "" => return Err(ConfigError::MissingMode),
            _ => return Err(ConfigError::UnknownMode(choice)),
        };

        write!(out, "Please enter the file path with respect to current directory : ")?;
        out.flush()?;
        let path = read_token(&mut input)?;
        if path.is_empty() {
            return Err(ConfigError::MissingInput);
        }

        Ok(Config {
            mode,
            input: PathBuf::from(path),
            output: mode.default_output(),
        })
    }
}

fn read_token<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
