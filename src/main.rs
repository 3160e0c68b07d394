use std::io::{self, BufRead, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum Error {
    /// relaying the library's error
    #[error(transparent)]
    Huffpack(#[from] huffpack::Error),

    /// just relaying io::Error from stdin or stdout
    #[error("{0}")]
    Io(#[from] io::Error),

    /// asked to read stdin, but it is a terminal
    #[error("refusing to read data from a terminal, pipe it in instead")]
    NoStdin,

    /// symbol argument is neither a single character nor a byte value
    #[error("{0:?} is not a character or a byte value (0-255, 0x00-0xff)")]
    InvalidSymbol(String),

    /// stdin already carries the data, so the symbol has to be an argument
    #[error("give the symbol as an argument when the data comes from stdin")]
    SymbolFromStdin,
}

/// represent all acceptable arguments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    mode: Mode,
}
#[derive(Subcommand)]
enum Mode {
    /// compresses a file
    Compress {
        /// file to compress, `-` for stdin
        input: PathBuf,
        /// where to write the container, stdout when omitted
        output: Option<PathBuf>,
    },

    /// decompresses a file
    Decompress {
        /// container to decompress, `-` for stdin
        input: PathBuf,
        /// where to write the restored data, stdout when omitted
        output: Option<PathBuf>,
    },

    /// prints the code one byte would get when compressing a file
    Lookup {
        /// file the code table is built from, `-` for stdin
        input: PathBuf,
        /// a single character, or a byte value such as 10 or 0x0a;
        /// asked for on stdin when omitted
        symbol: Option<String>,
    },

    /// prints every byte of a file with its code
    Table {
        /// file the code table is built from, `-` for stdin
        input: PathBuf,
    },
}

/// read data from `path`, or from stdin when it is `-`
fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    if path != Path::new("-") {
        return Ok(huffpack::read_file(path)?);
    }
    // abort when there is no input from stdin
    if atty::is(atty::Stream::Stdin) {
        return Err(Error::NoStdin);
    }
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    Ok(data)
}

/// write data to `path`, or to stdout when there is none
fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(path) => Ok(huffpack::write_file(path, data)?),
        None => {
            // prepare stdout with buffering
            let stdout = io::stdout();
            let mut stdout = BufWriter::new(stdout.lock());
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// a lone character stands for itself, anything longer is a byte value
fn parse_symbol(text: &str) -> Result<u8, Error> {
    let invalid = || Error::InvalidSymbol(text.to_string());
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (Some(_), None) => Err(invalid()),
        _ => match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => u8::from_str_radix(hex, 16).map_err(|_| invalid()),
            None => text.parse().map_err(|_| invalid()),
        },
    }
}

/// ask for the symbol on stdin, prompting only when a person is typing
fn prompt_symbol() -> Result<u8, Error> {
    if atty::is(atty::Stream::Stdin) {
        eprint!("Enter character for which you want the Huffman code: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    parse_symbol(line.trim_end_matches(|c| c == '\n' || c == '\r'))
}

fn run(args: Args) -> Result<(), Error> {
    match args.mode {
        Mode::Compress { input, output } => {
            if input != Path::new("-") {
                if let Some(output) = &output {
                    return Ok(huffpack::compress_file(&input, output)?);
                }
            }
            let container = huffpack::compress(&read_input(&input)?)?;
            write_output(output.as_deref(), &container)
        }
        Mode::Decompress { input, output } => {
            if input != Path::new("-") {
                if let Some(output) = &output {
                    return Ok(huffpack::decompress_file(&input, output)?);
                }
            }
            let data = huffpack::decompress(&read_input(&input)?)?;
            write_output(output.as_deref(), &data)
        }
        Mode::Lookup { input, symbol } => {
            let symbol = match symbol {
                Some(symbol) => parse_symbol(&symbol)?,
                None if input == Path::new("-") => return Err(Error::SymbolFromStdin),
                None => prompt_symbol()?,
            };
            let code = if input != Path::new("-") {
                huffpack::lookup_code_in_file(&input, symbol)?
            } else {
                let table = huffpack::code_table(&read_input(&input)?)?;
                huffpack::lookup_code(&table, symbol)?.clone()
            };
            let text = format!(
                "Huffman code of '{}': {}\n",
                std::ascii::escape_default(symbol),
                code
            );
            write_output(None, text.as_bytes())
        }
        Mode::Table { input } => {
            let table = huffpack::code_table(&read_input(&input)?)?;
            write_output(None, table.format_codebook().as_bytes())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // get arguments
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("huffpack: {}", err);
            ExitCode::FAILURE
        }
    }
}
