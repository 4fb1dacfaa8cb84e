//! Converts the C++ doc comments of the native graphics headers into Rust
//! doc comments.
//!
//! Reads a comment from a file (or stdin) and writes the converted `///`
//! block to stdout (or `--output`).

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod convert;
mod token;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Comment to convert, stdin when omitted
    input: Option<PathBuf>,

    /// Write the converted comment here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let converted = convert::convert(&source);
    log::debug!(
        "converted {} lines",
        convert::lines(&converted).len()
    );

    match &cli.output {
        Some(path) => fs::write(path, converted)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout().write_all(converted.as_bytes())?,
    }
    Ok(())
}
