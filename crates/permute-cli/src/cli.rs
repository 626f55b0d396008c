//! Command-line argument parsing
//!
//! Supports:
//! - Reading a file or stdin
//! - Any number of selection spans / carets
//! - Seeded shuffling
//! - Writing to a file instead of stdout

use clap::{ArgAction, Parser};
use permute_core::{PermuteCommand, Position, Selection};
use std::path::{Path, PathBuf};

/// Reverse, deduplicate or shuffle whole lines
#[derive(Parser, Debug)]
#[command(
    name = "permute-lines",
    version,
    about = "Reverse, deduplicate or shuffle whole lines of a file"
)]
pub struct CliArgs {
    /// Line command: reverse, unique or shuffle
    #[arg(value_name = "COMMAND")]
    pub command: PermuteCommand,

    /// File to read; omit or pass `-` to read stdin
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Selection `LINE:COL-LINE:COL`, or a caret `LINE:COL` (zero-based, repeatable).
    /// Without any, the whole document is used.
    #[arg(short = 's', long = "select", value_name = "SPAN", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    /// Seed for a reproducible shuffle
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// The command to run, with `--seed` applied to `shuffle`.
    pub fn command(&self) -> PermuteCommand {
        match self.command {
            PermuteCommand::Shuffle { seed } => PermuteCommand::Shuffle {
                seed: self.seed.or(seed),
            },
            other => other,
        }
    }

    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&Path> {
        self.path.as_deref().filter(|p| p.as_os_str() != "-")
    }
}

/// Parse `LINE:COL-LINE:COL` or `LINE:COL`.
pub fn parse_selection(s: &str) -> Result<Selection, String> {
    match s.split_once('-') {
        Some((start, end)) => Ok(Selection::new(
            parse_position(start)?,
            parse_position(end)?,
        )),
        None => Ok(Selection::caret(parse_position(s)?)),
    }
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (line, column) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{s}'"))?;
    let line = line
        .parse::<usize>()
        .map_err(|e| format!("invalid line '{line}': {e}"))?;
    let column = column
        .parse::<usize>()
        .map_err(|e| format!("invalid column '{column}': {e}"))?;
    Ok(Position::new(line, column))
}
