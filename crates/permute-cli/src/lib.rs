//! `permute-lines`: run a permute-core line command over a file or stdin.

pub mod cli;
pub mod logging;

use anyhow::{Context, Result};
use permute_core::{PermuteCommand, Selection, TextDocument};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub use cli::CliArgs;

/// Read input, run the command, write output.
pub fn run(args: &CliArgs) -> Result<()> {
    let input = read_input(args.input_path())?;
    let output = permute_text(&input, args.command(), &args.selections)?;
    write_output(args.output.as_deref(), &output)
}

/// Run `command` over `input` and return the text to write.
///
/// When nothing is selected for permutation the input is returned verbatim.
pub fn permute_text(
    input: &str,
    command: PermuteCommand,
    selections: &[Selection],
) -> Result<String> {
    let mut doc = TextDocument::new(input);
    let delta = command
        .execute(&mut doc, selections)
        .with_context(|| format!("failed to {command} lines"))?;

    match delta {
        Some(delta) => {
            tracing::info!(
                command = %command,
                edits = delta.edits.len(),
                removed_lines = delta.removed_line_breaks(),
                "permuted lines"
            );
            Ok(doc.text_for_saving())
        }
        None => {
            tracing::info!(command = %command, "nothing to permute; output is unchanged");
            Ok(input.to_string())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}
