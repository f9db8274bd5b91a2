//! The `check` subcommand: validate a script without executing it

use crate::command;
use crate::session;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Parses the header and every command line of a session script, printing
/// each problem with its file line number. Nothing is executed, so this
/// also validates lines a `Q` would cut off.
///
/// # Errors
///
/// Fails when the script cannot be read or any line is malformed.
pub fn check(script: &Path) -> Result<()> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("failed to read session script {}", script.display()))?;

    let mut problems = 0usize;
    let mut lines = source.lines();
    match lines.next() {
        None => {
            println!("  {} line 1: missing bucket count header", "error:".red().bold());
            problems += 1;
        }
        Some(header) => {
            if let Err(err) = session::parse_bucket_count(header) {
                println!("  {} line 1: {err}", "error:".red().bold());
                problems += 1;
            }
        }
    }

    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = command::parse_line(line) {
            // The header was line 1, command lines start at 2.
            println!("  {} line {}: {err}", "error:".red().bold(), index + 2);
            problems += 1;
        }
    }

    if problems == 0 {
        println!("{} {}", "Valid".green().bold(), script.display());
        Ok(())
    } else {
        bail!("{problems} malformed lines in {}", script.display());
    }
}
