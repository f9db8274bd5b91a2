//! The `run` subcommand: execute a session script

use crate::session;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Executes a session script. The transcript goes to `output` when one is
/// given, otherwise straight to stdout with no status noise mixed in, so
/// piped output stays diffable.
///
/// # Errors
///
/// Fails when the script cannot be read, its header is malformed, or the
/// transcript cannot be written.
pub fn run(script: &Path, output: Option<&Path>) -> Result<()> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("failed to read session script {}", script.display()))?;
    let transcript = session::run_script(&source)
        .with_context(|| format!("failed to run session script {}", script.display()))?;

    if let Some(path) = output {
        fs::write(path, &transcript)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        println!(
            "{} {} -> {}",
            "Finished".green().bold(),
            script.display(),
            path.display()
        );
    } else {
        print!("{transcript}");
    }
    Ok(())
}
