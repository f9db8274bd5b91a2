//! Integration test utilities for the stilt workbench

use anyhow::Result;

/// Runs a session script through the same pipeline the CLI uses and
/// returns its transcript.
///
/// # Errors
///
/// Returns an error when the script has no usable bucket-count header.
pub fn transcript(script: &str) -> Result<String> {
    Ok(stilt::session::run_script(script)?)
}
