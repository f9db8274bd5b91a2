//! Command-line entry point for the stilt workbench

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stilt", version, about = "Scoped symbol-table session workbench")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a session script and emit its transcript
    Run {
        /// Path to the session script
        script: PathBuf,
        /// Write the transcript to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a session script without executing it
    Check {
        /// Path to the session script
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { script, output } => stilt::run::run(&script, output.as_deref()),
        Commands::Check { script } => stilt::check::check(&script),
    }
}

/// Enables log output on stderr when `STILT_LOG` is set, for example
/// `STILT_LOG=stilt=debug`. Transcripts on stdout stay clean either way.
fn init_tracing() {
    if let Ok(filter) = EnvFilter::try_from_env("STILT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
