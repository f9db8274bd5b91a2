//! Session workbench around the `st-symtab` engine
//!
//! Everything the `stilt` binary does lives here so tests can drive it
//! directly: parsing script commands, running sessions into transcripts,
//! and the `run`/`check` subcommand implementations.

pub mod check;
pub mod command;
pub mod run;
pub mod session;

pub use command::{Command, CommandError};
pub use session::{run_script, ScriptError, Session};
