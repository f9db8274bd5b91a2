//! Session scripts and their transcripts
//!
//! A session script is line-oriented: a bucket-count header, then one
//! command per line. Running a script produces a transcript interleaving
//! each echoed command with the table's response, which is the format the
//! golden tests pin down:
//!
//! ```text
//! 	ScopeTable# 1 created
//! Cmd 1: I x INT
//! 	Inserted in ScopeTable# 1 at position 1, 1
//! Cmd 2: Q
//! 	ScopeTable# 1 removed
//! ```

use crate::command::{self, Command};
use st_symtab::{ScopeId, Symbol, SymbolTable};
use std::fmt;
use std::num::NonZeroU32;
use thiserror::Error;

/// Failure to start a script at all. Individual malformed commands are
/// reported inside the transcript instead, and never abort the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script has no header line.
    #[error("session script is empty")]
    Empty,
    /// The header is not a positive bucket count.
    #[error("invalid bucket count '{0}' in the script header")]
    InvalidBucketCount(String),
}

/// Runs a whole session script and returns its transcript.
///
/// The first line is the bucket count; every following line is echoed as
/// `Cmd N: line` and executed. Processing stops at `Q` or at end of
/// input, whichever comes first; lines after `Q` are not even echoed.
///
/// # Errors
///
/// Fails only on a missing or malformed header.
pub fn run_script(source: &str) -> Result<String, ScriptError> {
    let mut lines = source.lines();
    let header = lines.next().ok_or(ScriptError::Empty)?;
    let bucket_count = parse_bucket_count(header)?;

    let mut session = Session::new(bucket_count);
    let mut number = 0;
    for line in lines {
        if session.is_finished() {
            break;
        }
        number += 1;
        session.step(number, line);
    }
    tracing::debug!(commands = number, "session complete");
    Ok(session.into_transcript())
}

/// Parses the bucket-count header line.
pub(crate) fn parse_bucket_count(header: &str) -> Result<NonZeroU32, ScriptError> {
    let text = header.trim();
    text.parse()
        .map_err(|_| ScriptError::InvalidBucketCount(text.to_owned()))
}

/// An in-flight session: one symbol table plus the transcript so far.
///
/// `Q` consumes the table; after that the session is finished and further
/// steps are ignored without being echoed.
#[derive(Debug)]
pub struct Session {
    table: Option<SymbolTable>,
    transcript: String,
}

impl Session {
    /// Opens a session, announcing the root scope.
    #[must_use]
    pub fn new(bucket_count: NonZeroU32) -> Self {
        let mut session = Self {
            table: Some(SymbolTable::new(bucket_count)),
            transcript: String::new(),
        };
        session.emit(&format!("\tScopeTable# {} created", ScopeId::ROOT));
        session
    }

    /// Whether `Q` has already run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.table.is_none()
    }

    /// The transcript accumulated so far.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Ends the session and hands the transcript over.
    #[must_use]
    pub fn into_transcript(self) -> String {
        self.transcript
    }

    /// Echoes one script line and executes it. Blank lines are echoed
    /// only; malformed lines get their rejection as the response.
    pub fn step(&mut self, number: usize, line: &str) {
        if self.is_finished() {
            return;
        }
        self.emit(&format!("Cmd {number}: {line}"));
        if line.trim().is_empty() {
            return;
        }
        match command::parse_line(line) {
            Ok(command) => self.execute(command),
            Err(err) => self.emit(&format!("\t{err}")),
        }
    }

    /// Runs one already-parsed command against the table.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Insert {
                name,
                kind,
                descriptor,
            } => self.insert(name, kind, descriptor),
            Command::Lookup { name } => self.lookup(&name),
            Command::Delete { name } => self.delete(&name),
            Command::PrintCurrent => self.print_current(),
            Command::PrintAll => self.print_all(),
            Command::EnterScope => self.enter_scope(),
            Command::ExitScope => self.exit_scope(),
            Command::Quit => self.quit(),
        }
    }

    fn insert(&mut self, name: String, kind: String, descriptor: Option<String>) {
        let mut symbol = Symbol::new(name, kind);
        if let Some(descriptor) = descriptor {
            symbol = symbol.with_descriptor(descriptor);
        }
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let outcome = table.insert(symbol);
        match outcome {
            Ok(placed) => self.emit(&format!(
                "\tInserted in ScopeTable# {} at position {}",
                placed.scope, placed.slot
            )),
            Err(err) => self.emit(&format!(
                "\t'{}' already exists in the current ScopeTable",
                err.name
            )),
        }
    }

    fn lookup(&mut self, name: &str) {
        let Some(table) = self.table.as_ref() else {
            return;
        };
        let resolution = table.lookup(name);
        let located = resolution.slot.map(|slot| (resolution.scope, slot));
        match located {
            Some((scope, slot)) => self.emit(&format!(
                "\t'{name}' found in ScopeTable# {scope} at position {slot}"
            )),
            None => self.emit(&format!("\t'{name}' not found in any of the ScopeTables")),
        }
    }

    fn delete(&mut self, name: &str) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let outcome = table.remove(name);
        match outcome {
            Ok(placed) => self.emit(&format!(
                "\tDeleted '{name}' from ScopeTable# {} at position {}",
                placed.scope, placed.slot
            )),
            Err(_) => self.emit("\tNot found in the current ScopeTable"),
        }
    }

    fn print_current(&mut self) {
        self.append_render(|table, out| table.render_current(out));
    }

    fn print_all(&mut self) {
        self.append_render(|table, out| table.render_all(out));
    }

    /// Appends a scope render to the transcript. Rendering into a `String`
    /// cannot fail, so the discarded result carries no information.
    fn append_render(&mut self, render: impl FnOnce(&SymbolTable, &mut String) -> fmt::Result) {
        if let Some(table) = self.table.as_ref() {
            let _ = render(table, &mut self.transcript);
        }
    }

    fn enter_scope(&mut self) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        let id = table.enter_scope();
        self.emit(&format!("\tScopeTable# {id} created"));
    }

    fn exit_scope(&mut self) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        // Exiting the root is refused, and the refusal is silent in the
        // transcript.
        if let Ok(id) = table.exit_scope() {
            self.emit(&format!("\tScopeTable# {id} removed"));
        }
    }

    fn quit(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        for id in table.shutdown() {
            self.emit(&format!("\tScopeTable# {id} removed"));
        }
    }

    fn emit(&mut self, line: &str) {
        self.transcript.push_str(line);
        self.transcript.push('\n');
    }
}
