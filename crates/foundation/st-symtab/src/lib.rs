//! Scoped symbol tables with hash-chained buckets
//!
//! The storage layer of a compiler front end's name resolution: a stack of
//! lexical scopes, each a fixed-width hash table of bucket chains keeping
//! symbols in arrival order. [`table::SymbolTable`] drives the stack and
//! routes every operation; [`scope::ScopeTable`] is the single-scope
//! building block underneath.
//!
//! Design points worth knowing up front:
//!
//! - Every reported coordinate is 1-based, bucket first, then position
//!   along the chain, matching how diagnostics quote them.
//! - Expected outcomes (duplicate insert, missing name, exiting the root)
//!   are values carrying the coordinates involved, not panics.
//! - Shutdown consumes the table, so use-after-teardown is unrepresentable.

pub mod error;
pub mod hash;
pub mod scope;
pub mod symbol;
pub mod table;

pub use error::{DuplicateSymbol, RootScope, SymbolMissing};
pub use scope::{Lookup, ScopeId, ScopeTable, Slot};
pub use symbol::Symbol;
pub use table::{Placed, Resolution, SymbolTable};
