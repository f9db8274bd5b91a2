//! Expected failures of table operations
//!
//! These are ordinary outcomes a caller is meant to branch on, not faults:
//! a front end reports a duplicate declaration and keeps going. Each carries
//! the coordinates the caller needs for its diagnostic.

use crate::scope::{ScopeId, Slot};
use thiserror::Error;

/// The name is already present in the probed scope.
///
/// The insert was refused and the scope is unchanged; `existing` locates
/// the entry that already holds the name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' already exists at position {existing}")]
pub struct DuplicateSymbol {
    /// The colliding name, handed back to the caller.
    pub name: String,
    /// Coordinates of the entry already holding the name.
    pub existing: Slot,
}

/// The name is absent from the probed scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' not found in bucket {bucket}")]
pub struct SymbolMissing {
    /// The name that was asked for.
    pub name: String,
    /// 1-based bucket the name hashes to, reported even on a miss.
    pub bucket: usize,
}

/// An attempt to exit the root scope.
///
/// The root can only be left through shutdown; the table is unchanged and
/// the root stays current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("scope {id} is the root and cannot be exited")]
pub struct RootScope {
    /// Id of the root scope, which remains current.
    pub id: ScopeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_symbol_message() {
        let err = DuplicateSymbol {
            name: "x".to_owned(),
            existing: Slot {
                bucket: 4,
                position: 2,
            },
        };
        assert_eq!(err.to_string(), "'x' already exists at position 4, 2");
    }

    #[test]
    fn test_symbol_missing_message() {
        let err = SymbolMissing {
            name: "y".to_owned(),
            bucket: 3,
        };
        assert_eq!(err.to_string(), "'y' not found in bucket 3");
    }

    #[test]
    fn test_root_scope_message() {
        let err = RootScope { id: ScopeId::ROOT };
        assert_eq!(err.to_string(), "scope 1 is the root and cannot be exited");
    }
}
