//! The scope stack driving a whole run
//!
//! A [`SymbolTable`] owns the current [`ScopeTable`] by value; enclosing
//! scopes hang off it through parent links, innermost first. Entering a
//! scope pushes, exiting pops and frees, and shutdown consumes the table
//! outright, so a finished table cannot be used again by construction.

use crate::error::{DuplicateSymbol, RootScope, SymbolMissing};
use crate::scope::{ScopeId, ScopeTable, Slot};
use crate::symbol::Symbol;
use std::fmt;
use std::mem;
use std::num::NonZeroU32;

/// Where a mutation landed: the scope that absorbed it, and the slot
/// within that scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    /// The scope the operation ran against (always the current one).
    pub scope: ScopeId,
    /// 1-based coordinates inside that scope.
    pub slot: Slot,
}

/// Outcome of resolving a name through the scope stack.
#[derive(Debug)]
pub struct Resolution<'table> {
    /// The innermost match, if any scope held the name.
    pub symbol: Option<&'table Symbol>,
    /// The owning scope on a hit; the current scope on a miss.
    pub scope: ScopeId,
    /// Coordinates inside the owning scope; `None` on a miss.
    pub slot: Option<Slot>,
}

/// A stack of scopes sharing one bucket count.
///
/// Starts with a root scope (id 1) that can never be exited, only shut
/// down. Scope ids count up from there and are never reused, so ids in
/// diagnostics stay unambiguous across the run.
#[derive(Debug)]
pub struct SymbolTable {
    current: ScopeTable,
    bucket_count: NonZeroU32,
    last_id: u32,
}

impl SymbolTable {
    /// Creates a table holding just the root scope.
    #[must_use]
    pub fn new(bucket_count: NonZeroU32) -> Self {
        let table = Self {
            current: ScopeTable::new(ScopeId::ROOT, bucket_count),
            bucket_count,
            last_id: ScopeId::ROOT.0,
        };
        tracing::debug!(buckets = bucket_count.get(), "symbol table created");
        table
    }

    /// Bucket count shared by every scope in this table.
    #[must_use]
    pub fn bucket_count(&self) -> NonZeroU32 {
        self.bucket_count
    }

    /// The innermost live scope.
    #[must_use]
    pub fn current(&self) -> &ScopeTable {
        &self.current
    }

    /// Number of live scopes, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self.current.parent();
        while let Some(table) = scope {
            depth += 1;
            scope = table.parent();
        }
        depth
    }

    /// Pushes a fresh scope and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        self.last_id += 1;
        let id = ScopeId(self.last_id);
        let parent = mem::replace(&mut self.current, ScopeTable::new(id, self.bucket_count));
        self.current.parent = Some(Box::new(parent));
        tracing::debug!(scope = %id, "entered scope");
        id
    }

    /// Pops the current scope, frees it, and reports its id.
    ///
    /// # Errors
    ///
    /// Refuses to pop the root scope; the table is left untouched. This
    /// holds no matter how many scopes were entered and exited before,
    /// since the check is on the scope's position, not on any counter.
    pub fn exit_scope(&mut self) -> Result<ScopeId, RootScope> {
        match self.current.parent.take() {
            Some(parent) => {
                let exited = mem::replace(&mut self.current, *parent);
                let id = exited.id();
                tracing::debug!(scope = %id, "exited scope");
                Ok(id)
            }
            None => Err(RootScope {
                id: self.current.id(),
            }),
        }
    }

    /// Inserts into the current scope only.
    ///
    /// A name may shadow an entry of an enclosing scope; only a duplicate
    /// within the current scope itself is refused.
    ///
    /// # Errors
    ///
    /// Propagates the duplicate report from the current scope.
    pub fn insert(&mut self, symbol: Symbol) -> Result<Placed, DuplicateSymbol> {
        let scope = self.current.id();
        let slot = self.current.insert(symbol)?;
        Ok(Placed { scope, slot })
    }

    /// Removes from the current scope only; enclosing scopes are never
    /// touched, even when they hold the name.
    ///
    /// # Errors
    ///
    /// Reports a miss when the current scope does not hold the name.
    pub fn remove(&mut self, name: &str) -> Result<Placed, SymbolMissing> {
        let scope = self.current.id();
        let slot = self.current.remove(name)?;
        Ok(Placed { scope, slot })
    }

    /// Resolves `name` by walking from the current scope outward to the
    /// root, stopping at the first hit.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Resolution<'_> {
        let mut scope = Some(&self.current);
        while let Some(table) = scope {
            let probe = table.lookup(name);
            if probe.symbol.is_some() {
                return Resolution {
                    symbol: probe.symbol,
                    scope: table.id(),
                    slot: probe.slot(),
                };
            }
            scope = table.parent();
        }
        Resolution {
            symbol: None,
            scope: self.current.id(),
            slot: None,
        }
    }

    /// Writes the current scope at one tab of indentation.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn render_current(&self, out: &mut impl fmt::Write) -> fmt::Result {
        self.current.render(out, 1)
    }

    /// Writes every live scope, current first, indentation growing one tab
    /// per level toward the root.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn render_all(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let mut scope = Some(&self.current);
        let mut indent = 1;
        while let Some(table) = scope {
            table.render(out, indent)?;
            indent += 1;
            scope = table.parent();
        }
        Ok(())
    }

    /// Tears the table down, freeing every live scope innermost first,
    /// and reports the freed ids in that order, root last.
    ///
    /// Taking the table by value is the point: after shutdown there is
    /// nothing left to call.
    pub fn shutdown(mut self) -> Vec<ScopeId> {
        let mut removed = Vec::new();
        loop {
            removed.push(self.current.id());
            match self.current.parent.take() {
                Some(parent) => self.current = *parent,
                None => break,
            }
        }
        tracing::debug!(scopes = removed.len(), "symbol table shut down");
        removed
    }
}
