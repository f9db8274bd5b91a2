//! Hash-chained symbol storage for a single scope
//!
//! A [`ScopeTable`] is one lexical scope: a fixed array of buckets, each
//! holding a singly linked chain of symbols in arrival order. Coordinates
//! reported to callers are 1-based, bucket first, chain position second,
//! so they can be surfaced in diagnostics as-is.

use crate::error::{DuplicateSymbol, SymbolMissing};
use crate::hash;
use crate::symbol::Symbol;
use std::fmt;
use std::num::NonZeroU32;

/// Identity of a scope, assigned at creation and never reused within a
/// table, even after the scope is exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The root scope every table starts with.
    pub const ROOT: Self = Self(1);
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based coordinates of a symbol within one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Bucket the name hashes to, counted from 1.
    pub bucket: usize,
    /// Position along the bucket's chain, counted from 1.
    pub position: usize,
}

impl fmt::Display for Slot {
    /// Renders as `bucket, position`, the order diagnostics quote them in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.bucket, self.position)
    }
}

/// Outcome of probing one scope for a name.
///
/// The bucket is reported even on a miss, so a caller can say where the
/// name would have been. `position` is 0 only when the name is absent.
#[derive(Debug)]
pub struct Lookup<'scope> {
    /// The matching symbol, if the chain held one.
    pub symbol: Option<&'scope Symbol>,
    /// 1-based bucket the name hashes to.
    pub bucket: usize,
    /// 1-based chain position of the hit, or 0 on a miss.
    pub position: usize,
}

impl Lookup<'_> {
    /// Coordinates of the hit, when there was one.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        (self.position != 0).then_some(Slot {
            bucket: self.bucket,
            position: self.position,
        })
    }
}

struct ChainNode {
    symbol: Symbol,
    next: Option<Box<ChainNode>>,
}

/// One bucket's chain, linked in arrival order.
#[derive(Default)]
struct Chain {
    head: Option<Box<ChainNode>>,
}

impl Chain {
    /// Appends at the tail unless the name is already present. `Ok` carries
    /// the 1-based position of the new entry, `Err` hands the symbol back
    /// together with the position of the existing entry.
    fn append(&mut self, symbol: Symbol) -> Result<usize, (usize, Symbol)> {
        let mut position = 1;
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            if node.symbol.name == symbol.name {
                return Err((position, symbol));
            }
            position += 1;
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(ChainNode { symbol, next: None }));
        Ok(position)
    }

    /// Position and symbol of `name`, scanning from the head.
    fn find(&self, name: &str) -> Option<(usize, &Symbol)> {
        let mut position = 1;
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.symbol.name == name {
                return Some((position, &node.symbol));
            }
            position += 1;
            cursor = node.next.as_deref();
        }
        None
    }

    /// Unlinks the node holding `name`, relinking its predecessor to its
    /// successor, and reports the position the node occupied.
    fn unlink(&mut self, name: &str) -> Option<usize> {
        // Resolve the position first; the splice below must be the only
        // outstanding borrow of the chain.
        let (position, _) = self.find(name)?;
        let mut cursor = &mut self.head;
        for _ in 1..position {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let node = cursor.take()?;
        *cursor = node.next;
        Some(position)
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        // Unlink iteratively; letting the boxes drop recursively would
        // scale the stack with chain length.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// A single scope's symbol storage.
///
/// Created with a fixed bucket count that never changes afterwards. The
/// scope stack in [`crate::table::SymbolTable`] links scopes through their
/// `parent` field; a `ScopeTable` on its own is a perfectly usable flat
/// table.
pub struct ScopeTable {
    id: ScopeId,
    bucket_count: NonZeroU32,
    buckets: Vec<Chain>,
    pub(crate) parent: Option<Box<ScopeTable>>,
}

impl ScopeTable {
    /// Creates an empty scope with `bucket_count` buckets.
    ///
    /// Ids are ordinarily assigned by the owning symbol table; standalone
    /// scopes can pick any id they like.
    #[must_use]
    pub fn new(id: ScopeId, bucket_count: NonZeroU32) -> Self {
        let buckets = (0..bucket_count.get()).map(|_| Chain::default()).collect();
        Self {
            id,
            bucket_count,
            buckets,
            parent: None,
        }
    }

    /// This scope's id.
    #[must_use]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Number of buckets, fixed at creation.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// The enclosing scope, if this one is linked into a stack.
    #[must_use]
    pub fn parent(&self) -> Option<&ScopeTable> {
        self.parent.as_deref()
    }

    /// 0-based bucket index for `name`.
    fn bucket_index(&self, name: &str) -> usize {
        hash::bucket_of(name, self.bucket_count) as usize
    }

    /// Inserts a symbol at the tail of its bucket's chain.
    ///
    /// # Errors
    ///
    /// Refuses the insert without modifying the chain when the name is
    /// already present; the error locates the existing entry.
    pub fn insert(&mut self, symbol: Symbol) -> Result<Slot, DuplicateSymbol> {
        let bucket = self.bucket_index(&symbol.name);
        match self.buckets[bucket].append(symbol) {
            Ok(position) => {
                let slot = Slot {
                    bucket: bucket + 1,
                    position,
                };
                tracing::trace!(scope = %self.id, slot = %slot, "inserted symbol");
                Ok(slot)
            }
            Err((position, symbol)) => Err(DuplicateSymbol {
                name: symbol.name,
                existing: Slot {
                    bucket: bucket + 1,
                    position,
                },
            }),
        }
    }

    /// Probes this scope, and only this scope, for `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        let bucket = self.bucket_index(name);
        match self.buckets[bucket].find(name) {
            Some((position, symbol)) => Lookup {
                symbol: Some(symbol),
                bucket: bucket + 1,
                position,
            },
            None => Lookup {
                symbol: None,
                bucket: bucket + 1,
                position: 0,
            },
        }
    }

    /// Removes `name` from this scope, relinking the chain around it.
    ///
    /// # Errors
    ///
    /// Reports the bucket the name hashes to when it is not present.
    pub fn remove(&mut self, name: &str) -> Result<Slot, SymbolMissing> {
        let bucket = self.bucket_index(name);
        match self.buckets[bucket].unlink(name) {
            Some(position) => {
                let slot = Slot {
                    bucket: bucket + 1,
                    position,
                };
                tracing::trace!(scope = %self.id, slot = %slot, "removed symbol");
                Ok(slot)
            }
            None => Err(SymbolMissing {
                name: name.to_owned(),
                bucket: bucket + 1,
            }),
        }
    }

    /// Writes this scope's contents, one line per bucket, every line
    /// prefixed with `indent` tabs.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying writer.
    pub fn render(&self, out: &mut impl fmt::Write, indent: usize) -> fmt::Result {
        for _ in 0..indent {
            out.write_char('\t')?;
        }
        writeln!(out, "ScopeTable# {}", self.id)?;
        for (index, chain) in self.buckets.iter().enumerate() {
            for _ in 0..indent {
                out.write_char('\t')?;
            }
            write!(out, "{}--> ", index + 1)?;
            let mut cursor = chain.head.as_deref();
            while let Some(node) = cursor {
                write!(out, "{} ", node.symbol)?;
                cursor = node.next.as_deref();
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl fmt::Debug for ScopeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTable")
            .field("id", &self.id)
            .field("buckets", &self.buckets.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl Drop for ScopeTable {
    fn drop(&mut self) {
        // Detach parents one at a time so a deep scope stack is torn down
        // iteratively rather than by nested drops.
        let mut parent = self.parent.take();
        while let Some(mut scope) = parent {
            parent = scope.parent.take();
        }
    }
}
