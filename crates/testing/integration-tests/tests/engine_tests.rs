//! Direct engine coverage from outside the crate

use integration_tests::transcript;
use st_symtab::{ScopeId, Slot, Symbol, SymbolTable};
use std::num::NonZeroU32;

fn table(buckets: u32) -> SymbolTable {
    SymbolTable::new(NonZeroU32::new(buckets).unwrap())
}

#[test]
fn test_session_like_walk_through_the_api() {
    let mut table = table(2);
    table.insert(Symbol::new("x", "INT")).unwrap();

    table.enter_scope();
    let placed = table.insert(Symbol::new("x", "FLOAT")).unwrap();
    assert_eq!(placed.scope, ScopeId(2));
    assert_eq!(
        placed.slot,
        Slot {
            bucket: 1,
            position: 1
        }
    );

    // The inner definition shadows; the outer one is untouched.
    assert_eq!(table.lookup("x").scope, ScopeId(2));
    table.exit_scope().unwrap();
    assert_eq!(table.lookup("x").scope, ScopeId::ROOT);

    assert_eq!(table.shutdown(), vec![ScopeId::ROOT]);
}

#[test]
fn test_render_matches_session_print() {
    // The same state built through the API and through a script must
    // render identically.
    let mut table = table(2);
    table.insert(Symbol::new("x", "INT")).unwrap();
    table.enter_scope();
    table.insert(Symbol::new("y", "FLOAT")).unwrap();

    let mut direct = String::new();
    table.render_all(&mut direct).unwrap();

    let scripted = transcript("2\nI x INT\nS\nI y FLOAT\nP A\nQ\n").unwrap();
    assert!(scripted.contains(&direct));
}
