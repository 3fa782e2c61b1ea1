//! FIRST and FOLLOW set computation.
//!
//! Both run the classic fixed-point iteration with a changed flag. The
//! grammars handled here have no epsilon productions (empty right sides
//! are rejected up front), which keeps the transfer rules simple: the
//! FIRST of a sequence is the FIRST of its head, and only the symbol
//! directly after a nonterminal contributes to its FOLLOW.

use std::collections::BTreeSet;

use crate::error::GrammarError;
use crate::grammar::{Grammar, SymbolId};

/// Computes FIRST for every symbol, indexed by symbol id.
///
/// Terminals start out with themselves; each production then feeds the
/// FIRST of its leading symbol into its left-hand side until nothing
/// changes. Fails with [`GrammarError::EmptyProduction`] if any right
/// side is empty.
pub fn first_sets(grammar: &Grammar) -> Result<Vec<BTreeSet<SymbolId>>, GrammarError> {
    for (i, prod) in grammar.productions().iter().enumerate() {
        if prod.rhs.is_empty() {
            return Err(GrammarError::EmptyProduction { production: i });
        }
    }

    let mut first: Vec<BTreeSet<SymbolId>> = vec![BTreeSet::new(); grammar.n_symbols()];
    for t in grammar.n_nonterminals()..grammar.n_symbols() {
        first[t].insert(t);
    }
    let mut changed = true;
    while changed {
        changed = false;
        for prod in grammar.productions() {
            let head = prod.rhs[0];
            // Clone so the head's set can be read while the left-hand
            // side's set is extended.
            for sym in first[head].clone() {
                if first[prod.lhs].insert(sym) {
                    changed = true;
                }
            }
        }
    }
    Ok(first)
}

/// FOLLOW sets for every nonterminal, indexed by nonterminal id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowTable {
    follow: Vec<BTreeSet<SymbolId>>,
}

impl FollowTable {
    /// Computes FOLLOW for an augmented grammar.
    ///
    /// Seeds the start symbol with the end marker, then iterates two
    /// rules to a fixed point: a symbol following a nonterminal inside a
    /// right side contributes its FIRST, and a nonterminal ending a
    /// right side inherits the FOLLOW of the production's left side.
    pub fn compute(grammar: &Grammar) -> Result<FollowTable, GrammarError> {
        let first = first_sets(grammar)?;
        let mut follow: Vec<BTreeSet<SymbolId>> = vec![BTreeSet::new(); grammar.n_nonterminals()];
        follow[grammar.start()].insert(grammar.end_marker());

        let mut changed = true;
        while changed {
            changed = false;
            for prod in grammar.productions() {
                for (i, &sym) in prod.rhs.iter().enumerate() {
                    if !grammar.is_nonterminal(sym) {
                        continue;
                    }
                    match prod.rhs.get(i + 1) {
                        Some(&next) => {
                            for t in first[next].clone() {
                                if follow[sym].insert(t) {
                                    changed = true;
                                }
                            }
                        }
                        None => {
                            // Clone keeps the A -> x A case sound.
                            for t in follow[prod.lhs].clone() {
                                if follow[sym].insert(t) {
                                    changed = true;
                                }
                            }
                        }
                    }
                }
            }
        }
        log::debug!(
            "follow sets stabilized with {} entries",
            follow.iter().map(BTreeSet::len).sum::<usize>()
        );
        Ok(FollowTable { follow })
    }

    /// FOLLOW of `nonterminal`. Panics if the id is not a nonterminal.
    pub fn of(&self, nonterminal: SymbolId) -> &BTreeSet<SymbolId> {
        &self.follow[nonterminal]
    }

    /// All sets, indexed by nonterminal id.
    pub fn sets(&self) -> &[BTreeSet<SymbolId>] {
        &self.follow
    }
}
